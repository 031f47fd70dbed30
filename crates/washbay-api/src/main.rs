//! Washbay CLI and REST API entry point.
//!
//! Binary name: `washbay`
//!
//! Parses CLI arguments, initializes database and services, then dispatches
//! to the appropriate command handler or starts the REST API server.

mod cli;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands, CreateResource, ListResource, SetResource};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,washbay=debug",
        _ => "trace",
    };

    washbay_observe::tracing_setup::init_tracing(filter, cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "washbay", &mut std::io::stdout());
        return Ok(());
    }

    // Initialize application state (DB, services)
    let state = AppState::init().await?;

    let result = run(cli, state).await;
    washbay_observe::tracing_setup::shutdown_tracing();
    result
}

async fn run(cli: Cli, state: AppState) -> anyhow::Result<()> {
    match cli.command {
        Commands::Create { resource } => match resource {
            CreateResource::Customer { name, email, phone } => {
                cli::customer::create_customer(&state, name, email, phone, cli.json).await?;
            }
            CreateResource::Service {
                name,
                description,
                price,
                duration,
            } => {
                cli::service::create_service(&state, name, description, price, duration, cli.json)
                    .await?;
            }
            CreateResource::Booking(args) => {
                cli::booking::create_booking(&state, args, cli.json).await?;
            }
        },

        Commands::List { resource } => match resource {
            ListResource::Customers { limit, offset } => {
                cli::customer::list_customers(&state, limit, offset, cli.json).await?;
            }
            ListResource::Services { active_only } => {
                cli::service::list_services(&state, active_only, cli.json).await?;
            }
            ListResource::Bookings {
                customer,
                status,
                order,
                limit,
            } => {
                cli::booking::list_bookings(&state, customer, status, &order, limit, cli.json)
                    .await?;
            }
        },

        Commands::Show { booking_id } => {
            cli::booking::show_booking(&state, &booking_id, cli.json).await?;
        }

        Commands::Set { resource } => match resource {
            SetResource::Status { booking_id, status } => {
                cli::booking::set_status(&state, &booking_id, &status, cli.json).await?;
            }
            SetResource::ServiceActive { service_id, active } => {
                cli::service::set_active(&state, &service_id, active, cli.json).await?;
            }
        },

        Commands::Cancel { booking_id, force } => {
            cli::booking::cancel_booking(&state, &booking_id, force, cli.json).await?;
        }

        Commands::Status => {
            cli::status::status(&state, cli.json).await?;
        }

        Commands::Serve { port, host } => {
            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            tracing::info!(%addr, data_dir = %state.data_dir.display(), "api server starting");
            if !cli.quiet {
                println!(
                    "  {} Washbay API listening on {}",
                    console::style("🚿").bold(),
                    console::style(format!("http://{addr}/api/v1")).cyan()
                );
                println!("  {}", console::style("Press Ctrl+C to stop").dim());
            }

            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            if !cli.quiet {
                println!("\n  Server stopped.");
            }
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
