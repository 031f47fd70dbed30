//! CLI command definitions and dispatch for the `washbay` binary.
//!
//! Uses clap derive macros for argument parsing. The CLI follows a verb-noun
//! pattern (e.g., `washbay create booking`, `washbay list services`).

pub mod booking;
pub mod customer;
pub mod service;
pub mod status;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use indicatif::{ProgressBar, ProgressStyle};

/// Run the car wash booking desk.
#[derive(Parser)]
#[command(name = "washbay", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export spans to stdout through OpenTelemetry.
    #[arg(long, global = true, env = "WASHBAY_OTEL")]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new resource.
    Create {
        #[command(subcommand)]
        resource: CreateResource,
    },

    /// List resources.
    #[command(alias = "ls")]
    List {
        #[command(subcommand)]
        resource: ListResource,
    },

    /// Show details of a booking.
    Show {
        /// Booking ID to display.
        booking_id: String,
    },

    /// Change a booking status or a service flag.
    Set {
        #[command(subcommand)]
        resource: SetResource,
    },

    /// Cancel a pending or confirmed booking.
    Cancel {
        /// Booking ID to cancel.
        booking_id: String,

        /// Skip confirmation prompt.
        #[arg(long)]
        force: bool,
    },

    /// Booking desk dashboard.
    Status,

    /// Start the REST API server.
    Serve {
        /// Port to listen on.
        #[arg(short, long, default_value = "3000", env = "WASHBAY_PORT")]
        port: u16,

        /// Host to bind to.
        #[arg(long, default_value = "127.0.0.1", env = "WASHBAY_HOST")]
        host: String,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum CreateResource {
    /// Register a customer.
    Customer {
        /// Full name (prompted if omitted).
        #[arg(long)]
        name: Option<String>,

        /// Email address (prompted if omitted).
        #[arg(long)]
        email: Option<String>,

        /// Phone number.
        #[arg(long)]
        phone: Option<String>,
    },

    /// Add a wash service to the catalog.
    Service {
        /// Service name (prompted if omitted).
        #[arg(long)]
        name: Option<String>,

        /// Short description.
        #[arg(long)]
        description: Option<String>,

        /// Base price, e.g. 42.50 (prompted if omitted).
        #[arg(long)]
        price: Option<String>,

        /// Minutes a bay is occupied (prompted if omitted).
        #[arg(long)]
        duration: Option<u32>,
    },

    /// Book a wash.
    Booking(booking::CreateBookingArgs),
}

#[derive(Subcommand)]
pub enum ListResource {
    /// List customers, newest first.
    Customers {
        /// Maximum number of rows.
        #[arg(long)]
        limit: Option<i64>,

        /// Rows to skip.
        #[arg(long)]
        offset: Option<i64>,
    },

    /// List the service catalog.
    Services {
        /// Hide inactive services.
        #[arg(long)]
        active_only: bool,
    },

    /// List bookings.
    Bookings {
        /// Only bookings for this customer ID.
        #[arg(long)]
        customer: Option<String>,

        /// Filter by status (pending, confirmed, in_progress, completed, cancelled).
        #[arg(long)]
        status: Option<String>,

        /// Sort by scheduled time (asc, desc).
        #[arg(long, default_value = "desc")]
        order: String,

        /// Maximum number of rows.
        #[arg(long)]
        limit: Option<i64>,
    },
}

#[derive(Subcommand)]
pub enum SetResource {
    /// Move a booking to a new lifecycle status.
    Status {
        /// Booking ID.
        booking_id: String,

        /// Target status (confirmed, in_progress, completed, cancelled).
        status: String,
    },

    /// Activate or deactivate a catalog service.
    #[command(name = "service-active")]
    ServiceActive {
        /// Service ID.
        service_id: String,

        /// true to allow new bookings, false to hide the service.
        #[arg(action = clap::ArgAction::Set)]
        active: bool,
    },
}

/// Steady-ticking spinner shown while a command talks to the database.
pub(crate) fn spinner(message: impl Into<String>) -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.set_message(message.into());
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    Ok(spinner)
}
