//! Service catalog CLI commands: create, list, activate/deactivate.

use anyhow::{Context, Result};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use dialoguer::Input;
use rust_decimal::Decimal;

use washbay_types::service::{CreateServiceRequest, ServiceId, UpdateServiceRequest};

use crate::cli::spinner;
use crate::state::AppState;

/// Add a service to the catalog.
pub async fn create_service(
    state: &AppState,
    name: Option<String>,
    description: Option<String>,
    price: Option<String>,
    duration: Option<u32>,
    json: bool,
) -> Result<()> {
    let name = match name {
        Some(n) => n,
        None => Input::<String>::new()
            .with_prompt("Service name")
            .interact_text()?,
    };

    let price = match price {
        Some(p) => p,
        None => Input::<String>::new()
            .with_prompt("Base price")
            .interact_text()?,
    };
    let price: Decimal = price
        .trim()
        .trim_start_matches('$')
        .parse()
        .with_context(|| format!("'{price}' is not a valid price"))?;

    let duration_minutes = match duration {
        Some(d) => d,
        None => Input::<u32>::new()
            .with_prompt("Duration (minutes)")
            .default(30)
            .interact_text()?,
    };

    let spinner = spinner("Adding service...")?;
    let result = state
        .catalog_service
        .add_service(CreateServiceRequest {
            name,
            description,
            price,
            duration_minutes,
        })
        .await;
    spinner.finish_and_clear();
    let service = result?;

    if json {
        println!("{}", serde_json::to_string_pretty(&service)?);
        return Ok(());
    }

    println!();
    println!("  {} Service added!", style("✓").green().bold());
    println!();
    println!("  {}      {}", style("Name:").bold(), style(&service.name).cyan());
    println!("  {}     ${}", style("Price:").bold(), service.price);
    println!("  {}  {} min", style("Duration:").bold(), service.duration_minutes);
    println!(
        "  {}        {}",
        style("ID:").bold(),
        style(service.id.to_string()).dim()
    );
    println!();

    Ok(())
}

/// List catalog services in a table.
pub async fn list_services(state: &AppState, active_only: bool, json: bool) -> Result<()> {
    let services = state.catalog_service.list_services(active_only).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&services)?);
        return Ok(());
    }

    if services.is_empty() {
        println!();
        println!(
            "  {} No services found. Add one with: {}",
            style("i").blue().bold(),
            style("washbay create service").yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Name").fg(Color::White),
        Cell::new("Price").fg(Color::White),
        Cell::new("Duration").fg(Color::White),
        Cell::new("Status").fg(Color::White),
        Cell::new("ID").fg(Color::White),
    ]);

    for service in &services {
        let status_cell = if service.is_active {
            Cell::new("● active").fg(Color::Green)
        } else {
            Cell::new("○ inactive").fg(Color::DarkGrey)
        };

        table.add_row(vec![
            Cell::new(&service.name).fg(Color::Cyan),
            Cell::new(format!("${}", service.price)),
            Cell::new(format!("{} min", service.duration_minutes)),
            status_cell,
            Cell::new(service.id.to_string()).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} service{}",
        style(services.len()).bold(),
        if services.len() == 1 { "" } else { "s" }
    );
    println!();

    Ok(())
}

/// Toggle whether a service accepts new bookings.
pub async fn set_active(state: &AppState, service_id: &str, active: bool, json: bool) -> Result<()> {
    let id: ServiceId = service_id
        .parse()
        .with_context(|| format!("'{service_id}' is not a valid service ID"))?;

    let service = state
        .catalog_service
        .update_service(
            &id,
            UpdateServiceRequest {
                is_active: Some(active),
                ..Default::default()
            },
        )
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&service)?);
    } else if service.is_active {
        println!(
            "  {} '{}' is accepting bookings.",
            style("✓").green().bold(),
            service.name
        );
    } else {
        println!(
            "  {} '{}' is hidden from new bookings.",
            style("○").yellow().bold(),
            service.name
        );
    }

    Ok(())
}
