//! Customer CLI commands: register, list.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use dialoguer::Input;

use washbay_types::customer::CreateCustomerRequest;

use crate::state::AppState;

/// Register a customer, prompting for name and email when not given.
pub async fn create_customer(
    state: &AppState,
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    json: bool,
) -> Result<()> {
    let name = match name {
        Some(n) => n,
        None => Input::<String>::new().with_prompt("Name").interact_text()?,
    };
    let email = match email {
        Some(e) => e,
        None => Input::<String>::new().with_prompt("Email").interact_text()?,
    };

    let customer = state
        .customer_service
        .register(CreateCustomerRequest { name, email, phone })
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&customer)?);
        return Ok(());
    }

    println!();
    println!("  {} Customer registered!", style("✓").green().bold());
    println!();
    println!("  {}   {}", style("Name:").bold(), style(&customer.name).cyan());
    println!("  {}  {}", style("Email:").bold(), customer.email);
    if let Some(phone) = &customer.phone {
        println!("  {}  {}", style("Phone:").bold(), phone);
    }
    println!(
        "  {}     {}",
        style("ID:").bold(),
        style(customer.id.to_string()).dim()
    );
    println!();

    Ok(())
}

/// List customers in a table.
pub async fn list_customers(
    state: &AppState,
    limit: Option<i64>,
    offset: Option<i64>,
    json: bool,
) -> Result<()> {
    let customers = state.customer_service.list_customers(limit, offset).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&customers)?);
        return Ok(());
    }

    if customers.is_empty() {
        println!();
        println!(
            "  {} No customers yet. Register one with: {}",
            style("i").blue().bold(),
            style("washbay create customer").yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Name").fg(Color::White),
        Cell::new("Email").fg(Color::White),
        Cell::new("Phone").fg(Color::White),
        Cell::new("Joined").fg(Color::White),
        Cell::new("ID").fg(Color::White),
    ]);

    for customer in &customers {
        table.add_row(vec![
            Cell::new(&customer.name).fg(Color::Cyan),
            Cell::new(&customer.email),
            Cell::new(customer.phone.as_deref().unwrap_or("-")),
            Cell::new(customer.created_at.format("%Y-%m-%d")).fg(Color::DarkGrey),
            Cell::new(customer.id.to_string()).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} customer{}",
        style(customers.len()).bold(),
        if customers.len() == 1 { "" } else { "s" }
    );
    println!();

    Ok(())
}
