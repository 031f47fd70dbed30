//! Booking CLI commands: create, list, show, set status, cancel.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use dialoguer::{Confirm, Input};

use washbay_core::repository::SortOrder;
use washbay_core::repository::booking::BookingFilter;
use washbay_types::booking::{
    Booking, BookingId, BookingStatus, CreateBookingRequest, Location, VehicleClass, VehicleInfo,
};
use washbay_types::customer::CustomerId;
use washbay_types::service::ServiceId;

use crate::cli::spinner;
use crate::state::AppState;

/// Flags for `washbay create booking`. Required values are prompted when omitted.
#[derive(clap::Args)]
pub struct CreateBookingArgs {
    /// Customer ID.
    #[arg(long)]
    pub customer: Option<String>,

    /// Service ID.
    #[arg(long)]
    pub service: Option<String>,

    /// Start time in RFC 3339, e.g. 2030-05-01T09:00:00Z.
    #[arg(long)]
    pub at: Option<String>,

    /// Vehicle make.
    #[arg(long)]
    pub make: Option<String>,

    /// Vehicle model.
    #[arg(long)]
    pub model: Option<String>,

    /// Vehicle model year.
    #[arg(long)]
    pub year: Option<u16>,

    /// Vehicle color.
    #[arg(long)]
    pub color: Option<String>,

    /// License plate.
    #[arg(long)]
    pub plate: Option<String>,

    /// Vehicle class (compact, standard, suv, truck, van).
    #[arg(long, default_value = "standard")]
    pub class: String,

    /// Street address for a mobile wash. Conflicts with --site.
    #[arg(long, conflicts_with = "site")]
    pub address: Option<String>,

    /// Wash site for an in-store wash.
    #[arg(long)]
    pub site: Option<String>,

    /// Free-form notes for the crew.
    #[arg(long)]
    pub notes: Option<String>,
}

fn prompt_missing(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => Ok(Input::<String>::new().with_prompt(prompt).interact_text()?),
    }
}

pub(crate) fn parse_booking_id(raw: &str) -> Result<BookingId> {
    raw.parse()
        .with_context(|| format!("'{raw}' is not a valid booking ID"))
}

/// Book a wash from flags, prompting for anything missing.
///
/// # Examples
///
/// ```bash
/// washbay create booking --customer <id> --service <id> \
///     --at 2030-05-01T09:00:00Z --make Honda --model Civic --year 2019 \
///     --color blue --plate ABC123 --site "Main Street"
/// ```
pub async fn create_booking(state: &AppState, args: CreateBookingArgs, json: bool) -> Result<()> {
    let customer_id: CustomerId = prompt_missing(args.customer, "Customer ID")?
        .parse()
        .context("invalid customer ID")?;
    let service_id: ServiceId = prompt_missing(args.service, "Service ID")?
        .parse()
        .context("invalid service ID")?;
    let scheduled_at: DateTime<Utc> =
        prompt_missing(args.at, "Start time (RFC 3339, UTC)")?
            .parse()
            .context("start time must be RFC 3339, e.g. 2030-05-01T09:00:00Z")?;

    let year = match args.year {
        Some(y) => y,
        None => Input::<u16>::new().with_prompt("Vehicle year").interact_text()?,
    };
    let vehicle = VehicleInfo {
        make: prompt_missing(args.make, "Vehicle make")?,
        model: prompt_missing(args.model, "Vehicle model")?,
        year,
        color: prompt_missing(args.color, "Vehicle color")?,
        license_plate: prompt_missing(args.plate, "License plate")?,
        vehicle_class: args
            .class
            .parse::<VehicleClass>()
            .map_err(|e| anyhow::anyhow!(e))?,
    };

    let location = match (args.address, args.site) {
        (Some(address), _) => Location::Mobile {
            address,
            latitude: None,
            longitude: None,
        },
        (None, Some(site)) => Location::InStore { site },
        (None, None) => Location::InStore {
            site: Input::<String>::new()
                .with_prompt("Wash site")
                .default("Main".to_string())
                .interact_text()?,
        },
    };

    let request = CreateBookingRequest {
        customer_id,
        service_id,
        vehicle,
        location,
        scheduled_at,
        notes: args.notes,
    };

    let spinner = spinner("Booking wash...")?;
    let result = state.booking_service.create_booking(request).await;
    spinner.finish_and_clear();
    let confirmation = result?;

    if json {
        println!("{}", serde_json::to_string_pretty(&confirmation)?);
        return Ok(());
    }

    let booking = &confirmation.booking;
    println!();
    println!("  {} Wash booked!", style("✓").green().bold());
    println!();
    println!(
        "  {}  {}",
        style("Confirmation:").bold(),
        style(&confirmation.confirmation_code).cyan().bold()
    );
    println!(
        "  {}          {}",
        style("When:").bold(),
        booking.scheduled_at.format("%Y-%m-%d %H:%M UTC")
    );
    println!("  {}         {}", style("Where:").bold(), booking.location);
    println!(
        "  {}         {}",
        style("Price:").bold(),
        style(format!("${}", confirmation.estimated_price)).green()
    );
    println!(
        "  {}            {}",
        style("ID:").bold(),
        style(booking.id.to_string()).dim()
    );
    println!();

    Ok(())
}

/// List bookings in a table.
pub async fn list_bookings(
    state: &AppState,
    customer: Option<String>,
    status: Option<String>,
    order: &str,
    limit: Option<i64>,
    json: bool,
) -> Result<()> {
    let customer_id = match customer {
        Some(raw) => Some(raw.parse::<CustomerId>().context("invalid customer ID")?),
        None => None,
    };
    let status = match status {
        Some(s) => Some(s.parse::<BookingStatus>().map_err(|e| anyhow::anyhow!(e))?),
        None => None,
    };
    let sort_order = match order.to_lowercase().as_str() {
        "asc" => SortOrder::Asc,
        _ => SortOrder::Desc,
    };

    let filter = BookingFilter {
        customer_id,
        status,
        sort_order: Some(sort_order),
        limit,
        ..Default::default()
    };
    let bookings = state.booking_service.list_bookings(Some(filter)).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&bookings)?);
        return Ok(());
    }

    if bookings.is_empty() {
        println!();
        println!(
            "  {} No bookings found. Book one with: {}",
            style("i").blue().bold(),
            style("washbay create booking").yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("When").fg(Color::White),
        Cell::new("Status").fg(Color::White),
        Cell::new("Vehicle").fg(Color::White),
        Cell::new("Location").fg(Color::White),
        Cell::new("Price").fg(Color::White),
        Cell::new("ID").fg(Color::White),
    ]);

    for booking in &bookings {
        table.add_row(vec![
            Cell::new(booking.scheduled_at.format("%Y-%m-%d %H:%M")).fg(Color::Cyan),
            status_cell(booking.status),
            Cell::new(format!(
                "{} {} ({})",
                booking.vehicle.make, booking.vehicle.model, booking.vehicle.license_plate
            )),
            Cell::new(booking.location.to_string()),
            Cell::new(booking.price.to_string()),
            Cell::new(booking.id.to_string()).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} booking{}",
        style(bookings.len()).bold(),
        if bookings.len() == 1 { "" } else { "s" }
    );
    println!();

    Ok(())
}

/// Show full details of one booking.
pub async fn show_booking(state: &AppState, booking_id: &str, json: bool) -> Result<()> {
    let id = parse_booking_id(booking_id)?;
    let booking = state.booking_service.get_booking(&id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&booking)?);
        return Ok(());
    }

    let customer = state
        .customer_service
        .get_customer(&booking.customer_id)
        .await
        .ok();
    let service = state
        .catalog_service
        .get_service(&booking.service_id)
        .await
        .ok();

    println!();
    println!(
        "  {} {}",
        style(service.as_ref().map_or("Wash", |s| s.name.as_str())).cyan().bold(),
        format_status(booking.status)
    );
    println!();

    println!("  {}", style("── Schedule ──").dim());
    println!(
        "  {}     {}",
        style("Starts:").bold(),
        booking.scheduled_at.format("%Y-%m-%d %H:%M UTC")
    );
    println!(
        "  {}       {}",
        style("Ends:").bold(),
        booking
            .ends_at()
            .map_or_else(|| "-".to_string(), |end| end.format("%Y-%m-%d %H:%M UTC").to_string())
    );
    println!("  {}      {}", style("Where:").bold(), booking.location);
    println!();

    println!("  {}", style("── Customer ──").dim());
    match &customer {
        Some(c) => println!("  {} <{}>", c.name, c.email),
        None => println!("  {}", style(booking.customer_id.to_string()).dim()),
    }
    println!();

    print_vehicle(&booking);

    println!("  {}", style("── Billing ──").dim());
    println!("  {}      ${}", style("Price:").bold(), booking.price);
    if let Some(notes) = &booking.notes {
        println!("  {}      {}", style("Notes:").bold(), notes);
    }
    println!();

    println!("  {}", style("── Timestamps ──").dim());
    println!(
        "  {}    {}",
        style("Created:").bold(),
        booking.created_at.format("%Y-%m-%d %H:%M UTC")
    );
    println!(
        "  {}    {}",
        style("Updated:").bold(),
        booking.updated_at.format("%Y-%m-%d %H:%M UTC")
    );
    println!(
        "  {}         {}",
        style("ID:").bold(),
        style(booking.id.to_string()).dim()
    );
    println!();

    Ok(())
}

fn print_vehicle(booking: &Booking) {
    let v = &booking.vehicle;
    println!("  {}", style("── Vehicle ──").dim());
    println!(
        "  {} {} {} ({}, {})",
        v.year, v.make, v.model, v.color, v.vehicle_class
    );
    println!("  {}      {}", style("Plate:").bold(), v.license_plate);
    println!();
}

/// Move a booking to a new status.
pub async fn set_status(state: &AppState, booking_id: &str, status: &str, json: bool) -> Result<()> {
    let id = parse_booking_id(booking_id)?;
    let next = status
        .parse::<BookingStatus>()
        .map_err(|e| anyhow::anyhow!(e))?;

    let booking = state.booking_service.transition_status(&id, next).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&booking)?);
    } else {
        println!(
            "  {} Booking {} is now {}",
            style("✓").green().bold(),
            style(booking.id.to_string()).dim(),
            format_status(booking.status)
        );
    }

    Ok(())
}

/// Cancel a booking with confirmation.
pub async fn cancel_booking(state: &AppState, booking_id: &str, force: bool, json: bool) -> Result<()> {
    let id = parse_booking_id(booking_id)?;
    let booking = state.booking_service.get_booking(&id).await?;

    if !force && !json {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Cancel the wash on {}?",
                style(booking.scheduled_at.format("%Y-%m-%d %H:%M UTC")).red().bold()
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("  Kept.");
            return Ok(());
        }
    }

    let booking = state.booking_service.cancel_booking(&id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&booking)?);
    } else {
        println!(
            "  {} Booking {} cancelled.",
            style("✓").red().bold(),
            style(booking.id.to_string()).dim()
        );
    }

    Ok(())
}

// --- Formatting helpers ---

pub(crate) fn format_status(status: BookingStatus) -> String {
    match status {
        BookingStatus::Pending => format!("{}", style("○ pending").yellow()),
        BookingStatus::Confirmed => format!("{}", style("● confirmed").cyan()),
        BookingStatus::InProgress => format!("{}", style("◐ in progress").blue()),
        BookingStatus::Completed => format!("{}", style("✓ completed").green()),
        BookingStatus::Cancelled => format!("{}", style("◌ cancelled").dim()),
    }
}

fn status_cell(status: BookingStatus) -> Cell {
    match status {
        BookingStatus::Pending => Cell::new("○ pending").fg(Color::Yellow),
        BookingStatus::Confirmed => Cell::new("● confirmed").fg(Color::Cyan),
        BookingStatus::InProgress => Cell::new("◐ in progress").fg(Color::Blue),
        BookingStatus::Completed => Cell::new("✓ completed").fg(Color::Green),
        BookingStatus::Cancelled => Cell::new("◌ cancelled").fg(Color::DarkGrey),
    }
}
