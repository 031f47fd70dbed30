//! Booking desk status dashboard command.

use anyhow::Result;
use console::style;

use crate::http::handlers::stats::collect_stats;
use crate::state::AppState;

/// Display the status dashboard.
///
/// Shows booking counts by status, revenue, catalog size, and schedule config.
pub async fn status(state: &AppState, json: bool) -> Result<()> {
    let stats = collect_stats(state)
        .await
        .map_err(|e| anyhow::anyhow!("failed to gather stats: {}", e.message()))?;
    let schedule = &state.config.schedule;

    if json {
        let status = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "data_dir": state.data_dir.display().to_string(),
            "stats": stats,
            "schedule": schedule,
            "pricing": state.config.pricing,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Washbay v{}",
        style("🚿").bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!();

    println!("  {}", style("── Bookings ──").dim());
    println!("  Total:       {}", style(stats.total_bookings).bold());
    for (status, count) in &stats.bookings_by_status {
        if *count > 0 {
            println!("  {:<12} {}", format!("{status}:"), count);
        }
    }
    println!(
        "  Revenue:     {}",
        style(format!("${}", stats.completed_revenue)).green()
    );
    println!();

    println!("  {}", style("── Catalog ──").dim());
    println!("  Customers:   {}", style(stats.total_customers).bold());
    println!("  Services:    {} active", style(stats.active_services).bold());
    println!();

    println!("  {}", style("── Schedule ──").dim());
    println!(
        "  Hours:       {:02}:00-{:02}:00 UTC",
        schedule.opening_hour, schedule.closing_hour
    );
    println!("  Lead time:   {} min", schedule.min_lead_minutes);
    println!("  Mobile fee:  ${}", state.config.pricing.mobile_fee);
    println!();

    println!("  {}", style("── System ──").dim());
    println!("  Data dir: {}", style(state.data_dir.display()).dim());
    println!("  Database: {}", style("SQLite (WAL mode)").dim());
    println!();

    Ok(())
}
