//! Infrastructure layer for Washbay.
//!
//! Contains implementations of the ports defined in `washbay-core`: SQLite
//! repositories, the schedule-based availability checker, table-driven
//! pricing, and the `config.toml` loader.

pub mod availability;
pub mod config;
pub mod pricing;
pub mod sqlite;
