//! Shared domain types for Washbay.
//!
//! This crate contains the core domain types used across the Washbay booking
//! backend: Booking, Service, Customer, and their associated error and
//! configuration types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror,
//! rust_decimal and rand.

pub mod booking;
pub mod config;
pub mod customer;
pub mod error;
pub mod service;
