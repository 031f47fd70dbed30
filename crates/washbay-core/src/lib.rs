//! Business logic and repository trait definitions for Washbay.
//!
//! This crate defines the "ports" (repository, pricing and availability
//! traits) that the infrastructure layer implements, and the services that
//! orchestrate them. It depends only on `washbay-types` -- never on
//! `washbay-infra` or any database/IO crate.

pub mod repository;
pub mod service;
