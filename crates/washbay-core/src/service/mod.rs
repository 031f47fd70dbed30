//! Business logic services (use cases).
//!
//! Services orchestrate repository calls, pricing, availability and
//! business rules. They depend on traits (ports) -- never on concrete
//! infrastructure implementations.

pub mod availability;
pub mod booking;
pub mod catalog;
pub mod customer;
pub mod pricing;
