//! Repository trait definitions (ports).
//!
//! These traits define the storage interface that the infrastructure layer
//! (washbay-infra) implements. The core crate never depends on any
//! specific storage technology. Each trait is kept to the operations its
//! callers actually need so test doubles stay small.

pub mod booking;
pub mod customer;
pub mod service;

/// Sort order for list queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::Desc
    }
}
