//! HTTP request handlers for the REST API.

pub mod booking;
pub mod customer;
pub mod service;
pub mod stats;
