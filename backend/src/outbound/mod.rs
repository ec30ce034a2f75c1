//! Outbound adapters implementing the domain's driven ports.
//!
//! - **persistence**: in-memory and PostgreSQL repositories
//! - **enhancer**: HTTP client for the description enhancement service
//!
//! Adapters translate between domain types and infrastructure formats and
//! carry no business rules.

pub mod enhancer;
pub mod persistence;
