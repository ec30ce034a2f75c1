//! Actix middleware for request lifecycle concerns.

pub mod trace;

pub use trace::Trace;
