//! Pet clinic backend library.
//!
//! Hexagonal layout: [`domain`] holds value objects, entities, ports and
//! services; [`inbound`] exposes them over HTTP; [`outbound`] implements the
//! driven ports.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
