//! HTTP server configuration object.

use std::net::SocketAddr;
use std::sync::Arc;

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;
use petclinic::domain::ports::{PassthroughDescriptionEnhancer, PetDescriptionEnhancer};
use petclinic::outbound::persistence::DbPool;

/// Builder-style configuration for [`create_server`](super::create_server).
///
/// Without a pool the server keeps its data in memory. Without an enhancer
/// descriptions are stored as submitted.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) enhancer: Arc<dyn PetDescriptionEnhancer>,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            enhancer: Arc::new(PassthroughDescriptionEnhancer),
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    /// Back the repositories with PostgreSQL.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Replace the passthrough description enhancer.
    #[must_use]
    pub fn with_enhancer(mut self, enhancer: Arc<dyn PetDescriptionEnhancer>) -> Self {
        self.enhancer = enhancer;
        self
    }

    #[cfg(feature = "metrics")]
    /// Attach Prometheus middleware and its `/metrics` endpoint.
    #[must_use]
    pub fn with_metrics(mut self, prometheus: PrometheusMetrics) -> Self {
        self.prometheus = Some(prometheus);
        self
    }
}
