//! Shared HTTP adapter state.
//!
//! Handlers receive this through `actix_web::web::Data` and only see the
//! driving ports, so they can be exercised with mocks and no I/O.

use std::sync::Arc;

use crate::domain::ports::{ClinicQuery, RegistrationCommand};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub registration: Arc<dyn RegistrationCommand>,
    pub query: Arc<dyn ClinicQuery>,
}

impl HttpState {
    /// Bundle the registration and query ports.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use petclinic::domain::ports::PassthroughDescriptionEnhancer;
    /// use petclinic::domain::{ClinicQueryService, RegistrationService};
    /// use petclinic::inbound::http::state::HttpState;
    /// use petclinic::outbound::persistence::InMemoryClinicStore;
    ///
    /// let store = Arc::new(InMemoryClinicStore::default());
    /// let registration = RegistrationService::new(
    ///     store.clone(),
    ///     store.clone(),
    ///     store.clone(),
    ///     Arc::new(PassthroughDescriptionEnhancer),
    /// );
    /// let query = ClinicQueryService::new(store.clone(), store.clone(), store);
    /// let state = HttpState::new(Arc::new(registration), Arc::new(query));
    /// let _query = state.query.clone();
    /// ```
    pub fn new(registration: Arc<dyn RegistrationCommand>, query: Arc<dyn ClinicQuery>) -> Self {
        Self {
            registration,
            query,
        }
    }
}
