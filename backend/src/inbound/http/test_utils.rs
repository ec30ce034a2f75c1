//! Test helpers for the HTTP handlers.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, test as actix_test, web};
use serde_json::Value;

use crate::domain::ports::{MockClinicQuery, MockRegistrationCommand};
use crate::inbound::http::configure_api;
use crate::inbound::http::state::HttpState;

/// Build state over mocked driving ports.
pub(crate) fn mock_state(
    registration: MockRegistrationCommand,
    query: MockClinicQuery,
) -> HttpState {
    HttpState::new(Arc::new(registration), Arc::new(query))
}

/// Application serving the `/api/v1` scope over `state`.
pub(crate) fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .service(web::scope("/api/v1").configure(configure_api))
}

/// Decode a response body as JSON.
pub(crate) async fn read_json(response: ServiceResponse) -> Value {
    let body = actix_test::read_body(response).await;
    serde_json::from_slice(&body).expect("response body is JSON")
}
