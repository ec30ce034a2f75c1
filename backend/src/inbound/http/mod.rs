//! HTTP inbound adapter exposing the clinic REST endpoints.

use actix_web::web;

pub mod envelope;
pub mod error;
pub mod flexible_time;
pub mod health;
pub mod owners;
pub mod pets;
pub mod state;
#[cfg(test)]
pub(crate) mod test_utils;
mod validation;
pub mod visits;

pub use error::ApiResult;

/// Register the `/api/v1` handlers and extractor error mapping.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use petclinic::inbound::http::configure_api;
///
/// let app = App::new().service(web::scope("/api/v1").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| error::extractor_error("json body", err).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| error::extractor_error("query string", err).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| error::extractor_error("path", err).into()),
    )
    .service(owners::register_owner)
    .service(owners::list_owners)
    .service(owners::get_owner)
    .service(pets::register_pet)
    .service(pets::list_pets)
    .service(pets::get_pet_by_identifier)
    .service(pets::get_pet)
    .service(visits::register_visit)
    .service(visits::list_visits)
    .service(visits::get_visit);
}
