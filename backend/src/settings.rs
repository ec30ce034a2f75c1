//! Server configuration loaded via OrthoConfig.
//!
//! Values come from `PETCLINIC_*` environment variables, configuration files
//! and command-line flags. Unset values fall back to the defaults exposed by
//! the accessors.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::outbound::enhancer::OpenAiEnhancerConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_API_VERSION: &str = "2024-02-01";

/// Backend used for owners, pets and visits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Memory,
    Postgres,
}

/// Invalid configuration detected after loading.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address {value}: {message}")]
    BindAddr { value: String, message: String },
    #[error("unknown store {value}; expected memory or postgres")]
    Store { value: String },
    #[error("the postgres store requires PETCLINIC_DATABASE_URL")]
    MissingDatabaseUrl,
    #[error("invalid enhancer endpoint {value}: {message}")]
    EnhancerEndpoint { value: String, message: String },
    #[error("the enhancer endpoint requires {field}")]
    MissingEnhancerField { field: &'static str },
}

/// Configuration values for the clinic server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PETCLINIC")]
pub struct ServerSettings {
    /// Socket address to bind, `0.0.0.0:8080` by default.
    pub bind_addr: Option<String>,
    /// `memory` (default) or `postgres`.
    pub store: Option<String>,
    /// PostgreSQL URL, required by the `postgres` store.
    pub database_url: Option<String>,
    /// Base URL of the enhancement service. Enhancement is off when unset.
    pub enhancer_endpoint: Option<String>,
    /// Chat deployment name.
    pub enhancer_deployment: Option<String>,
    /// API key sent in the `api-key` header.
    pub enhancer_api_key: Option<String>,
    /// API version query parameter.
    pub enhancer_api_version: Option<String>,
    /// Request timeout in seconds.
    #[ortho_config(default = 10)]
    pub enhancer_timeout_secs: u64,
}

impl ServerSettings {
    /// Parsed bind address.
    ///
    /// # Errors
    /// Returns [`SettingsError::BindAddr`] when the value is not a socket
    /// address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err: std::net::AddrParseError| SettingsError::BindAddr {
            value: raw.to_owned(),
            message: err.to_string(),
        })
    }

    /// Selected store, `memory` unless configured otherwise.
    ///
    /// # Errors
    /// Returns [`SettingsError::Store`] for unknown names.
    pub fn store(&self) -> Result<StoreKind, SettingsError> {
        match self.store.as_deref().map(str::trim) {
            None => Ok(StoreKind::Memory),
            Some(name) if name.eq_ignore_ascii_case("memory") => Ok(StoreKind::Memory),
            Some(name) if name.eq_ignore_ascii_case("postgres") => Ok(StoreKind::Postgres),
            Some(name) => Err(SettingsError::Store {
                value: name.to_owned(),
            }),
        }
    }

    /// Database URL for the `postgres` store.
    ///
    /// # Errors
    /// Returns [`SettingsError::MissingDatabaseUrl`] when unset.
    pub fn database_url(&self) -> Result<&str, SettingsError> {
        self.database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)
    }

    pub const fn enhancer_timeout(&self) -> Duration {
        Duration::from_secs(self.enhancer_timeout_secs)
    }

    /// Enhancer configuration, or `None` when no endpoint is set.
    ///
    /// # Errors
    /// Fails when an endpoint is set but cannot be parsed, or when the
    /// deployment or API key is missing.
    pub fn enhancer(&self) -> Result<Option<OpenAiEnhancerConfig>, SettingsError> {
        let Some(raw) = self
            .enhancer_endpoint
            .as_deref()
            .filter(|value| !value.trim().is_empty())
        else {
            return Ok(None);
        };
        let endpoint = Url::parse(raw).map_err(|err| SettingsError::EnhancerEndpoint {
            value: raw.to_owned(),
            message: err.to_string(),
        })?;
        let deployment = self
            .enhancer_deployment
            .clone()
            .ok_or(SettingsError::MissingEnhancerField {
                field: "PETCLINIC_ENHANCER_DEPLOYMENT",
            })?;
        let api_key = self
            .enhancer_api_key
            .clone()
            .ok_or(SettingsError::MissingEnhancerField {
                field: "PETCLINIC_ENHANCER_API_KEY",
            })?;
        Ok(Some(OpenAiEnhancerConfig {
            endpoint,
            deployment,
            api_key,
            api_version: self
                .enhancer_api_version
                .clone()
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_owned()),
            timeout: self.enhancer_timeout(),
        }))
    }
}
