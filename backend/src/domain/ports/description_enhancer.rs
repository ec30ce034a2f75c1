//! Port for enriching pet descriptions through an external service.

use async_trait::async_trait;

use crate::domain::PetType;

use super::define_port_error;

define_port_error! {
    /// Failures raised by description enhancer adapters.
    pub enum DescriptionEnhancerError {
        /// The request could not be sent or the connection dropped.
        Transport { message: String } => "description enhancer transport failed: {message}",
        /// The service answered with a non-success status.
        Status { status: u16 } => "description enhancer returned status {status}",
        /// The response body could not be understood or held no text.
        Decode { message: String } => "description enhancer response was invalid: {message}",
        /// The service did not answer in time.
        Timeout { message: String } => "description enhancer timed out: {message}",
    }
}

/// Rewrites a free-text pet description.
///
/// Callers treat every error as recoverable and keep the original text.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PetDescriptionEnhancer: Send + Sync {
    /// Return an enhanced description for a pet of the given type and breed.
    async fn enhance(
        &self,
        pet_type: PetType,
        breed: &str,
        description: &str,
    ) -> Result<String, DescriptionEnhancerError>;
}

/// Enhancer that returns the description unchanged.
///
/// Used when no enhancement endpoint is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassthroughDescriptionEnhancer;

#[async_trait]
impl PetDescriptionEnhancer for PassthroughDescriptionEnhancer {
    async fn enhance(
        &self,
        _pet_type: PetType,
        _breed: &str,
        description: &str,
    ) -> Result<String, DescriptionEnhancerError> {
        Ok(description.to_owned())
    }
}
