//! Domain model for the pet clinic.
//!
//! Purpose: define self-validating value objects, the entities built from
//! them, the ports adapters implement, and the services driving the use
//! cases. Nothing here depends on HTTP or storage details.
//!
//! Public surface:
//! - [`value_object`]: the validation pipeline every value type runs.
//! - [`PetIdentifier`]: the checksummed 16-digit business key of a pet.
//! - [`Owner`], [`Pet`], [`Visit`]: immutable entities.
//! - [`Error`] and [`ErrorCode`]: transport-agnostic failures.

pub mod contact;
pub mod error;
pub mod gender;
pub mod ids;
pub mod names;
pub mod owner;
pub mod pet;
pub mod pet_identifier;
pub mod pet_type;
pub mod ports;
pub mod trace_id;
pub mod value_object;
pub mod visit;

mod clinic_query_service;
mod registration_service;
mod service_errors;

pub use self::clinic_query_service::ClinicQueryService;
pub use self::contact::{EmailAddress, TelephoneNumber};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::gender::{Gender, GenderError};
pub use self::ids::{OwnerId, PetId, VisitId};
pub use self::names::{AddressLine, Breed, PersonName, PetName};
pub use self::owner::{Owner, OwnerDraft};
pub use self::pet::{Pet, PetDraft, PetProfile};
pub use self::pet_identifier::{PetIdentifier, PetIdentifierGenerationError, UniqueNumber};
pub use self::pet_type::{PetType, PetTypeError};
pub use self::registration_service::RegistrationService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::visit::Visit;
