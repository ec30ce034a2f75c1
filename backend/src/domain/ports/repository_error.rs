//! Error type shared by the clinic repository ports.

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by owner, pet and visit repository adapters.
    pub enum RepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "repository query failed: {message}",
        /// A unique key, such as a pet identifier, is already taken.
        Conflict { message: String } => "repository conflict: {message}",
        /// A stored value no longer passes value-object validation.
        CorruptRecord { message: String } => "stored record is invalid: {message}",
    }
}
