//! Domain error types.

use thiserror::Error;
use uuid::Uuid;

/// Errors reported by the external generation and narration gateways.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// A credential or setting required by the gateway is missing.
    #[error("gateway configuration error: {0}")]
    Configuration(String),

    /// The request could not be sent or the response could not be read.
    #[error("gateway network error: {0}")]
    Network(String),

    /// The gateway answered with a non-success status.
    #[error("gateway returned status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated.
        body: String,
    },

    /// The gateway answered with a payload of the wrong shape.
    #[error("gateway format error: {0}")]
    Format(String),
}

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// No catalog entity has the given slug.
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    /// No mounted tour or route session has the given identifier.
    #[error("session not found: {0}")]
    SessionNotFound(Uuid),

    /// A validation error in domain logic.
    #[error("validation error: {0}")]
    Validation(String),

    /// An external gateway call failed.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
