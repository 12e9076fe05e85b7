//! Error types for SCM provider selection and API access.

use thiserror::Error;

use crate::registry::ScmKind;

/// Errors returned by the SCM factory and capability services.
#[derive(Error, Debug)]
pub enum ScmError {
    /// The provider code is known but no backend is wired for it.
    #[error("SCM of type {code} ({kind}) not implemented")]
    ProviderNotImplemented { code: i32, kind: ScmKind },

    /// The provider code is outside the known set.
    #[error("SCM of type {0} not recognized")]
    ProviderNotRecognized(i32),

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Resource not found.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Token missing, expired or lacking scope.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Response content could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ScmError {
    /// Whether this error comes from provider selection rather than an API call.
    pub fn is_provider_error(&self) -> bool {
        matches!(
            self,
            Self::ProviderNotImplemented { .. } | Self::ProviderNotRecognized(_)
        )
    }
}
