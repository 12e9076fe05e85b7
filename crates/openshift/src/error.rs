//! Error types for remote resource access and deployment reconciliation.

use std::fmt;
use thiserror::Error;

/// Errors returned by a [`ResourceClient`](crate::client::ResourceClient).
#[derive(Debug, Error)]
pub enum ClientError {
    /// The resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The write was rejected because the resource changed since it was read.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The API server rejected the request.
    #[error("API error {code} ({reason}): {message}")]
    Api {
        code: u16,
        reason: String,
        message: String,
    },

    /// Transport or client-side failure.
    #[error("Kubernetes client error: {0}")]
    Kube(#[source] kube::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}

impl From<kube::Error> for ClientError {
    fn from(err: kube::Error) -> Self {
        match err {
            kube::Error::Api(ae) if ae.code == 404 => Self::NotFound(ae.message),
            kube::Error::Api(ae) if ae.code == 409 => Self::Conflict(ae.message),
            kube::Error::Api(ae) => Self::Api {
                code: ae.code,
                reason: ae.reason,
                message: ae.message,
            },
            other => Self::Kube(other),
        }
    }
}

/// Write verb that failed during reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteVerb {
    Create,
    Update,
}

impl fmt::Display for WriteVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => write!(f, "create"),
            Self::Update => write!(f, "update"),
        }
    }
}

/// Errors returned by [`DeploymentConfigs::create`](crate::DeploymentConfigs::create).
#[derive(Debug, Error)]
pub enum DeployError {
    /// The request failed validation; nothing was sent to the API server.
    #[error("invalid deployment request: {0}")]
    InvalidRequest(String),

    /// Looking up the current state failed for a reason other than absence.
    #[error("failed to reconcile DeploymentConfig {namespace}/{name}: {source}")]
    ReconciliationFailed {
        namespace: String,
        name: String,
        #[source]
        source: ClientError,
    },

    /// The create or update call was rejected.
    #[error("failed to {verb} DeploymentConfig {namespace}/{name}: {source}")]
    WriteFailed {
        verb: WriteVerb,
        namespace: String,
        name: String,
        #[source]
        source: ClientError,
    },

    /// The update succeeded but the follow-up rollout could not be started.
    #[error("DeploymentConfig {namespace}/{name} was updated but the rollout was not triggered: {source}")]
    RolloutTriggerFailed {
        namespace: String,
        name: String,
        #[source]
        source: ClientError,
    },
}

impl DeployError {
    /// The underlying client error, if the failure came from the API server.
    pub fn client_error(&self) -> Option<&ClientError> {
        match self {
            Self::InvalidRequest(_) => None,
            Self::ReconciliationFailed { source, .. }
            | Self::WriteFailed { source, .. }
            | Self::RolloutTriggerFailed { source, .. } => Some(source),
        }
    }
}

/// Errors raised while building an authenticated session.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to infer cluster configuration: {0}")]
    Infer(#[from] kube::config::InferConfigError),

    #[error("failed to load kubeconfig: {0}")]
    Kubeconfig(#[from] kube::config::KubeconfigError),

    #[error("failed to build Kubernetes client: {0}")]
    Client(#[from] kube::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use kube::error::ErrorResponse;

    fn api_error(code: u16) -> kube::Error {
        kube::Error::Api(ErrorResponse {
            status: "Failure".to_string(),
            message: format!("status {code}"),
            reason: "Test".to_string(),
            code,
        })
    }

    #[test]
    fn test_not_found_mapping() {
        let err = ClientError::from(api_error(404));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_conflict_mapping() {
        let err = ClientError::from(api_error(409));
        assert!(err.is_conflict());
    }

    #[test]
    fn test_other_api_errors_keep_code() {
        match ClientError::from(api_error(403)) {
            ClientError::Api { code, reason, .. } => {
                assert_eq!(code, 403);
                assert_eq!(reason, "Test");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_deploy_error_message_names_resource() {
        let err = DeployError::WriteFailed {
            verb: WriteVerb::Update,
            namespace: "demo-dev".to_string(),
            name: "hello-world".to_string(),
            source: ClientError::Conflict("stale".to_string()),
        };
        let message = err.to_string();
        assert!(message.contains("update"));
        assert!(message.contains("demo-dev/hello-world"));
        assert!(err.client_error().is_some_and(ClientError::is_conflict));
    }
}
