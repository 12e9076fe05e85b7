//! Deployment config reconciliation.
//!
//! [`DeploymentConfigs::create`] performs get-then-create-or-update against a
//! [`DeploymentConfigClient`](crate::client::DeploymentConfigClient) and, after
//! a forced update, requests a rollout of the new template.

mod reconciler;
mod request;

pub use reconciler::{
    build_deployment_config, DeploymentConfigs, ReconcileOutcome, RolloutFailurePolicy,
};
pub use request::{DeploymentRequest, EnvEntry, NodeSelector, PortEntry, Protocol};
