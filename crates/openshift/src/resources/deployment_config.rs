//! `DeploymentConfig` document (`apps.openshift.io/v1`).
//!
//! Only the fields the reconciler writes or reads back are modelled. Pod
//! templates, containers and probes reuse the `k8s-openapi` core types.

use k8s_openapi::api::core::v1::{ObjectReference, PodTemplateSpec};
use kube::CustomResource;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const API_VERSION: &str = "apps.openshift.io/v1";

/// Rolling strategy type.
pub const STRATEGY_ROLLING: &str = "Rolling";

/// Trigger type fired when a referenced image stream tag changes.
pub const TRIGGER_IMAGE_CHANGE: &str = "ImageChange";

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default)]
#[kube(
    group = "apps.openshift.io",
    version = "v1",
    kind = "DeploymentConfig",
    plural = "deploymentconfigs",
    namespaced,
    schema = "disabled"
)]
#[kube(status = "DeploymentConfigStatus")]
#[serde(rename_all = "camelCase")]
pub struct DeploymentConfigSpec {
    #[serde(default)]
    pub replicas: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub strategy: DeploymentStrategy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<PodTemplateSpec>,
    #[serde(default)]
    pub test: bool,
    #[serde(default)]
    pub triggers: Vec<DeploymentTriggerPolicy>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct DeploymentStrategy {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub strategy_type: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentTriggerPolicy {
    #[serde(rename = "type")]
    pub trigger_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_change_params: Option<ImageChangeParams>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ImageChangeParams {
    #[serde(default)]
    pub automatic: bool,
    #[serde(default)]
    pub container_names: Vec<String>,
    pub from: ObjectReference,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_triggered_image: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentConfigStatus {
    #[serde(default)]
    pub latest_version: i64,
    #[serde(default)]
    pub observed_generation: i64,
    #[serde(default)]
    pub replicas: i32,
    #[serde(default)]
    pub ready_replicas: i32,
    #[serde(default)]
    pub available_replicas: i32,
}

impl DeploymentConfig {
    /// The image stream tag reference of the first image-change trigger.
    pub fn image_trigger(&self) -> Option<&ObjectReference> {
        self.spec
            .triggers
            .iter()
            .filter(|t| t.trigger_type == TRIGGER_IMAGE_CHANGE)
            .find_map(|t| t.image_change_params.as_ref())
            .map(|p| &p.from)
    }
}

/// Body of the `instantiate` subresource call.
///
/// Serialized with kind `DeploymentRequest`; `latest` re-resolves trigger
/// inputs before rolling out and `force` rolls out even if nothing changed.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RolloutRequest {
    pub api_version: String,
    pub kind: String,
    pub name: String,
    pub latest: bool,
    pub force: bool,
}

impl RolloutRequest {
    /// Deploy-now request for the named config.
    #[must_use]
    pub fn latest(name: impl Into<String>) -> Self {
        Self {
            api_version: API_VERSION.to_string(),
            kind: "DeploymentRequest".to_string(),
            name: name.into(),
            latest: true,
            force: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kube::Resource;

    #[test]
    fn test_resource_identity() {
        assert_eq!(DeploymentConfig::api_version(&()), API_VERSION);
        assert_eq!(DeploymentConfig::kind(&()), "DeploymentConfig");
        assert_eq!(DeploymentConfig::plural(&()), "deploymentconfigs");
    }

    #[test]
    fn test_rollout_request_wire_shape() {
        let value = serde_json::to_value(RolloutRequest::latest("hello-world")).unwrap();
        assert_eq!(value["kind"], "DeploymentRequest");
        assert_eq!(value["apiVersion"], "apps.openshift.io/v1");
        assert_eq!(value["name"], "hello-world");
        assert_eq!(value["latest"], true);
        assert_eq!(value["force"], true);
    }

    #[test]
    fn test_status_tolerates_missing_fields() {
        let status: DeploymentConfigStatus =
            serde_json::from_value(serde_json::json!({ "latestVersion": 3 })).unwrap();
        assert_eq!(status.latest_version, 3);
        assert_eq!(status.replicas, 0);
    }
}
