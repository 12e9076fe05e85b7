use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::{
    Container, ContainerPort, EnvVar, ExecAction, ObjectReference, PodSpec, PodTemplateSpec,
    Probe,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use tracing::{debug, error, info, warn};

use super::request::DeploymentRequest;
use crate::client::DeploymentConfigClient;
use crate::error::{ClientError, DeployError, WriteVerb};
use crate::resources::deployment_config::{STRATEGY_ROLLING, TRIGGER_IMAGE_CHANGE};
use crate::resources::{
    DeploymentConfig, DeploymentConfigSpec, DeploymentStrategy, DeploymentTriggerPolicy,
    ImageChangeParams, RolloutRequest,
};

const PROBE_INITIAL_DELAY_SECONDS: i32 = 60;
const PROBE_TIMEOUT_SECONDS: i32 = 10;
const PROBE_PERIOD_SECONDS: i32 = 60;

/// Resolved by the image-change trigger on the first rollout.
const PLACEHOLDER_IMAGE: &str = " ";

/// Result of a successful [`DeploymentConfigs::create`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// No config existed; one was created.
    Created,
    /// The existing config was replaced and a rollout requested.
    Updated,
    /// A config existed and `force` was not set. Nothing was compared or written.
    Unchanged,
}

/// What to report when a forced update succeeds but the rollout request fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RolloutFailurePolicy {
    /// Fail the call with [`DeployError::RolloutTriggerFailed`].
    #[default]
    Fail,
    /// Log the failure and report [`ReconcileOutcome::Updated`].
    Warn,
}

/// Reconciles deployment configs through a [`DeploymentConfigClient`].
pub struct DeploymentConfigs<C> {
    client: C,
    rollout_policy: RolloutFailurePolicy,
}

impl<C: DeploymentConfigClient> DeploymentConfigs<C> {
    pub fn new(client: C) -> Self {
        debug!("creating DeploymentConfigs reconciler");
        Self {
            client,
            rollout_policy: RolloutFailurePolicy::default(),
        }
    }

    #[must_use]
    pub fn with_rollout_policy(mut self, policy: RolloutFailurePolicy) -> Self {
        self.rollout_policy = policy;
        self
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Bring the deployment config named by `request.full_name` to the
    /// requested state.
    ///
    /// - absent: created from the request.
    /// - present and `force`: replaced (carrying the existing resource
    ///   version) and then rolled out.
    /// - present without `force`: left as is, reported as
    ///   [`ReconcileOutcome::Unchanged`].
    ///
    /// No retries are attempted; a conflicting concurrent write surfaces as
    /// [`DeployError::WriteFailed`].
    pub async fn create(&self, request: &DeploymentRequest) -> Result<ReconcileOutcome, DeployError> {
        request.validate()?;
        let namespace = request.namespace.as_str();
        let full_name = request.full_name.as_str();
        debug!(namespace = %namespace, name = %full_name, force = request.force, "DeploymentConfigs::create");

        let mut desired = build_deployment_config(request);

        match self.client.get(namespace, full_name).await {
            Ok(existing) => {
                if !request.force {
                    debug!(namespace = %namespace, name = %full_name, "DeploymentConfig exists and force is not set, leaving it unchanged");
                    return Ok(ReconcileOutcome::Unchanged);
                }

                desired.metadata.resource_version = existing.metadata.resource_version;
                let updated = self.client.update(namespace, &desired).await.map_err(|source| {
                    DeployError::WriteFailed {
                        verb: WriteVerb::Update,
                        namespace: namespace.to_string(),
                        name: full_name.to_string(),
                        source,
                    }
                })?;
                info!(namespace = %namespace, name = %updated.metadata.name.as_deref().unwrap_or(full_name), "Updated DeploymentConfig");

                match self.instantiate(&request.name, namespace, full_name).await {
                    Ok(_) => Ok(ReconcileOutcome::Updated),
                    Err(source) => {
                        error!(namespace = %namespace, name = %full_name, error = %source, "Failed to trigger rollout");
                        match self.rollout_policy {
                            RolloutFailurePolicy::Fail => Err(DeployError::RolloutTriggerFailed {
                                namespace: namespace.to_string(),
                                name: full_name.to_string(),
                                source,
                            }),
                            RolloutFailurePolicy::Warn => {
                                warn!(namespace = %namespace, name = %full_name, "Rollout not triggered, reporting update as successful");
                                Ok(ReconcileOutcome::Updated)
                            }
                        }
                    }
                }
            }
            Err(ClientError::NotFound(_)) => {
                self.client
                    .create(namespace, &desired)
                    .await
                    .map_err(|source| DeployError::WriteFailed {
                        verb: WriteVerb::Create,
                        namespace: namespace.to_string(),
                        name: full_name.to_string(),
                        source,
                    })?;
                info!(namespace = %namespace, name = %request.name, "Created DeploymentConfig");
                Ok(ReconcileOutcome::Created)
            }
            Err(source) => Err(DeployError::ReconciliationFailed {
                namespace: namespace.to_string(),
                name: full_name.to_string(),
                source,
            }),
        }
    }

    pub async fn get(&self, namespace: &str, full_name: &str) -> Result<DeploymentConfig, ClientError> {
        debug!(namespace = %namespace, name = %full_name, "DeploymentConfigs::get");
        self.client.get(namespace, full_name).await
    }

    pub async fn delete(&self, namespace: &str, full_name: &str) -> Result<(), ClientError> {
        debug!(namespace = %namespace, name = %full_name, "DeploymentConfigs::delete");
        self.client.delete(namespace, full_name).await
    }

    /// Request an immediate rollout of `full_name` from the latest trigger
    /// inputs. `name` is the application name, used for logging only.
    pub async fn instantiate(
        &self,
        name: &str,
        namespace: &str,
        full_name: &str,
    ) -> Result<DeploymentConfig, ClientError> {
        debug!(namespace = %namespace, name = %full_name, "DeploymentConfigs::instantiate");
        let request = RolloutRequest::latest(full_name);
        let config = self.client.instantiate(namespace, full_name, &request).await?;
        info!(namespace = %namespace, app = %name, "Instantiated DeploymentConfig");
        Ok(config)
    }
}

fn health_probe(end_point: &str) -> Probe {
    Probe {
        exec: Some(ExecAction {
            command: Some(vec![
                "curl".to_string(),
                "--silent".to_string(),
                "--show-error".to_string(),
                "--fail".to_string(),
                end_point.to_string(),
            ]),
        }),
        initial_delay_seconds: Some(PROBE_INITIAL_DELAY_SECONDS),
        timeout_seconds: Some(PROBE_TIMEOUT_SECONDS),
        period_seconds: Some(PROBE_PERIOD_SECONDS),
        ..Default::default()
    }
}

/// Build the desired deployment config document for `request`.
///
/// The result carries no resource version; callers updating an existing
/// object copy it over.
pub fn build_deployment_config(request: &DeploymentRequest) -> DeploymentConfig {
    let env: Vec<EnvVar> = request.env.iter().map(EnvVar::from).collect();
    let ports: Vec<ContainerPort> = request.ports.iter().map(ContainerPort::from).collect();
    let labels = request.labels.clone();

    let container = Container {
        name: request.name.clone(),
        image: Some(PLACEHOLDER_IMAGE.to_string()),
        image_pull_policy: Some("Always".to_string()),
        env: Some(env),
        ports: Some(ports),
        readiness_probe: Some(health_probe(&request.health_end_point)),
        liveness_probe: Some(health_probe(&request.health_end_point)),
        ..Default::default()
    };

    let template = PodTemplateSpec {
        metadata: Some(ObjectMeta {
            name: Some(request.name.clone()),
            labels: Some(labels.clone()),
            ..Default::default()
        }),
        spec: Some(PodSpec {
            containers: vec![container],
            dns_policy: Some("ClusterFirst".to_string()),
            restart_policy: Some("Always".to_string()),
            scheduler_name: Some("default-scheduler".to_string()),
            node_selector: Some(request.node_selector.clone()),
            ..Default::default()
        }),
    };

    let trigger = DeploymentTriggerPolicy {
        trigger_type: TRIGGER_IMAGE_CHANGE.to_string(),
        image_change_params: Some(ImageChangeParams {
            automatic: true,
            container_names: vec![request.name.clone()],
            from: ObjectReference {
                kind: Some("ImageStreamTag".to_string()),
                name: Some(request.image_stream_tag()),
                namespace: Some(request.namespace.clone()),
                ..Default::default()
            },
            last_triggered_image: None,
        }),
    };

    let selector = BTreeMap::from([
        ("app".to_string(), request.name.clone()),
        ("version".to_string(), request.version.clone()),
    ]);

    let spec = DeploymentConfigSpec {
        replicas: request.replicas,
        selector: Some(selector),
        strategy: DeploymentStrategy {
            strategy_type: Some(STRATEGY_ROLLING.to_string()),
        },
        template: Some(template),
        test: false,
        triggers: vec![trigger],
    };

    let mut config = DeploymentConfig::new(&request.full_name, spec);
    config.metadata.namespace = Some(request.namespace.clone());
    config.metadata.labels = Some(labels);
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deployment::request::{EnvEntry, PortEntry};

    fn request() -> DeploymentRequest {
        DeploymentRequest {
            name: "hello".to_string(),
            namespace: "demo-dev".to_string(),
            full_name: "hello-world".to_string(),
            version: "v1".to_string(),
            tag: "v1".to_string(),
            env: vec![EnvEntry::new("PROFILE", "dev")],
            ports: vec![PortEntry::tcp("http", 8080)],
            labels: BTreeMap::from([("app".to_string(), "hello".to_string())]),
            replicas: 1,
            health_end_point: "http://localhost:8080/health".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_document_identity_and_wire_header() {
        let config = build_deployment_config(&request());
        assert_eq!(config.metadata.name.as_deref(), Some("hello-world"));
        assert_eq!(config.metadata.namespace.as_deref(), Some("demo-dev"));
        assert!(config.metadata.resource_version.is_none());

        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["apiVersion"], "apps.openshift.io/v1");
        assert_eq!(value["kind"], "DeploymentConfig");
        assert_eq!(value["spec"]["strategy"]["type"], "Rolling");
        assert_eq!(value["spec"]["selector"]["app"], "hello");
        assert_eq!(value["spec"]["selector"]["version"], "v1");
    }

    #[test]
    fn test_single_container_with_identical_probes() {
        let config = build_deployment_config(&request());
        let pod = config.spec.template.as_ref().and_then(|t| t.spec.as_ref()).unwrap();
        assert_eq!(pod.containers.len(), 1);

        let container = &pod.containers[0];
        assert_eq!(container.name, "hello");
        assert_eq!(container.image_pull_policy.as_deref(), Some("Always"));
        assert_eq!(container.readiness_probe, container.liveness_probe);

        let probe = container.readiness_probe.as_ref().unwrap();
        assert_eq!(probe.initial_delay_seconds, Some(60));
        assert_eq!(probe.timeout_seconds, Some(10));
        assert_eq!(probe.period_seconds, Some(60));
        let command = probe.exec.as_ref().and_then(|e| e.command.clone()).unwrap();
        assert_eq!(
            command,
            ["curl", "--silent", "--show-error", "--fail", "http://localhost:8080/health"]
        );
    }

    #[test]
    fn test_env_and_ports_projected() {
        let config = build_deployment_config(&request());
        let pod = config.spec.template.unwrap().spec.unwrap();
        let container = &pod.containers[0];
        let env = container.env.as_ref().unwrap();
        assert_eq!(env[0].name, "PROFILE");
        assert_eq!(env[0].value.as_deref(), Some("dev"));
        let ports = container.ports.as_ref().unwrap();
        assert_eq!(ports[0].container_port, 8080);
    }

    #[test]
    fn test_labels_applied_to_config_and_template() {
        let config = build_deployment_config(&request());
        let template_labels = config
            .spec
            .template
            .as_ref()
            .and_then(|t| t.metadata.as_ref())
            .and_then(|m| m.labels.clone());
        assert_eq!(config.metadata.labels, template_labels);
    }

    #[test]
    fn test_node_selector_empty_without_constraint() {
        let config = build_deployment_config(&request());
        let selector = config.spec.template.unwrap().spec.unwrap().node_selector.unwrap();
        assert!(selector.is_empty());

        let constrained = request().with_node_selector("region=infra").unwrap();
        let config = build_deployment_config(&constrained);
        let selector = config.spec.template.unwrap().spec.unwrap().node_selector.unwrap();
        assert_eq!(selector.get("region").map(String::as_str), Some("infra"));
    }

    #[test]
    fn test_single_image_change_trigger() {
        let config = build_deployment_config(&request());
        assert_eq!(config.spec.triggers.len(), 1);
        let trigger = &config.spec.triggers[0];
        assert_eq!(trigger.trigger_type, "ImageChange");
        let params = trigger.image_change_params.as_ref().unwrap();
        assert!(params.automatic);
        assert_eq!(params.container_names, vec!["hello".to_string()]);
        assert_eq!(params.from.kind.as_deref(), Some("ImageStreamTag"));
        assert_eq!(params.from.name.as_deref(), Some("hello:v1"));
        assert_eq!(params.from.namespace.as_deref(), Some("demo-dev"));
    }

    #[test]
    fn test_document_survives_serialization() {
        let original = request();
        let value = serde_json::to_value(build_deployment_config(&original)).unwrap();
        let parsed: DeploymentConfig = serde_json::from_value(value).unwrap();

        assert_eq!(parsed.spec.replicas, original.replicas);
        assert_eq!(parsed.metadata.labels.as_ref(), Some(&original.labels));
        assert_eq!(
            parsed.image_trigger().and_then(|r| r.name.as_deref()),
            Some("hello:v1")
        );
    }
}
