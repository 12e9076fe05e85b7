//! Caller-facing description of a desired deployment.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use k8s_openapi::api::core::v1::{ContainerPort, EnvVar};
use serde::{Deserialize, Serialize};

use crate::error::DeployError;

/// Environment variable passed to the container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvEntry {
    pub name: String,
    #[serde(default)]
    pub value: String,
}

impl EnvEntry {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl From<&EnvEntry> for EnvVar {
    fn from(entry: &EnvEntry) -> Self {
        EnvVar {
            name: entry.name.clone(),
            value: Some(entry.value.clone()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Protocol {
    #[default]
    Tcp,
    Udp,
    Sctp,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tcp => write!(f, "TCP"),
            Self::Udp => write!(f, "UDP"),
            Self::Sctp => write!(f, "SCTP"),
        }
    }
}

/// Port exposed by the container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortEntry {
    #[serde(default)]
    pub name: String,
    pub container_port: i32,
    #[serde(default)]
    pub protocol: Protocol,
}

impl PortEntry {
    pub fn tcp(name: impl Into<String>, container_port: i32) -> Self {
        Self {
            name: name.into(),
            container_port,
            protocol: Protocol::Tcp,
        }
    }
}

impl From<&PortEntry> for ContainerPort {
    fn from(entry: &PortEntry) -> Self {
        ContainerPort {
            name: (!entry.name.is_empty()).then(|| entry.name.clone()),
            container_port: entry.container_port,
            protocol: Some(entry.protocol.to_string()),
            ..Default::default()
        }
    }
}

/// Single `key=value` node constraint, as accepted on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSelector {
    pub key: String,
    pub value: String,
}

impl FromStr for NodeSelector {
    type Err = DeployError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DeployError::InvalidRequest(format!("node selector '{s}' is not key=value"));
        let (key, value) = s.split_once('=').ok_or_else(invalid)?;
        let key = key.trim();
        if key.is_empty() || value.contains('=') {
            return Err(invalid());
        }
        Ok(Self {
            key: key.to_string(),
            value: value.trim().to_string(),
        })
    }
}

/// Desired state of one deployment config.
///
/// The remote document is rebuilt from this request on every reconcile; only
/// the resource version is carried over from the existing object.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentRequest {
    /// Application name; names the container, the pod template and the image stream.
    pub name: String,
    /// Target namespace. May be left out of a request file and supplied by
    /// [`DeploymentRequest::or_namespace`].
    #[serde(default)]
    pub namespace: String,
    /// Versioned identity of the deployment config within the namespace.
    pub full_name: String,
    #[serde(default)]
    pub version: String,
    /// Image stream tag the image-change trigger follows.
    pub tag: String,
    #[serde(default)]
    pub env: Vec<EnvEntry>,
    #[serde(default)]
    pub ports: Vec<PortEntry>,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    #[serde(default)]
    pub replicas: i32,
    /// Replace an existing deployment config and roll it out. Without it an
    /// existing config is left untouched.
    #[serde(default)]
    pub force: bool,
    #[serde(default)]
    pub health_end_point: String,
    #[serde(default)]
    pub node_selector: BTreeMap<String, String>,
}

impl DeploymentRequest {
    /// Add a node constraint given in `key=value` form.
    pub fn with_node_selector(mut self, selector: &str) -> Result<Self, DeployError> {
        let NodeSelector { key, value } = selector.parse()?;
        self.node_selector.insert(key, value);
        Ok(self)
    }

    /// Use `namespace` when the request names none.
    #[must_use]
    pub fn or_namespace(mut self, namespace: &str) -> Self {
        if self.namespace.trim().is_empty() {
            self.namespace = namespace.to_string();
        }
        self
    }

    /// `<name>:<tag>`, the image stream tag the trigger watches.
    pub fn image_stream_tag(&self) -> String {
        format!("{}:{}", self.name, self.tag)
    }

    pub fn validate(&self) -> Result<(), DeployError> {
        let required = [
            ("name", &self.name),
            ("namespace", &self.namespace),
            ("fullName", &self.full_name),
            ("tag", &self.tag),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(DeployError::InvalidRequest(format!("{field} is required")));
            }
        }
        if self.replicas < 0 {
            return Err(DeployError::InvalidRequest(format!(
                "replicas must not be negative, got {}",
                self.replicas
            )));
        }
        if self.node_selector.keys().any(|k| k.trim().is_empty()) {
            return Err(DeployError::InvalidRequest(
                "node selector keys must not be empty".to_string(),
            ));
        }
        if let Some(port) = self
            .ports
            .iter()
            .find(|p| !(1..=65535).contains(&p.container_port))
        {
            return Err(DeployError::InvalidRequest(format!(
                "container port {} is out of range",
                port.container_port
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> DeploymentRequest {
        DeploymentRequest {
            name: "hello".to_string(),
            namespace: "demo-dev".to_string(),
            full_name: "hello-world".to_string(),
            tag: "v1".to_string(),
            replicas: 1,
            ..Default::default()
        }
    }

    #[test]
    fn test_node_selector_parse() {
        let selector: NodeSelector = "region=infra".parse().unwrap();
        assert_eq!(selector.key, "region");
        assert_eq!(selector.value, "infra");
    }

    #[test]
    fn test_node_selector_rejects_malformed() {
        for input in ["region", "=infra", "a=b=c", ""] {
            let err = input.parse::<NodeSelector>().unwrap_err();
            assert!(matches!(err, DeployError::InvalidRequest(_)), "{input}");
        }
    }

    #[test]
    fn test_with_node_selector() {
        let request = request().with_node_selector("zone=a").unwrap();
        assert_eq!(request.node_selector.get("zone").map(String::as_str), Some("a"));
    }

    #[test]
    fn test_validate_requires_identity() {
        assert!(request().validate().is_ok());

        let mut missing = request();
        missing.full_name.clear();
        assert!(matches!(
            missing.validate(),
            Err(DeployError::InvalidRequest(msg)) if msg.contains("fullName")
        ));
    }

    #[test]
    fn test_validate_rejects_negative_replicas_and_bad_ports() {
        let mut negative = request();
        negative.replicas = -1;
        assert!(negative.validate().is_err());

        let mut bad_port = request();
        bad_port.ports.push(PortEntry::tcp("http", 70000));
        assert!(bad_port.validate().is_err());
    }

    #[test]
    fn test_port_projection() {
        let port = ContainerPort::from(&PortEntry::tcp("http", 8080));
        assert_eq!(port.container_port, 8080);
        assert_eq!(port.name.as_deref(), Some("http"));
        assert_eq!(port.protocol.as_deref(), Some("TCP"));

        let unnamed = ContainerPort::from(&PortEntry::tcp("", 9090));
        assert!(unnamed.name.is_none());
    }

    #[test]
    fn test_request_from_yaml() {
        let yaml = r"
name: hello
namespace: demo-dev
fullName: hello-world
tag: v1
replicas: 2
env:
  - name: PROFILE
    value: dev
ports:
  - name: http
    containerPort: 8080
nodeSelector:
  region: infra
";
        let request: DeploymentRequest = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(request.replicas, 2);
        assert_eq!(request.env, vec![EnvEntry::new("PROFILE", "dev")]);
        assert_eq!(request.ports[0].protocol, Protocol::Tcp);
        assert!(!request.force);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_request_without_namespace_takes_fallback() {
        let yaml = "name: hello\nfullName: hello-world\ntag: v1\n";
        let request: DeploymentRequest = serde_yaml::from_str(yaml).unwrap();
        assert!(request.namespace.is_empty());
        assert!(matches!(
            request.validate(),
            Err(DeployError::InvalidRequest(msg)) if msg.contains("namespace")
        ));

        let request = request.or_namespace("demo-dev");
        assert_eq!(request.namespace, "demo-dev");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_explicit_namespace_wins_over_fallback() {
        let request = request().or_namespace("other");
        assert_eq!(request.namespace, "demo-dev");
    }

    #[test]
    fn test_node_selectors_layered_over_file_map() {
        let yaml = "name: hello\nfullName: hello-world\ntag: v1\nnodeSelector:\n  region: infra\n";
        let request: DeploymentRequest = serde_yaml::from_str(yaml).unwrap();

        let request = ["zone=a", "region=apps"]
            .iter()
            .try_fold(request, |r, s| r.with_node_selector(s))
            .unwrap();
        assert_eq!(request.node_selector.len(), 2);
        assert_eq!(request.node_selector["region"], "apps");
        assert_eq!(request.node_selector["zone"], "a");

        let err = request.with_node_selector("zone").unwrap_err();
        assert!(matches!(err, DeployError::InvalidRequest(_)));
    }
}
