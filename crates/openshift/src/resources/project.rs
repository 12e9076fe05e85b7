//! `Project` document (`project.openshift.io/v1`), cluster scoped.

use std::collections::BTreeMap;

use kube::CustomResource;
use serde::{Deserialize, Serialize};

pub const DISPLAY_NAME_ANNOTATION: &str = "openshift.io/display-name";
pub const DESCRIPTION_ANNOTATION: &str = "openshift.io/description";

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default)]
#[kube(
    group = "project.openshift.io",
    version = "v1",
    kind = "Project",
    plural = "projects",
    schema = "disabled"
)]
#[kube(status = "ProjectStatus")]
pub struct ProjectSpec {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub finalizers: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct ProjectStatus {
    /// `Active` or `Terminating`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
}

impl Project {
    /// A project carrying the display name and description annotations the
    /// web console shows. Empty values are omitted.
    pub fn described(name: &str, display_name: &str, description: &str) -> Self {
        let annotations: BTreeMap<String, String> = [
            (DISPLAY_NAME_ANNOTATION, display_name),
            (DESCRIPTION_ANNOTATION, description),
        ]
        .into_iter()
        .filter(|(_, v)| !v.is_empty())
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let mut project = Self::new(name, ProjectSpec::default());
        if !annotations.is_empty() {
            project.metadata.annotations = Some(annotations);
        }
        project
    }

    pub fn display_name(&self) -> Option<&str> {
        self.metadata
            .annotations
            .as_ref()
            .and_then(|a| a.get(DISPLAY_NAME_ANNOTATION))
            .map(String::as_str)
    }

    pub fn phase(&self) -> Option<&str> {
        self.status.as_ref().and_then(|s| s.phase.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::ClusterResourceScope;
    use kube::Resource;

    fn assert_cluster_scoped<K: Resource<Scope = ClusterResourceScope>>() {}

    #[test]
    fn test_project_is_cluster_scoped() {
        assert_cluster_scoped::<Project>();
        assert_eq!(Project::api_version(&()), "project.openshift.io/v1");
    }

    #[test]
    fn test_described_skips_empty_annotations() {
        let project = Project::described("demo-dev", "Demo (dev)", "");
        assert_eq!(project.display_name(), Some("Demo (dev)"));
        let annotations = project.metadata.annotations.unwrap();
        assert!(!annotations.contains_key(DESCRIPTION_ANNOTATION));

        let bare = Project::described("demo-dev", "", "");
        assert!(bare.metadata.annotations.is_none());
    }
}
