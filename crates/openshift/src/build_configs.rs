//! Source-to-image build configs producing the images deployments follow.

use k8s_openapi::api::core::v1::ObjectReference;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::client::{get_or_create, ResourceClient};
use crate::error::ClientError;
use crate::resources::build_config::{SOURCE_GIT, STRATEGY_SOURCE, TRIGGER_CONFIG_CHANGE};
use crate::resources::{
    BuildConfig, BuildConfigSpec, BuildOutput, BuildSource, BuildStrategy, BuildTriggerPolicy,
    GitBuildSource, SourceBuildStrategy,
};

/// What to build and where the result goes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitBuild {
    pub name: String,
    pub git_url: String,
    /// Branch, tag or commit; the repository default when unset.
    #[serde(default)]
    pub git_ref: Option<String>,
    /// Builder image stream tag, e.g. `java:11`, in the `openshift` namespace.
    pub builder: String,
    /// Output tag on the image stream named after the build.
    pub tag: String,
}

impl GitBuild {
    fn to_build_config(&self, namespace: &str) -> BuildConfig {
        let spec = BuildConfigSpec {
            source: BuildSource {
                source_type: SOURCE_GIT.to_string(),
                git: Some(GitBuildSource {
                    uri: self.git_url.clone(),
                    reference: self.git_ref.clone(),
                }),
            },
            strategy: BuildStrategy {
                strategy_type: STRATEGY_SOURCE.to_string(),
                source_strategy: Some(SourceBuildStrategy {
                    from: ObjectReference {
                        kind: Some("ImageStreamTag".to_string()),
                        name: Some(self.builder.clone()),
                        namespace: Some("openshift".to_string()),
                        ..Default::default()
                    },
                }),
            },
            output: BuildOutput {
                to: Some(ObjectReference {
                    kind: Some("ImageStreamTag".to_string()),
                    name: Some(format!("{}:{}", self.name, self.tag)),
                    ..Default::default()
                }),
            },
            triggers: vec![BuildTriggerPolicy {
                trigger_type: TRIGGER_CONFIG_CHANGE.to_string(),
            }],
            run_policy: Some("Serial".to_string()),
        };
        let mut config = BuildConfig::new(&self.name, spec);
        config.metadata.namespace = Some(namespace.to_string());
        config
    }
}

pub struct BuildConfigs<C> {
    client: C,
}

impl<C: ResourceClient<BuildConfig>> BuildConfigs<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Ensure a build config for `build` exists; an existing one is returned
    /// unchanged.
    pub async fn create(&self, namespace: &str, build: &GitBuild) -> Result<BuildConfig, ClientError> {
        debug!(namespace = %namespace, name = %build.name, "BuildConfigs::create");
        let desired = build.to_build_config(namespace);
        let stored = get_or_create(&self.client, namespace, &desired).await?;
        info!(namespace = %namespace, name = %build.name, "BuildConfig ready");
        Ok(stored)
    }

    pub async fn get(&self, namespace: &str, name: &str) -> Result<BuildConfig, ClientError> {
        self.client.get(namespace, name).await
    }

    pub async fn delete(&self, namespace: &str, name: &str) -> Result<(), ClientError> {
        self.client.delete(namespace, name).await
    }
}
