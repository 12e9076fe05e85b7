//! Cluster connection settings and client wiring.

use std::env;

use kube::config::KubeConfigOptions;
use kube::Client;
use tracing::{debug, info};

use crate::build_configs::BuildConfigs;
use crate::client::KubeClient;
use crate::deployment::{DeploymentConfigs, RolloutFailurePolicy};
use crate::error::ConfigError;
use crate::image_stream_tags::ImageStreamTags;
use crate::image_streams::ImageStreams;
use crate::oauth_access_tokens::OAuthAccessTokens;
use crate::projects::Projects;
use crate::role_bindings::RoleBindings;
use crate::routes::Routes;

/// Connection settings, read from the environment by default.
#[derive(Debug, Clone)]
pub struct ClusterConfig {
    /// Namespace used when a command does not name one.
    pub namespace: String,
    /// Kubeconfig context; in-cluster or default context inference when unset.
    pub context: Option<String>,
    /// Whether a failed rollout after a forced update fails the reconcile.
    pub rollout_policy: RolloutFailurePolicy,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            namespace: env::var("OPENSHIFT_NAMESPACE").unwrap_or_else(|_| "default".to_string()),
            context: env::var("KUBE_CONTEXT").ok().filter(|s| !s.is_empty()),
            rollout_policy: match env::var("OPENSHIFT_ROLLOUT_FAILURE").as_deref() {
                Ok("warn") => RolloutFailurePolicy::Warn,
                _ => RolloutFailurePolicy::Fail,
            },
        }
    }
}

/// Authenticated session descriptor handed to client constructors.
#[derive(Clone)]
pub struct RestConfig {
    config: kube::Config,
}

impl RestConfig {
    /// Resolve credentials for `cluster`: the named kubeconfig context if one
    /// is set, otherwise the in-cluster service account or default context.
    pub async fn infer(cluster: &ClusterConfig) -> Result<Self, ConfigError> {
        let config = match &cluster.context {
            Some(context) => {
                debug!(context = %context, "Loading kubeconfig context");
                let options = KubeConfigOptions {
                    context: Some(context.clone()),
                    ..Default::default()
                };
                kube::Config::from_kubeconfig(&options).await?
            }
            None => kube::Config::infer().await?,
        };
        Ok(Self::from_config(config))
    }

    pub fn from_config(config: kube::Config) -> Self {
        Self { config }
    }

    pub fn client(&self) -> Result<Client, ConfigError> {
        Ok(Client::try_from(self.config.clone())?)
    }
}

/// Reconcilers for every supported resource kind, sharing one session.
pub struct OpenShift {
    pub deployment_configs: DeploymentConfigs<KubeClient>,
    pub routes: Routes<KubeClient>,
    pub image_streams: ImageStreams<KubeClient>,
    pub image_stream_tags: ImageStreamTags<KubeClient>,
    pub projects: Projects<KubeClient>,
    pub role_bindings: RoleBindings<KubeClient>,
    pub build_configs: BuildConfigs<KubeClient>,
    pub oauth_access_tokens: OAuthAccessTokens<KubeClient>,
}

impl OpenShift {
    pub fn from_rest_config(rest: &RestConfig, cluster: &ClusterConfig) -> Result<Self, ConfigError> {
        let client = KubeClient::new(rest.client()?);
        info!(namespace = %cluster.namespace, "Connected to cluster");
        Ok(Self {
            deployment_configs: DeploymentConfigs::new(client.clone())
                .with_rollout_policy(cluster.rollout_policy),
            routes: Routes::new(client.clone()),
            image_streams: ImageStreams::new(client.clone()),
            image_stream_tags: ImageStreamTags::new(client.clone()),
            projects: Projects::new(client.clone()),
            role_bindings: RoleBindings::new(client.clone()),
            build_configs: BuildConfigs::new(client.clone()),
            oauth_access_tokens: OAuthAccessTokens::new(client),
        })
    }
}
