#![warn(clippy::pedantic)]
// -----------------------------------------------------------------------------
// Documentation: error conditions are described on the error enums
// -----------------------------------------------------------------------------
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
// -----------------------------------------------------------------------------
// API Design Choices
// -----------------------------------------------------------------------------
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # OpenShift
//!
//! Client-side reconciliation of OpenShift workload resources.
//!
//! ## Key Components
//!
//! - **Resources**: wire documents for deployment configs, routes, image streams,
//!   image stream tags, projects, role bindings, build configs and OAuth tokens
//! - **Client**: the [`ResourceClient`] seam, with a live ([`KubeClient`]) and an
//!   in-process ([`MemoryClient`]) implementation
//! - **Deployment**: [`DeploymentConfigs`], which creates, replaces and rolls out
//!   deployment configs from a [`DeploymentRequest`]
//! - **Supporting kinds**: [`Routes`], [`ImageStreams`], [`ImageStreamTags`],
//!   [`Projects`], [`RoleBindings`], [`BuildConfigs`] and [`OAuthAccessTokens`]
//! - **Config**: environment-driven connection settings and client wiring

pub mod build_configs;
pub mod client;
pub mod config;
pub mod deployment;
pub mod error;
pub mod image_stream_tags;
pub mod image_streams;
pub mod oauth_access_tokens;
pub mod projects;
pub mod resources;
pub mod role_bindings;
pub mod routes;

pub use build_configs::{BuildConfigs, GitBuild};
pub use client::{Applied, DeploymentConfigClient, KubeClient, MemoryClient, ResourceClient};
pub use config::{ClusterConfig, OpenShift, RestConfig};
pub use deployment::{
    build_deployment_config, DeploymentConfigs, DeploymentRequest, EnvEntry, NodeSelector,
    PortEntry, Protocol, ReconcileOutcome, RolloutFailurePolicy,
};
pub use error::{ClientError, ConfigError, DeployError, WriteVerb};
pub use image_stream_tags::ImageStreamTags;
pub use image_streams::ImageStreams;
pub use oauth_access_tokens::OAuthAccessTokens;
pub use projects::Projects;
pub use resources::{
    BuildConfig, DeploymentConfig, ImageStream, ImageStreamTag, OAuthAccessToken, Project,
    RoleBinding, RolloutRequest, Route,
};
pub use role_bindings::RoleBindings;
pub use routes::Routes;
