//! OpenShift resource documents as exchanged with the API server.

pub mod build_config;
pub mod deployment_config;
pub mod image_stream;
pub mod image_stream_tag;
pub mod oauth_access_token;
pub mod project;
pub mod route;

pub use build_config::{
    BuildConfig, BuildConfigSpec, BuildConfigStatus, BuildOutput, BuildSource, BuildStrategy,
    BuildTriggerPolicy, GitBuildSource, SourceBuildStrategy,
};
pub use deployment_config::{
    DeploymentConfig, DeploymentConfigSpec, DeploymentConfigStatus, DeploymentStrategy,
    DeploymentTriggerPolicy, ImageChangeParams, RolloutRequest,
};
pub use image_stream::{ImageLookupPolicy, ImageStream, ImageStreamSpec, ImageStreamStatus};
pub use image_stream_tag::{ImageStreamTag, TagImage, TagReference};
pub use k8s_openapi::api::rbac::v1::{RoleBinding, RoleRef, Subject};
pub use oauth_access_token::OAuthAccessToken;
pub use project::{Project, ProjectSpec, ProjectStatus};
pub use route::{Route, RoutePort, RouteSpec, RouteStatus, RouteTargetReference};
