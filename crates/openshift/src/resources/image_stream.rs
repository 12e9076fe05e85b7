//! `ImageStream` document (`image.openshift.io/v1`).

use kube::CustomResource;
use serde::{Deserialize, Serialize};

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default)]
#[kube(
    group = "image.openshift.io",
    version = "v1",
    kind = "ImageStream",
    plural = "imagestreams",
    namespaced,
    schema = "disabled"
)]
#[kube(status = "ImageStreamStatus")]
#[serde(rename_all = "camelCase")]
pub struct ImageStreamSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lookup_policy: Option<ImageLookupPolicy>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ImageLookupPolicy {
    pub local: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ImageStreamStatus {
    #[serde(default)]
    pub docker_image_repository: String,
    #[serde(default)]
    pub tags: Vec<NamedTagEventList>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct NamedTagEventList {
    pub tag: String,
    #[serde(default)]
    pub items: Vec<TagEvent>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct TagEvent {
    #[serde(default)]
    pub docker_image_reference: String,
    #[serde(default)]
    pub image: String,
}

impl ImageStream {
    /// Most recent image reference recorded for `tag`.
    pub fn latest_image(&self, tag: &str) -> Option<&str> {
        self.status
            .as_ref()?
            .tags
            .iter()
            .find(|t| t.tag == tag)?
            .items
            .first()
            .map(|e| e.docker_image_reference.as_str())
    }
}
