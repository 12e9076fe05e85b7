//! `ImageStreamTag` document (`image.openshift.io/v1`).
//!
//! Tags carry their fields at the top level rather than under `spec`, so
//! the kube [`Resource`] impl is written out by hand.

use std::borrow::Cow;

use k8s_openapi::api::core::v1::ObjectReference;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use k8s_openapi::NamespaceResourceScope;
use kube::Resource;
use serde::{Deserialize, Serialize};

pub const KIND: &str = "ImageStreamTag";
pub const API_VERSION: &str = "image.openshift.io/v1";

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ImageStreamTag {
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<TagReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<TagImage>,
    #[serde(default)]
    pub generation: i64,
}

/// Where a tag points, e.g. a `DockerImage` pull spec.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct TagReference {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<ObjectReference>,
}

/// The image the tag currently resolves to; set by the server.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TagImage {
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub docker_image_reference: String,
}

impl ImageStreamTag {
    /// Tag `<stream>:<tag>` pointing at the image pull spec `image`.
    pub fn docker_image(stream: &str, tag: &str, image: &str) -> Self {
        Self {
            api_version: API_VERSION.to_string(),
            kind: KIND.to_string(),
            metadata: ObjectMeta {
                name: Some(format!("{stream}:{tag}")),
                ..Default::default()
            },
            tag: Some(TagReference {
                name: tag.to_string(),
                from: Some(ObjectReference {
                    kind: Some("DockerImage".to_string()),
                    name: Some(image.to_string()),
                    ..Default::default()
                }),
            }),
            image: None,
            generation: 0,
        }
    }

    /// Pull spec the tag resolves to, once the server has imported it.
    pub fn image_reference(&self) -> Option<&str> {
        self.image
            .as_ref()
            .map(|i| i.docker_image_reference.as_str())
            .filter(|r| !r.is_empty())
    }
}

impl Resource for ImageStreamTag {
    type DynamicType = ();
    type Scope = NamespaceResourceScope;

    fn kind(&(): &()) -> Cow<'_, str> {
        Cow::Borrowed(KIND)
    }

    fn group(&(): &()) -> Cow<'_, str> {
        Cow::Borrowed("image.openshift.io")
    }

    fn version(&(): &()) -> Cow<'_, str> {
        Cow::Borrowed("v1")
    }

    fn plural(&(): &()) -> Cow<'_, str> {
        Cow::Borrowed("imagestreamtags")
    }

    fn meta(&self) -> &ObjectMeta {
        &self.metadata
    }

    fn meta_mut(&mut self) -> &mut ObjectMeta {
        &mut self.metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_header_and_name() {
        let tag = ImageStreamTag::docker_image("hello", "v1", "quay.io/demo/hello:1.0");
        assert_eq!(ImageStreamTag::api_version(&()), API_VERSION);

        let value = serde_json::to_value(&tag).unwrap();
        assert_eq!(value["apiVersion"], API_VERSION);
        assert_eq!(value["kind"], "ImageStreamTag");
        assert_eq!(value["metadata"]["name"], "hello:v1");
        assert_eq!(value["tag"]["from"]["kind"], "DockerImage");
        assert_eq!(value["tag"]["from"]["name"], "quay.io/demo/hello:1.0");
        assert!(tag.image_reference().is_none());
    }
}
