//! Image stream tags, named `<stream>:<tag>`.

use tracing::{debug, info};

use crate::client::{create_or_replace, ResourceClient};
use crate::error::ClientError;
use crate::resources::ImageStreamTag;

fn tag_name(stream: &str, tag: &str) -> String {
    format!("{stream}:{tag}")
}

pub struct ImageStreamTags<C> {
    client: C,
}

impl<C: ResourceClient<ImageStreamTag>> ImageStreamTags<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Point `<stream>:<tag>` at the image pull spec `image`, moving the tag
    /// if it already exists. Moving a tag fires image-change triggers that
    /// follow it.
    pub async fn create(
        &self,
        namespace: &str,
        stream: &str,
        tag: &str,
        image: &str,
    ) -> Result<ImageStreamTag, ClientError> {
        debug!(namespace = %namespace, stream = %stream, tag = %tag, "ImageStreamTags::create");
        let mut desired = ImageStreamTag::docker_image(stream, tag, image);
        desired.metadata.namespace = Some(namespace.to_string());
        let (stored, how) = create_or_replace(&self.client, namespace, desired).await?;
        info!(namespace = %namespace, name = %tag_name(stream, tag), applied = ?how, "Applied ImageStreamTag");
        Ok(stored)
    }

    pub async fn get(&self, namespace: &str, stream: &str, tag: &str) -> Result<ImageStreamTag, ClientError> {
        self.client.get(namespace, &tag_name(stream, tag)).await
    }

    pub async fn delete(&self, namespace: &str, stream: &str, tag: &str) -> Result<(), ClientError> {
        self.client.delete(namespace, &tag_name(stream, tag)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{MemoryClient, Verb};

    fn source(tag: &ImageStreamTag) -> Option<String> {
        tag.tag.as_ref().and_then(|t| t.from.as_ref()).and_then(|f| f.name.clone())
    }

    #[tokio::test]
    async fn test_tag_lifecycle() {
        let tags = ImageStreamTags::new(MemoryClient::<ImageStreamTag>::new());

        tags.create("demo-dev", "hello", "v1", "quay.io/demo/hello:1.0")
            .await
            .unwrap();
        let tag = tags.get("demo-dev", "hello", "v1").await.unwrap();
        assert_eq!(tag.metadata.name.as_deref(), Some("hello:v1"));
        assert_eq!(source(&tag).as_deref(), Some("quay.io/demo/hello:1.0"));

        tags.delete("demo-dev", "hello", "v1").await.unwrap();
        assert!(tags.get("demo-dev", "hello", "v1").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_existing_tag_is_moved() {
        let tags = ImageStreamTags::new(MemoryClient::<ImageStreamTag>::new());
        tags.create("demo-dev", "hello", "v1", "quay.io/demo/hello:1.0")
            .await
            .unwrap();
        let moved = tags
            .create("demo-dev", "hello", "v1", "quay.io/demo/hello:1.1")
            .await
            .unwrap();

        assert_eq!(source(&moved).as_deref(), Some("quay.io/demo/hello:1.1"));
        assert_eq!(tags.client.count(Verb::Create), 1);
        assert_eq!(tags.client.count(Verb::Update), 1);
    }
}
