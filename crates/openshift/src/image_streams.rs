//! Image streams feeding deployment config triggers.

use tracing::{debug, info};

use crate::client::{get_or_create, ResourceClient};
use crate::error::ClientError;
use crate::resources::{ImageLookupPolicy, ImageStream, ImageStreamSpec};

pub struct ImageStreams<C> {
    client: C,
}

impl<C: ResourceClient<ImageStream>> ImageStreams<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Ensure the image stream exists, returning the stored copy.
    pub async fn create(&self, namespace: &str, name: &str) -> Result<ImageStream, ClientError> {
        debug!(namespace = %namespace, name = %name, "ImageStreams::create");
        let mut stream = ImageStream::new(
            name,
            ImageStreamSpec {
                lookup_policy: Some(ImageLookupPolicy { local: false }),
            },
        );
        stream.metadata.namespace = Some(namespace.to_string());
        let stored = get_or_create(&self.client, namespace, &stream).await?;
        info!(namespace = %namespace, name = %name, "ImageStream ready");
        Ok(stored)
    }

    pub async fn get(&self, namespace: &str, name: &str) -> Result<ImageStream, ClientError> {
        self.client.get(namespace, name).await
    }

    pub async fn delete(&self, namespace: &str, name: &str) -> Result<(), ClientError> {
        self.client.delete(namespace, name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{MemoryClient, Verb};

    #[tokio::test]
    async fn test_create_is_idempotent() {
        let streams = ImageStreams::new(MemoryClient::<ImageStream>::new());
        let first = streams.create("demo-dev", "hello").await.unwrap();
        let second = streams.create("demo-dev", "hello").await.unwrap();

        assert_eq!(first.metadata.resource_version, second.metadata.resource_version);
        assert_eq!(streams.client.count(Verb::Create), 1);
    }

    #[tokio::test]
    async fn test_latest_image_unknown_before_push() {
        let streams = ImageStreams::new(MemoryClient::<ImageStream>::new());
        let stream = streams.create("demo-dev", "hello").await.unwrap();
        assert!(stream.latest_image("v1").is_none());

        streams.delete("demo-dev", "hello").await.unwrap();
        assert!(streams.get("demo-dev", "hello").await.unwrap_err().is_not_found());
    }
}
