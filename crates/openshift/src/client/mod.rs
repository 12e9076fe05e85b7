//! The seam between reconciliation logic and the API server.
//!
//! Reconcilers never construct authenticated sessions; they receive a ready
//! [`ResourceClient`] bound to one resource kind. [`KubeClient`] talks to a
//! real cluster, [`MemoryClient`] keeps documents in process.

mod kube_client;
mod memory;

pub use kube_client::{ApiScope, KubeClient};
pub use memory::{Call, MemoryClient, Verb};

use async_trait::async_trait;
use kube::{Resource, ResourceExt};

use crate::error::ClientError;
use crate::resources::{DeploymentConfig, RolloutRequest};

/// Verbs against one resource kind. Cluster-scoped kinds take an empty
/// namespace.
#[async_trait]
pub trait ResourceClient<K>: Send + Sync {
    /// Fetch a resource by name.
    async fn get(&self, namespace: &str, name: &str) -> Result<K, ClientError>;

    /// Create a resource; its name is taken from the document metadata.
    async fn create(&self, namespace: &str, resource: &K) -> Result<K, ClientError>;

    /// Replace a resource. The document must carry the resource version it
    /// was derived from; stale versions are rejected with
    /// [`ClientError::Conflict`].
    async fn update(&self, namespace: &str, resource: &K) -> Result<K, ClientError>;

    /// Delete a resource by name.
    async fn delete(&self, namespace: &str, name: &str) -> Result<(), ClientError>;
}

/// Deployment configs additionally support one-shot rollouts.
#[async_trait]
pub trait DeploymentConfigClient: ResourceClient<DeploymentConfig> {
    async fn instantiate(
        &self,
        namespace: &str,
        name: &str,
        request: &RolloutRequest,
    ) -> Result<DeploymentConfig, ClientError>;
}

/// Whether [`create_or_replace`] wrote a new object or replaced one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Created,
    Replaced,
}

/// Return the stored copy of `desired`'s name, creating `desired` if absent.
/// An existing object is never modified.
pub async fn get_or_create<K, C>(client: &C, namespace: &str, desired: &K) -> Result<K, ClientError>
where
    K: Resource + Send + Sync,
    C: ResourceClient<K> + ?Sized,
{
    match client.get(namespace, &desired.name_any()).await {
        Err(ClientError::NotFound(_)) => client.create(namespace, desired).await,
        other => other,
    }
}

/// Create `desired`, or replace the stored object of the same name. The
/// replacement carries the stored resource version.
pub async fn create_or_replace<K, C>(
    client: &C,
    namespace: &str,
    mut desired: K,
) -> Result<(K, Applied), ClientError>
where
    K: Resource + Send + Sync,
    C: ResourceClient<K> + ?Sized,
{
    match client.get(namespace, &desired.name_any()).await {
        Ok(existing) => {
            desired.meta_mut().resource_version = existing.meta().resource_version.clone();
            let replaced = client.update(namespace, &desired).await?;
            Ok((replaced, Applied::Replaced))
        }
        Err(ClientError::NotFound(_)) => {
            let created = client.create(namespace, &desired).await?;
            Ok((created, Applied::Created))
        }
        Err(e) => Err(e),
    }
}
