use std::fmt::Debug;

use async_trait::async_trait;
use k8s_openapi::{ClusterResourceScope, NamespaceResourceScope};
use kube::api::{Api, DeleteParams, PostParams};
use kube::{Client, Resource, ResourceExt};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use super::{DeploymentConfigClient, ResourceClient};
use crate::error::ClientError;
use crate::resources::{DeploymentConfig, RolloutRequest};

/// How a resource scope addresses its collection.
///
/// Cluster-scoped kinds ignore the namespace argument of every verb.
pub trait ApiScope: Sized {
    fn api<K>(client: Client, namespace: &str) -> Api<K>
    where
        K: Resource<Scope = Self>,
        K::DynamicType: Default;
}

impl ApiScope for NamespaceResourceScope {
    fn api<K>(client: Client, namespace: &str) -> Api<K>
    where
        K: Resource<Scope = Self>,
        K::DynamicType: Default,
    {
        Api::namespaced(client, namespace)
    }
}

impl ApiScope for ClusterResourceScope {
    fn api<K>(client: Client, _namespace: &str) -> Api<K>
    where
        K: Resource<Scope = Self>,
        K::DynamicType: Default,
    {
        Api::all(client)
    }
}

/// [`ResourceClient`] backed by a live API server connection.
///
/// Cloning is cheap; all clones share the underlying connection pool.
#[derive(Clone)]
pub struct KubeClient {
    client: Client,
}

impl KubeClient {
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn api<K>(&self, namespace: &str) -> Api<K>
    where
        K: Resource,
        K::Scope: ApiScope,
        K::DynamicType: Default,
    {
        <K::Scope as ApiScope>::api(self.client.clone(), namespace)
    }
}

#[async_trait]
impl<K> ResourceClient<K> for KubeClient
where
    K: Resource
        + Clone
        + Debug
        + DeserializeOwned
        + Serialize
        + Send
        + Sync
        + 'static,
    K::Scope: ApiScope,
    K::DynamicType: Default,
{
    async fn get(&self, namespace: &str, name: &str) -> Result<K, ClientError> {
        debug!(namespace = %namespace, name = %name, "get");
        Ok(self.api::<K>(namespace).get(name).await?)
    }

    async fn create(&self, namespace: &str, resource: &K) -> Result<K, ClientError> {
        debug!(namespace = %namespace, name = %resource.name_any(), "create");
        Ok(self
            .api::<K>(namespace)
            .create(&PostParams::default(), resource)
            .await?)
    }

    async fn update(&self, namespace: &str, resource: &K) -> Result<K, ClientError> {
        let name = resource.name_any();
        debug!(namespace = %namespace, name = %name, "replace");
        Ok(self
            .api::<K>(namespace)
            .replace(&name, &PostParams::default(), resource)
            .await?)
    }

    async fn delete(&self, namespace: &str, name: &str) -> Result<(), ClientError> {
        debug!(namespace = %namespace, name = %name, "delete");
        self.api::<K>(namespace)
            .delete(name, &DeleteParams::default())
            .await?;
        Ok(())
    }
}

#[async_trait]
impl DeploymentConfigClient for KubeClient {
    async fn instantiate(
        &self,
        namespace: &str,
        name: &str,
        request: &RolloutRequest,
    ) -> Result<DeploymentConfig, ClientError> {
        debug!(namespace = %namespace, name = %name, "instantiate");
        let body = serde_json::to_vec(request)?;
        Ok(self
            .api::<DeploymentConfig>(namespace)
            .create_subresource("instantiate", name, &PostParams::default(), body)
            .await?)
    }
}
