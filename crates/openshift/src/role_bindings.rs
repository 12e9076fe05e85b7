//! Role bindings granting users a cluster role within one namespace.
//!
//! Uses the RBAC `RoleBinding` kind, which the OpenShift authorization API
//! mirrors.

use k8s_openapi::api::rbac::v1::{RoleBinding, RoleRef, Subject};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use tracing::{debug, info};

use crate::client::{create_or_replace, ResourceClient};
use crate::error::ClientError;

const RBAC_GROUP: &str = "rbac.authorization.k8s.io";

pub struct RoleBindings<C> {
    client: C,
}

impl<C: ResourceClient<RoleBinding>> RoleBindings<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Bind cluster role `role` to `users` in `namespace` under `name`.
    /// An existing binding of the same name is replaced, so the subject list
    /// is exactly `users` afterwards.
    pub async fn create(
        &self,
        namespace: &str,
        name: &str,
        role: &str,
        users: &[&str],
    ) -> Result<RoleBinding, ClientError> {
        debug!(namespace = %namespace, name = %name, role = %role, "RoleBindings::create");
        let binding = RoleBinding {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                namespace: Some(namespace.to_string()),
                ..Default::default()
            },
            role_ref: RoleRef {
                api_group: RBAC_GROUP.to_string(),
                kind: "ClusterRole".to_string(),
                name: role.to_string(),
            },
            subjects: Some(
                users
                    .iter()
                    .map(|user| Subject {
                        api_group: Some(RBAC_GROUP.to_string()),
                        kind: "User".to_string(),
                        name: (*user).to_string(),
                        namespace: None,
                    })
                    .collect(),
            ),
        };

        let (stored, how) = create_or_replace(&self.client, namespace, binding).await?;
        info!(namespace = %namespace, name = %name, applied = ?how, "Applied RoleBinding");
        Ok(stored)
    }

    pub async fn get(&self, namespace: &str, name: &str) -> Result<RoleBinding, ClientError> {
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

    fn subject_names(binding: &RoleBinding) -> Vec<String> {
        binding
            .subjects
            .iter()
            .flatten()
            .map(|s| s.name.clone())
            .collect()
    }

    #[tokio::test]
    async fn test_role_binding_lifecycle() {
        let bindings = RoleBindings::new(MemoryClient::<RoleBinding>::new());

        bindings
            .create("demo-dev", "admin", "admin", &["ada"])
            .await
            .unwrap();
        let binding = bindings.get("demo-dev", "admin").await.unwrap();
        assert_eq!(binding.role_ref.kind, "ClusterRole");
        assert_eq!(binding.role_ref.name, "admin");
        assert_eq!(subject_names(&binding), ["ada"]);

        bindings.delete("demo-dev", "admin").await.unwrap();
        assert!(bindings.get("demo-dev", "admin").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_subjects_replaced() {
        let bindings = RoleBindings::new(MemoryClient::<RoleBinding>::new());
        bindings
            .create("demo-dev", "edit", "edit", &["ada", "bob"])
            .await
            .unwrap();
        let binding = bindings
            .create("demo-dev", "edit", "edit", &["eve"])
            .await
            .unwrap();

        assert_eq!(subject_names(&binding), ["eve"]);
        assert_eq!(bindings.client.count(Verb::Update), 1);
    }
}
