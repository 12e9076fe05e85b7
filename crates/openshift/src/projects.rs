//! Projects: namespaces with OpenShift metadata. Cluster scoped.

use tracing::{debug, info};

use crate::client::{get_or_create, ResourceClient};
use crate::error::ClientError;
use crate::resources::Project;

/// Cluster-scoped kinds are addressed with an empty namespace.
const CLUSTER: &str = "";

pub struct Projects<C> {
    client: C,
}

impl<C: ResourceClient<Project>> Projects<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Ensure project `name` exists. An existing project is returned as is;
    /// its display name and description are not updated.
    pub async fn create(
        &self,
        name: &str,
        display_name: &str,
        description: &str,
    ) -> Result<Project, ClientError> {
        debug!(name = %name, "Projects::create");
        let project = Project::described(name, display_name, description);
        let stored = get_or_create(&self.client, CLUSTER, &project).await?;
        info!(name = %name, phase = ?stored.phase(), "Project ready");
        Ok(stored)
    }

    pub async fn get(&self, name: &str) -> Result<Project, ClientError> {
        self.client.get(CLUSTER, name).await
    }

    pub async fn delete(&self, name: &str) -> Result<(), ClientError> {
        self.client.delete(CLUSTER, name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{Call, MemoryClient, Verb};

    #[tokio::test]
    async fn test_project_lifecycle() {
        let projects = Projects::new(MemoryClient::<Project>::new());

        let created = projects.create("demo-dev", "Demo", "dev stage").await.unwrap();
        assert_eq!(created.metadata.name.as_deref(), Some("demo-dev"));
        assert!(created.metadata.namespace.is_none());

        let project = projects.get("demo-dev").await.unwrap();
        assert_eq!(project.display_name(), Some("Demo"));

        projects.delete("demo-dev").await.unwrap();
        assert!(projects.get("demo-dev").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_existing_project_kept() {
        let projects = Projects::new(MemoryClient::<Project>::new());
        projects.create("demo-dev", "Demo", "").await.unwrap();
        let again = projects.create("demo-dev", "Renamed", "").await.unwrap();

        assert_eq!(again.display_name(), Some("Demo"));
        assert_eq!(projects.client.count(Verb::Create), 1);
        assert_eq!(
            projects.client.calls()[0],
            Call::Get {
                namespace: String::new(),
                name: "demo-dev".to_string(),
            }
        );
    }
}
