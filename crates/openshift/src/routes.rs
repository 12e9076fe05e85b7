//! Routes exposing an application's service.

use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use tracing::{debug, info};

use crate::client::{create_or_replace, ResourceClient};
use crate::error::ClientError;
use crate::resources::{Route, RoutePort, RouteSpec, RouteTargetReference};

pub struct Routes<C> {
    client: C,
}

impl<C: ResourceClient<Route>> Routes<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Route `name` to the service of the same name on `port`, creating or
    /// replacing it. Returns the host the route answers on, empty until the
    /// router assigns one.
    pub async fn create(&self, namespace: &str, name: &str, port: i32) -> Result<String, ClientError> {
        debug!(namespace = %namespace, name = %name, port, "Routes::create");
        let mut route = Route::new(
            name,
            RouteSpec {
                host: None,
                to: RouteTargetReference {
                    kind: "Service".to_string(),
                    name: name.to_string(),
                    weight: Some(100),
                },
                port: Some(RoutePort {
                    target_port: IntOrString::Int(port),
                }),
            },
        );
        route.metadata.namespace = Some(namespace.to_string());

        let (applied, how) = create_or_replace(&self.client, namespace, route).await?;
        info!(namespace = %namespace, name = %name, applied = ?how, "Applied Route");

        Ok(applied.host().unwrap_or_default().to_string())
    }

    pub async fn get(&self, namespace: &str, name: &str) -> Result<Route, ClientError> {
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
    async fn test_route_lifecycle() {
        let routes = Routes::new(MemoryClient::<Route>::new());

        let host = routes.create("demo-dev", "hello-world", 8080).await.unwrap();
        assert_eq!(host, "");

        let route = routes.get("demo-dev", "hello-world").await.unwrap();
        assert_eq!(route.metadata.name.as_deref(), Some("hello-world"));
        assert_eq!(route.spec.to.name, "hello-world");
        assert_eq!(
            route.spec.port.map(|p| p.target_port),
            Some(IntOrString::Int(8080))
        );

        routes.delete("demo-dev", "hello-world").await.unwrap();
        assert!(routes.get("demo-dev", "hello-world").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_existing_route_is_replaced() {
        let client = MemoryClient::<Route>::new();
        let routes = Routes::new(client);
        routes.create("demo-dev", "hello-world", 8080).await.unwrap();
        routes.create("demo-dev", "hello-world", 9090).await.unwrap();

        assert_eq!(routes.client.count(Verb::Create), 1);
        assert_eq!(routes.client.count(Verb::Update), 1);
        let route = routes.get("demo-dev", "hello-world").await.unwrap();
        assert_eq!(
            route.spec.port.map(|p| p.target_port),
            Some(IntOrString::Int(9090))
        );
    }

    #[tokio::test]
    async fn test_lookup_failure_skips_write() {
        let client = MemoryClient::<Route>::new();
        client.fail_on(Verb::Get, 503, "apiserver unavailable");
        let routes = Routes::new(client);

        let err = routes.create("demo-dev", "hello-world", 8080).await.unwrap_err();
        assert!(matches!(err, ClientError::Api { code: 503, .. }));
        assert_eq!(routes.client.count(Verb::Create), 0);
        assert_eq!(routes.client.count(Verb::Update), 0);
    }
}
