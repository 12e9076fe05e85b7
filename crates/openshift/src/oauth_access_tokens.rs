//! OAuth access tokens issued by the cluster's OAuth server. Cluster scoped.

use tracing::debug;

use crate::client::ResourceClient;
use crate::error::ClientError;
use crate::resources::OAuthAccessToken;

const CLUSTER: &str = "";

pub struct OAuthAccessTokens<C> {
    client: C,
}

impl<C: ResourceClient<OAuthAccessToken>> OAuthAccessTokens<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub async fn get(&self, name: &str) -> Result<OAuthAccessToken, ClientError> {
        self.client.get(CLUSTER, name).await
    }

    /// Revoke a token.
    pub async fn delete(&self, name: &str) -> Result<(), ClientError> {
        debug!(name = %name, "OAuthAccessTokens::delete");
        self.client.delete(CLUSTER, name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MemoryClient;
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

    #[tokio::test]
    async fn test_token_get_and_revoke() {
        let client = MemoryClient::<OAuthAccessToken>::new();
        client.insert(
            "",
            OAuthAccessToken {
                metadata: ObjectMeta {
                    name: Some("sha256~abc".to_string()),
                    ..Default::default()
                },
                user_name: "developer".to_string(),
                ..Default::default()
            },
        );
        let tokens = OAuthAccessTokens::new(client);

        let token = tokens.get("sha256~abc").await.unwrap();
        assert_eq!(token.user_name, "developer");
        assert!(token.metadata.namespace.is_none());

        tokens.delete("sha256~abc").await.unwrap();
        assert!(tokens.get("sha256~abc").await.unwrap_err().is_not_found());
        assert!(tokens.delete("sha256~abc").await.unwrap_err().is_not_found());
    }
}
