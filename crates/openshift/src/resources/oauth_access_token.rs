//! `OAuthAccessToken` document (`oauth.openshift.io/v1`), cluster scoped.
//!
//! Tokens are minted by the OAuth server; clients only read and revoke them.

use std::borrow::Cow;

use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use k8s_openapi::ClusterResourceScope;
use kube::Resource;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct OAuthAccessToken {
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub client_name: String,
    /// Lifetime in seconds from creation; zero means no expiry.
    #[serde(default)]
    pub expires_in: i64,
    #[serde(default)]
    pub scopes: Vec<String>,
    #[serde(default)]
    pub user_name: String,
    #[serde(default, rename = "userUID")]
    pub user_uid: String,
}

impl Resource for OAuthAccessToken {
    type DynamicType = ();
    type Scope = ClusterResourceScope;

    fn kind(&(): &()) -> Cow<'_, str> {
        Cow::Borrowed("OAuthAccessToken")
    }

    fn group(&(): &()) -> Cow<'_, str> {
        Cow::Borrowed("oauth.openshift.io")
    }

    fn version(&(): &()) -> Cow<'_, str> {
        Cow::Borrowed("v1")
    }

    fn plural(&(): &()) -> Cow<'_, str> {
        Cow::Borrowed("oauthaccesstokens")
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
    fn test_parses_server_document() {
        let token: OAuthAccessToken = serde_json::from_str(
            r#"{
                "apiVersion": "oauth.openshift.io/v1",
                "kind": "OAuthAccessToken",
                "metadata": {"name": "sha256~abc"},
                "clientName": "openshift-challenging-client",
                "expiresIn": 86400,
                "scopes": ["user:full"],
                "userName": "developer",
                "userUID": "9f1c"
            }"#,
        )
        .unwrap();
        assert_eq!(token.user_name, "developer");
        assert_eq!(token.user_uid, "9f1c");
        assert_eq!(token.expires_in, 86400);
        assert_eq!(OAuthAccessToken::plural(&()), "oauthaccesstokens");
    }
}
