//! Shared request plumbing for the GitLab v4 REST API.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::ScmError;
use crate::session::ScmSession;

/// Path prefix of the v4 API.
pub(crate) const API_PREFIX: &str = "/api/v4";

/// Header carrying a personal, project or group access token.
const TOKEN_HEADER: &str = "PRIVATE-TOKEN";

/// Percent-encode one path segment: a project path, file path or reference.
pub(crate) fn encode(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

/// GET `path` (relative to the API prefix) and decode the JSON body.
pub(crate) async fn get_json<T: DeserializeOwned>(
    session: &ScmSession,
    path: &str,
    query: &[(&str, String)],
) -> Result<T, ScmError> {
    let url = format!("{}{API_PREFIX}{path}", session.base_url());
    debug!(url = %url, "GitLab request");

    let response = session
        .http()
        .get(&url)
        .header(TOKEN_HEADER, session.token())
        .query(query)
        .send()
        .await?;

    handle_response(response).await
}

async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ScmError> {
    let status = response.status();
    let text = response.text().await?;

    if status.is_success() {
        serde_json::from_str(&text).map_err(|e| {
            warn!(error = %e, body = %text, "Failed to parse GitLab response");
            ScmError::Serialization(e)
        })
    } else if status == StatusCode::NOT_FOUND {
        Err(ScmError::NotFound(text))
    } else if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        Err(ScmError::Auth(text))
    } else {
        Err(ScmError::Api {
            status: status.as_u16(),
            message: text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_project_path() {
        assert_eq!(encode("platform/oak"), "platform%2Foak");
        assert_eq!(encode("42"), "42");
    }

    #[test]
    fn test_encode_file_path() {
        assert_eq!(encode("deploy/app config.yaml"), "deploy%2Fapp%20config.yaml");
        assert_eq!(encode("feature/x"), "feature%2Fx");
    }
}
