//! GitLab wire documents and their conversion to neutral types.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Deserialize;

use crate::error::ScmError;
use crate::types::{
    AccessLevel, EntryType, FileContent, GroupMember, Namespace, Project, TreeEntry, User,
};

#[derive(Debug, Deserialize)]
pub(crate) struct GlUser {
    id: u64,
    username: String,
    name: String,
    #[serde(default)]
    email: Option<String>,
    state: String,
    web_url: String,
    #[serde(default)]
    avatar_url: Option<String>,
}

impl From<GlUser> for User {
    fn from(u: GlUser) -> Self {
        Self {
            id: u.id,
            username: u.username,
            name: u.name,
            email: u.email,
            state: u.state,
            web_url: u.web_url,
            avatar_url: u.avatar_url,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GlNamespace {
    id: u64,
    name: String,
    path: String,
    kind: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GlProject {
    id: u64,
    name: String,
    path: String,
    path_with_namespace: String,
    #[serde(default)]
    default_branch: Option<String>,
    #[serde(default)]
    visibility: Option<String>,
    web_url: String,
    http_url_to_repo: String,
    ssh_url_to_repo: String,
    namespace: GlNamespace,
}

impl From<GlProject> for Project {
    fn from(p: GlProject) -> Self {
        Self {
            id: p.id,
            name: p.name,
            path: p.path,
            path_with_namespace: p.path_with_namespace,
            default_branch: p.default_branch,
            visibility: p.visibility,
            web_url: p.web_url,
            http_url_to_repo: p.http_url_to_repo,
            ssh_url_to_repo: p.ssh_url_to_repo,
            namespace: Namespace {
                id: p.namespace.id,
                name: p.namespace.name,
                path: p.namespace.path,
                kind: p.namespace.kind,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GlTreeEntry {
    id: String,
    name: String,
    #[serde(rename = "type")]
    entry_type: EntryType,
    path: String,
    mode: String,
}

impl From<GlTreeEntry> for TreeEntry {
    fn from(e: GlTreeEntry) -> Self {
        Self {
            id: e.id,
            name: e.name,
            entry_type: e.entry_type,
            path: e.path,
            mode: e.mode,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GlFile {
    file_path: String,
    #[serde(rename = "ref")]
    reference: String,
    blob_id: String,
    encoding: String,
    content: String,
}

impl TryFrom<GlFile> for FileContent {
    type Error = ScmError;

    fn try_from(f: GlFile) -> Result<Self, Self::Error> {
        let content = match f.encoding.as_str() {
            "base64" => {
                // GitLab may wrap long payloads.
                let compact: String = f.content.split_whitespace().collect();
                STANDARD
                    .decode(compact)
                    .map_err(|e| ScmError::Decode(format!("{}: {e}", f.file_path)))?
            }
            "text" | "" => f.content.into_bytes(),
            other => {
                return Err(ScmError::Decode(format!(
                    "{}: unsupported encoding {other}",
                    f.file_path
                )))
            }
        };
        Ok(Self {
            path: f.file_path,
            reference: f.reference,
            blob_id: f.blob_id,
            content,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GlMember {
    id: u64,
    username: String,
    name: String,
    state: String,
    access_level: u32,
}

impl From<GlMember> for GroupMember {
    fn from(m: GlMember) -> Self {
        Self {
            id: m.id,
            username: m.username,
            name: m.name,
            state: m.state,
            access_level: AccessLevel::from(m.access_level),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(encoding: &str, content: &str) -> GlFile {
        GlFile {
            file_path: "README.md".to_string(),
            reference: "main".to_string(),
            blob_id: "abc123".to_string(),
            encoding: encoding.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_base64_content_with_line_breaks() {
        let decoded = FileContent::try_from(file("base64", "aGVsbG8g\nd29ybGQ=\n")).unwrap();
        assert_eq!(decoded.as_str(), Some("hello world"));
        assert_eq!(decoded.reference, "main");
    }

    #[test]
    fn test_invalid_base64_is_decode_error() {
        let err = FileContent::try_from(file("base64", "!!!")).unwrap_err();
        assert!(matches!(err, ScmError::Decode(_)));
    }

    #[test]
    fn test_unknown_encoding_rejected() {
        let err = FileContent::try_from(file("gzip", "x")).unwrap_err();
        assert!(matches!(err, ScmError::Decode(msg) if msg.contains("gzip")));
    }

    #[test]
    fn test_member_access_level() {
        let member: GlMember = serde_json::from_str(
            r#"{"id":7,"username":"ada","name":"Ada","state":"active","access_level":40}"#,
        )
        .unwrap();
        assert_eq!(GroupMember::from(member).access_level, AccessLevel::Maintainer);
    }

    #[test]
    fn test_tree_entry_type() {
        let entry: GlTreeEntry = serde_json::from_str(
            r#"{"id":"a1","name":"src","type":"tree","path":"src","mode":"040000"}"#,
        )
        .unwrap();
        assert_eq!(TreeEntry::from(entry).entry_type, EntryType::Tree);
    }
}
