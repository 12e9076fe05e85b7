//! Provider-neutral SCM value types.

use serde::{Deserialize, Serialize};

/// An SCM account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub name: String,
    pub email: Option<String>,
    pub state: String,
    pub web_url: String,
    pub avatar_url: Option<String>,
}

/// Group or user that owns a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Namespace {
    pub id: u64,
    pub name: String,
    pub path: String,
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    pub name: String,
    pub path: String,
    pub path_with_namespace: String,
    pub default_branch: Option<String>,
    pub visibility: Option<String>,
    pub web_url: String,
    pub http_url_to_repo: String,
    pub ssh_url_to_repo: String,
    pub namespace: Namespace,
}

/// Filters for listing projects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectQuery {
    pub search: Option<String>,
    /// Only projects the token's user is a member of.
    pub membership: bool,
    pub page: u32,
    pub per_page: u32,
}

impl Default for ProjectQuery {
    fn default() -> Self {
        Self {
            search: None,
            membership: false,
            page: 1,
            per_page: 20,
        }
    }
}

impl ProjectQuery {
    #[must_use]
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: Some(term.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Blob,
    Tree,
    /// Submodule reference.
    Commit,
}

/// One entry of a repository tree listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEntry {
    pub id: String,
    pub name: String,
    pub entry_type: EntryType,
    pub path: String,
    pub mode: String,
}

/// Filters for listing a repository tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeQuery {
    /// Directory to list; repository root when unset.
    pub path: Option<String>,
    /// Branch, tag or commit; default branch when unset.
    pub reference: Option<String>,
    pub recursive: bool,
}

/// Decoded file content at a given reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileContent {
    pub path: String,
    pub reference: String,
    pub blob_id: String,
    pub content: Vec<u8>,
}

impl FileContent {
    /// Content as UTF-8, if it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.content).ok()
    }
}

/// Permission level of a group member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AccessLevel {
    NoAccess,
    Minimal,
    Guest,
    Reporter,
    Developer,
    Maintainer,
    Owner,
}

impl From<u32> for AccessLevel {
    fn from(level: u32) -> Self {
        match level {
            50.. => Self::Owner,
            40..=49 => Self::Maintainer,
            30..=39 => Self::Developer,
            20..=29 => Self::Reporter,
            10..=19 => Self::Guest,
            5..=9 => Self::Minimal,
            _ => Self::NoAccess,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMember {
    pub id: u64,
    pub username: String,
    pub name: String,
    pub state: String,
    pub access_level: AccessLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_level_from_gitlab_values() {
        assert_eq!(AccessLevel::from(0), AccessLevel::NoAccess);
        assert_eq!(AccessLevel::from(5), AccessLevel::Minimal);
        assert_eq!(AccessLevel::from(10), AccessLevel::Guest);
        assert_eq!(AccessLevel::from(20), AccessLevel::Reporter);
        assert_eq!(AccessLevel::from(30), AccessLevel::Developer);
        assert_eq!(AccessLevel::from(40), AccessLevel::Maintainer);
        assert_eq!(AccessLevel::from(50), AccessLevel::Owner);
        assert!(AccessLevel::Maintainer > AccessLevel::Developer);
    }

    #[test]
    fn test_project_query_defaults() {
        let query = ProjectQuery::search("hello");
        assert_eq!(query.search.as_deref(), Some("hello"));
        assert_eq!(query.page, 1);
        assert_eq!(query.per_page, 20);
    }
}
