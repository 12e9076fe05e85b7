//! Provider codes and the backends wired to them.
//!
//! [`PROVIDERS`] is the only place a provider code is mapped to a backend.
//! Every factory operation resolves through it.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::gitlab;
use crate::traits::{GroupMemberService, ProjectService, RepositoryService, UserService};

/// SCM provider, identified on the wire by its integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(i32)]
pub enum ScmKind {
    Github = 0,
    Gitlab = 1,
}

impl ScmKind {
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// The provider registered under `code`, if any.
    pub fn from_code(code: i32) -> Option<Self> {
        lookup(code).map(|r| r.kind)
    }
}

impl From<ScmKind> for i32 {
    fn from(kind: ScmKind) -> Self {
        kind.code()
    }
}

impl fmt::Display for ScmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Github => write!(f, "github"),
            Self::Gitlab => write!(f, "gitlab"),
        }
    }
}

/// Constructors for every capability of one backend.
pub(crate) struct Backend {
    pub user: fn() -> Arc<dyn UserService>,
    pub project: fn() -> Arc<dyn ProjectService>,
    pub repository: fn() -> Arc<dyn RepositoryService>,
    pub group_member: fn() -> Arc<dyn GroupMemberService>,
}

pub(crate) struct Registration {
    pub kind: ScmKind,
    /// `None` while the provider is known but not yet implemented.
    pub backend: Option<&'static Backend>,
}

pub(crate) static PROVIDERS: [Registration; 2] = [
    Registration {
        kind: ScmKind::Github,
        backend: None,
    },
    Registration {
        kind: ScmKind::Gitlab,
        backend: Some(&gitlab::BACKEND),
    },
];

pub(crate) fn lookup(code: i32) -> Option<&'static Registration> {
    PROVIDERS.iter().find(|r| r.kind.code() == code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(ScmKind::Github.code(), 0);
        assert_eq!(ScmKind::Gitlab.code(), 1);
        assert_eq!(i32::from(ScmKind::Gitlab), 1);
    }

    #[test]
    fn test_from_code() {
        assert_eq!(ScmKind::from_code(0), Some(ScmKind::Github));
        assert_eq!(ScmKind::from_code(1), Some(ScmKind::Gitlab));
        assert_eq!(ScmKind::from_code(2), None);
        assert_eq!(ScmKind::from_code(-1), None);
    }

    #[test]
    fn test_codes_unique_in_table() {
        for (i, a) in PROVIDERS.iter().enumerate() {
            for b in &PROVIDERS[i + 1..] {
                assert_ne!(a.kind.code(), b.kind.code());
            }
        }
    }
}
