//! SCM Factory
//!
//! Creates capability services for a provider code.

use std::sync::Arc;

use tracing::debug;

use crate::error::ScmError;
use crate::registry::{lookup, Backend, ScmKind, PROVIDERS};
use crate::traits::{GroupMemberService, ProjectService, RepositoryService, UserService};

/// Factory for SCM capability services.
///
/// Holds no state; each call returns a fresh service. Unknown codes yield
/// [`ScmError::ProviderNotRecognized`], known codes without a backend yield
/// [`ScmError::ProviderNotImplemented`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ScmFactory;

impl ScmFactory {
    pub fn new() -> Self {
        Self
    }

    fn backend(code: i32) -> Result<&'static Backend, ScmError> {
        let registration = lookup(code).ok_or(ScmError::ProviderNotRecognized(code))?;
        registration
            .backend
            .ok_or(ScmError::ProviderNotImplemented {
                code,
                kind: registration.kind,
            })
    }

    pub fn new_user(&self, provider: i32) -> Result<Arc<dyn UserService>, ScmError> {
        debug!(provider, "Creating SCM user service");
        Ok((Self::backend(provider)?.user)())
    }

    pub fn new_project(&self, provider: i32) -> Result<Arc<dyn ProjectService>, ScmError> {
        debug!(provider, "Creating SCM project service");
        Ok((Self::backend(provider)?.project)())
    }

    pub fn new_repository(&self, provider: i32) -> Result<Arc<dyn RepositoryService>, ScmError> {
        debug!(provider, "Creating SCM repository service");
        Ok((Self::backend(provider)?.repository)())
    }

    pub fn new_group_member(&self, provider: i32) -> Result<Arc<dyn GroupMemberService>, ScmError> {
        debug!(provider, "Creating SCM group member service");
        Ok((Self::backend(provider)?.group_member)())
    }

    /// Providers with a backend wired.
    pub fn supported() -> Vec<ScmKind> {
        PROVIDERS
            .iter()
            .filter(|r| r.backend.is_some())
            .map(|r| r.kind)
            .collect()
    }

    pub fn is_supported(provider: i32) -> bool {
        Self::backend(provider).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_gitlab_services() {
        let factory = ScmFactory::new();
        let code = ScmKind::Gitlab.code();
        assert_eq!(factory.new_user(code).unwrap().kind(), ScmKind::Gitlab);
        assert_eq!(factory.new_project(code).unwrap().kind(), ScmKind::Gitlab);
        assert_eq!(factory.new_repository(code).unwrap().kind(), ScmKind::Gitlab);
        assert_eq!(factory.new_group_member(code).unwrap().kind(), ScmKind::Gitlab);
    }

    #[test]
    fn test_github_not_implemented() {
        let err = ScmFactory::new().new_user(ScmKind::Github.code()).err().unwrap();
        assert!(matches!(
            err,
            ScmError::ProviderNotImplemented {
                code: 0,
                kind: ScmKind::Github
            }
        ));
    }

    #[test]
    fn test_unregistered_code_not_recognized() {
        let factory = ScmFactory::new();
        assert!(matches!(
            factory.new_project(2).err().unwrap(),
            ScmError::ProviderNotRecognized(2)
        ));
        assert!(matches!(
            factory.new_repository(2).err().unwrap(),
            ScmError::ProviderNotRecognized(2)
        ));
        assert!(matches!(
            factory.new_group_member(2).err().unwrap(),
            ScmError::ProviderNotRecognized(2)
        ));
    }

    #[test]
    fn test_supported() {
        assert_eq!(ScmFactory::supported(), vec![ScmKind::Gitlab]);
        assert!(ScmFactory::is_supported(1));
        assert!(!ScmFactory::is_supported(0));
        assert!(!ScmFactory::is_supported(42));
    }
}
