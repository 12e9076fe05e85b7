//! SCM capability traits.
//!
//! Implementations are stateless: connection details travel in the
//! [`ScmSession`] passed to each call.

use async_trait::async_trait;

use crate::error::ScmError;
use crate::registry::ScmKind;
use crate::session::ScmSession;
use crate::types::{FileContent, GroupMember, Project, ProjectQuery, TreeEntry, TreeQuery, User};

#[async_trait]
pub trait UserService: Send + Sync {
    fn kind(&self) -> ScmKind;

    /// The account the session token belongs to.
    async fn current_user(&self, session: &ScmSession) -> Result<User, ScmError>;
}

#[async_trait]
pub trait ProjectService: Send + Sync {
    fn kind(&self) -> ScmKind;

    /// Fetch a project by numeric id or full path (`group/name`).
    async fn get_project(&self, session: &ScmSession, project: &str) -> Result<Project, ScmError>;

    async fn list_projects(
        &self,
        session: &ScmSession,
        query: &ProjectQuery,
    ) -> Result<Vec<Project>, ScmError>;
}

#[async_trait]
pub trait RepositoryService: Send + Sync {
    fn kind(&self) -> ScmKind;

    async fn list_tree(
        &self,
        session: &ScmSession,
        project: &str,
        query: &TreeQuery,
    ) -> Result<Vec<TreeEntry>, ScmError>;

    async fn get_file(
        &self,
        session: &ScmSession,
        project: &str,
        path: &str,
        reference: &str,
    ) -> Result<FileContent, ScmError>;
}

#[async_trait]
pub trait GroupMemberService: Send + Sync {
    fn kind(&self) -> ScmKind;

    async fn get_member(
        &self,
        session: &ScmSession,
        group_id: u64,
        user_id: u64,
    ) -> Result<GroupMember, ScmError>;

    async fn list_members(
        &self,
        session: &ScmSession,
        group_id: u64,
    ) -> Result<Vec<GroupMember>, ScmError>;
}
