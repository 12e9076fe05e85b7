//! GitLab backend over the v4 REST API.
//!
//! Every capability is a zero-sized service; the [`ScmSession`] passed to
//! each call supplies the server and token.

mod client;
mod models;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::error::ScmError;
use crate::registry::{Backend, ScmKind};
use crate::session::ScmSession;
use crate::traits::{GroupMemberService, ProjectService, RepositoryService, UserService};
use crate::types::{FileContent, GroupMember, Project, ProjectQuery, TreeEntry, TreeQuery, User};

use client::{encode, get_json};
use models::{GlFile, GlMember, GlProject, GlTreeEntry, GlUser};

pub(crate) static BACKEND: Backend = Backend {
    user: users,
    project: projects,
    repository: repositories,
    group_member: group_members,
};

fn users() -> Arc<dyn UserService> {
    Arc::new(GitLabUsers)
}

fn projects() -> Arc<dyn ProjectService> {
    Arc::new(GitLabProjects)
}

fn repositories() -> Arc<dyn RepositoryService> {
    Arc::new(GitLabRepositories)
}

fn group_members() -> Arc<dyn GroupMemberService> {
    Arc::new(GitLabGroupMembers)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GitLabUsers;

#[derive(Debug, Clone, Copy, Default)]
pub struct GitLabProjects;

#[derive(Debug, Clone, Copy, Default)]
pub struct GitLabRepositories;

#[derive(Debug, Clone, Copy, Default)]
pub struct GitLabGroupMembers;

#[async_trait]
impl UserService for GitLabUsers {
    fn kind(&self) -> ScmKind {
        ScmKind::Gitlab
    }

    async fn current_user(&self, session: &ScmSession) -> Result<User, ScmError> {
        let user: GlUser = get_json(session, "/user", &[]).await?;
        Ok(user.into())
    }
}

#[async_trait]
impl ProjectService for GitLabProjects {
    fn kind(&self) -> ScmKind {
        ScmKind::Gitlab
    }

    async fn get_project(&self, session: &ScmSession, project: &str) -> Result<Project, ScmError> {
        let path = format!("/projects/{}", encode(project));
        let project: GlProject = get_json(session, &path, &[]).await?;
        Ok(project.into())
    }

    async fn list_projects(
        &self,
        session: &ScmSession,
        query: &ProjectQuery,
    ) -> Result<Vec<Project>, ScmError> {
        let mut params = vec![
            ("page", query.page.to_string()),
            ("per_page", query.per_page.to_string()),
        ];
        if query.membership {
            params.push(("membership", "true".to_string()));
        }
        if let Some(search) = &query.search {
            params.push(("search", search.clone()));
        }

        let projects: Vec<GlProject> = get_json(session, "/projects", &params).await?;
        debug!(count = projects.len(), "Listed GitLab projects");
        Ok(projects.into_iter().map(Project::from).collect())
    }
}

#[async_trait]
impl RepositoryService for GitLabRepositories {
    fn kind(&self) -> ScmKind {
        ScmKind::Gitlab
    }

    async fn list_tree(
        &self,
        session: &ScmSession,
        project: &str,
        query: &TreeQuery,
    ) -> Result<Vec<TreeEntry>, ScmError> {
        let path = format!("/projects/{}/repository/tree", encode(project));
        let mut params = Vec::new();
        if let Some(dir) = &query.path {
            params.push(("path", dir.clone()));
        }
        if let Some(reference) = &query.reference {
            params.push(("ref", reference.clone()));
        }
        if query.recursive {
            params.push(("recursive", "true".to_string()));
        }

        let entries: Vec<GlTreeEntry> = get_json(session, &path, &params).await?;
        Ok(entries.into_iter().map(TreeEntry::from).collect())
    }

    async fn get_file(
        &self,
        session: &ScmSession,
        project: &str,
        path: &str,
        reference: &str,
    ) -> Result<FileContent, ScmError> {
        let url_path = format!(
            "/projects/{}/repository/files/{}",
            encode(project),
            encode(path)
        );
        let file: GlFile = get_json(session, &url_path, &[("ref", reference.to_string())]).await?;
        FileContent::try_from(file)
    }
}

#[async_trait]
impl GroupMemberService for GitLabGroupMembers {
    fn kind(&self) -> ScmKind {
        ScmKind::Gitlab
    }

    async fn get_member(
        &self,
        session: &ScmSession,
        group_id: u64,
        user_id: u64,
    ) -> Result<GroupMember, ScmError> {
        let path = format!("/groups/{group_id}/members/{user_id}");
        let member: GlMember = get_json(session, &path, &[]).await?;
        Ok(member.into())
    }

    async fn list_members(
        &self,
        session: &ScmSession,
        group_id: u64,
    ) -> Result<Vec<GroupMember>, ScmError> {
        let path = format!("/groups/{group_id}/members");
        let members: Vec<GlMember> = get_json(session, &path, &[]).await?;
        Ok(members.into_iter().map(GroupMember::from).collect())
    }
}
