#![warn(clippy::pedantic)]
// -----------------------------------------------------------------------------
// Documentation: error conditions are described on ScmError
// -----------------------------------------------------------------------------
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
// -----------------------------------------------------------------------------
// API Design Choices
// -----------------------------------------------------------------------------
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # SCM
//!
//! Provider selection and capability services for source control servers.
//!
//! [`ScmFactory`] maps an integer provider code to a backend and builds one
//! of four capability services from it: users, projects, repositories and
//! group members. GitLab is implemented; GitHub is a recognized code without
//! a backend.
//!
//! ```no_run
//! # async fn run() -> Result<(), scm::ScmError> {
//! use scm::{ScmFactory, ScmKind, ScmSession};
//!
//! let session = ScmSession::new("https://gitlab.example.com", "glpat-token")?;
//! let users = ScmFactory::new().new_user(ScmKind::Gitlab.code())?;
//! let me = users.current_user(&session).await?;
//! println!("{}", me.username);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod factory;
pub mod gitlab;
pub mod registry;
pub mod session;
pub mod traits;
pub mod types;

pub use error::ScmError;
pub use factory::ScmFactory;
pub use registry::ScmKind;
pub use session::ScmSession;
pub use traits::{GroupMemberService, ProjectService, RepositoryService, UserService};
pub use types::{
    AccessLevel, EntryType, FileContent, GroupMember, Namespace, Project, ProjectQuery,
    TreeEntry, TreeQuery, User,
};
