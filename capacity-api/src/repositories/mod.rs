mod hour_entry_repo;
mod project_repo;
mod repo_error;
mod resource_repo;

pub use hour_entry_repo::*;
pub use project_repo::*;
pub use repo_error::RepositoryError;
pub use resource_repo::*;
