pub(crate) mod assignments;
pub(crate) mod error;
pub(crate) mod health;
pub(crate) mod hour_entries;
pub(crate) mod overview;
pub(crate) mod projects;
pub(crate) mod resources;

pub(crate) use error::ApiError;
