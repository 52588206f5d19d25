mod category;
mod hour_entry;
mod ids;
mod month;
mod project;
mod resource;

pub use category::*;
pub use hour_entry::*;
pub use ids::*;
pub use month::*;
pub use project::*;
pub use resource::*;
