mod assignment;
mod overview;

pub use assignment::*;
pub use overview::*;
