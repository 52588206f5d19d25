mod allocation;

pub use allocation::*;
