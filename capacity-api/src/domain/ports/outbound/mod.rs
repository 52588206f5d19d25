mod allocation_store;

pub use allocation_store::*;
