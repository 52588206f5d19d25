mod allocation_store;
mod conversions;

pub use allocation_store::PostgresAllocationStore;
