#[cfg(test)]
mod mock;
pub mod postgres;

#[cfg(test)]
pub use mock::MockAllocationStore;
