//! Composition root.
//!
//! This is the only place that imports concrete outbound adapters.

use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    adapters::outbound::postgres::PostgresAllocationStore,
    domain::{ports::inbound::AllocationService, services::AllocationServiceImpl},
    repositories::{HourEntryRepositoryImpl, ProjectRepositoryImpl, ResourceRepositoryImpl},
};

/// Builds the PostgreSQL-backed allocation service.
pub fn allocation_service(pool: PgPool) -> Arc<dyn AllocationService> {
    let store = PostgresAllocationStore::new(
        Arc::new(ResourceRepositoryImpl::new(pool.clone())),
        Arc::new(ProjectRepositoryImpl::new(pool.clone())),
        Arc::new(HourEntryRepositoryImpl::new(pool)),
    );

    Arc::new(AllocationServiceImpl::new(Arc::new(store)))
}
