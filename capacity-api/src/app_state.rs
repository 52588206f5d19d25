use std::sync::Arc;

use crate::domain::ports::inbound::AllocationService;

#[derive(Clone)]
pub struct AppState {
    pub allocation_service: Arc<dyn AllocationService>,
    /// Months in the rolling window served by assignment and summary routes.
    pub window_months: usize,
}

impl AppState {
    pub fn new(allocation_service: Arc<dyn AllocationService>, window_months: usize) -> Self {
        Self {
            allocation_service,
            window_months,
        }
    }
}
