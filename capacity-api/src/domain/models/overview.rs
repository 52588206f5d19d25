use capacity::{MonthlyReconciliation, Resource};

/// A resource's assigned hours and statuses for a single month.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceMonthOverview {
    pub resource: Resource,
    pub month: MonthlyReconciliation,
}
