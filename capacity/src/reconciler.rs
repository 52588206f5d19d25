use serde::Serialize;

use crate::{
    aggregate, classify, normalize, HourEntry, MonthlySummary, NormalizationReport, RawHourEntry,
    RawResource, Resource, Status, Window,
};

/// A monthly summary with a status per capacity bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReconciliation {
    #[serde(flatten)]
    pub summary: MonthlySummary,
    pub project_status: Status,
    pub maintenance_status: Status,
    pub total_status: Status,
}

impl From<MonthlySummary> for MonthlyReconciliation {
    fn from(summary: MonthlySummary) -> Self {
        let capacity = summary.capacity;
        Self {
            summary,
            project_status: classify(summary.sum_project, capacity.project),
            maintenance_status: classify(summary.sum_maintenance, capacity.maintenance),
            total_status: classify(summary.total_assigned, capacity.total),
        }
    }
}

/// Result of reconciling raw rows for one resource.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    pub resource: Resource,
    pub months: Vec<MonthlyReconciliation>,
    pub report: NormalizationReport,
}

pub fn reconcile(
    resource: &Resource,
    entries: &[HourEntry],
    window: &Window,
) -> Vec<MonthlyReconciliation> {
    aggregate(resource, entries, window)
        .into_iter()
        .map(MonthlyReconciliation::from)
        .collect()
}

/// Normalize, aggregate and classify in one pass.
pub fn reconcile_raw(
    raw_entries: &[RawHourEntry],
    raw_resource: &RawResource,
    window: &Window,
) -> Reconciliation {
    let normalized = normalize(raw_entries, raw_resource);
    let months = reconcile(&normalized.resource, &normalized.hour_entries, window);

    Reconciliation {
        resource: normalized.resource,
        months,
        report: normalized.report,
    }
}
