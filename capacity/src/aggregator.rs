use serde::Serialize;

use crate::{Capacity, Category, HourEntry, MonthYear, Resource, Window};

/// Assigned hours for one window month next to the resource's capacity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    pub month: u8,
    pub year: i32,
    pub sum_project: f64,
    pub sum_maintenance: f64,
    pub total_assigned: f64,
    /// Same for every month of a window; budgets do not vary by month.
    pub capacity: Capacity,
}

impl MonthlySummary {
    pub fn period(&self) -> MonthYear {
        MonthYear {
            month: self.month,
            year: self.year,
        }
    }

    pub fn assigned(&self, category: Category) -> f64 {
        match category {
            Category::Project => self.sum_project,
            Category::Maintenance => self.sum_maintenance,
        }
    }
}

/// Sums `entries` per window month and category, one summary per window
/// element in window order.
pub fn aggregate(resource: &Resource, entries: &[HourEntry], window: &Window) -> Vec<MonthlySummary> {
    let capacity = resource.capacity();

    window
        .iter()
        .map(|period| {
            let in_month = || entries.iter().filter(move |e| e.period == *period);
            let sum_project = sum_category(in_month(), Category::Project);
            let sum_maintenance = sum_category(in_month(), Category::Maintenance);

            MonthlySummary {
                month: period.month,
                year: period.year,
                sum_project,
                sum_maintenance,
                total_assigned: sum_project + sum_maintenance,
                capacity,
            }
        })
        .collect()
}

fn sum_category<'a>(entries: impl Iterator<Item = &'a HourEntry>, category: Category) -> f64 {
    entries
        .filter(|e| e.category == category)
        .map(|e| e.hours)
        .sum()
}
