use std::collections::HashMap;

use serde_json::Value;

use crate::{
    Category, HourEntry, MonthYear, ProjectId, RawHourEntry, RawResource, Resource, ResourceId,
};

/// Output of [`normalize`].
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub hour_entries: Vec<HourEntry>,
    pub resource: Resource,
    pub report: NormalizationReport,
}

/// Counts of what normalization discarded or merged.
///
/// Dropped rows are not errors: the source legitimately holds half-edited
/// rows. The counts exist so callers can surface them as diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizationReport {
    /// Rows with an unusable month, year, category or hours value.
    pub dropped: usize,
    /// Rows that repeated an earlier (resource, project, month, year) key.
    pub conflicts: usize,
}

impl NormalizationReport {
    pub fn is_clean(&self) -> bool {
        self.dropped == 0 && self.conflicts == 0
    }
}

pub fn normalize(raw_entries: &[RawHourEntry], raw_resource: &RawResource) -> Normalized {
    let (hour_entries, report) = normalize_entries(raw_entries);

    Normalized {
        hour_entries,
        resource: normalize_resource(raw_resource),
        report,
    }
}

/// Normalizes every row, silently skipping invalid ones.
///
/// Rows sharing a (resource, project, month, year) key collapse into one entry at the
/// position of the first occurrence, holding the last row's values; storage
/// upserts behave the same way.
pub fn normalize_entries(raw_entries: &[RawHourEntry]) -> (Vec<HourEntry>, NormalizationReport) {
    let mut report = NormalizationReport::default();
    let mut entries: Vec<HourEntry> = Vec::with_capacity(raw_entries.len());
    let mut seen: HashMap<(Option<i32>, ProjectId, MonthYear), usize> = HashMap::new();

    for raw in raw_entries {
        let Some(entry) = normalize_entry(raw) else {
            report.dropped += 1;
            continue;
        };

        let Some(project_id) = entry.project_id else {
            entries.push(entry);
            continue;
        };

        let key = (raw.resource_id, project_id, entry.period);
        match seen.get(&key) {
            Some(&index) => {
                report.conflicts += 1;
                entries[index] = entry;
            }
            None => {
                seen.insert(key, entries.len());
                entries.push(entry);
            }
        }
    }

    (entries, report)
}

/// Normalizes a single row, or `None` when any required field is unusable.
pub fn normalize_entry(raw: &RawHourEntry) -> Option<HourEntry> {
    let month = u8::try_from(parse_integer(&raw.month)?).ok()?;
    // A missing year drops the row instead of assuming the current year.
    let year = i32::try_from(parse_integer(&raw.year)?).ok()?;
    let period = MonthYear::new(month, year).ok()?;
    let category = resolve_category(raw)?;
    let hours = parse_finite(&raw.hours).filter(|h| *h >= 0.0)?;

    Some(HourEntry {
        project_id: raw.project_id.map(ProjectId::new),
        period,
        category,
        hours,
    })
}

/// Coerces budget fields, defaulting anything unusable to 0.
pub fn normalize_resource(raw: &RawResource) -> Resource {
    let total_hours = parse_finite(&raw.total_hours)
        .filter(|h| *h >= 0.0)
        .unwrap_or(0.0);

    Resource {
        id: ResourceId::new(raw.id.unwrap_or_default()),
        name: raw.name.as_deref().map(str::trim).unwrap_or_default().to_string(),
        project_percent: coerce_percent(&raw.project_percent),
        maintenance_percent: coerce_percent(&raw.maintenance_percent),
        total_hours,
    }
}

/// Reads a percentage such as `55`, `"55%"` or `"55,5"`; unusable input is 0.
/// Only surrounding whitespace and a trailing `%` are stripped from strings.
/// The result is clamped to [0, 100].
pub fn coerce_percent(value: &Value) -> f64 {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let cleaned = s.trim().trim_end_matches('%').trim_end().replacen(',', ".", 1);
            cleaned
                .chars()
                .all(|c| c.is_ascii_digit() || c == '.' || c == '-')
                .then(|| cleaned.parse::<f64>().ok())
                .flatten()
        }
        _ => None,
    };

    clamp_percent(n.unwrap_or(0.0))
}

/// NaN and negatives become 0, anything above 100 becomes 100.
pub fn clamp_percent(n: f64) -> f64 {
    if n.is_nan() {
        return 0.0;
    }
    n.clamp(0.0, 100.0)
}

fn resolve_category(raw: &RawHourEntry) -> Option<Category> {
    let joined = raw.project.as_ref().and_then(|p| p.category.as_deref());
    [raw.category.as_deref(), joined]
        .into_iter()
        .flatten()
        .find_map(|tag| tag.parse().ok())
}

fn parse_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            let f = n.as_f64()?;
            (f.is_finite() && f.fract() == 0.0).then_some(f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn parse_finite(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }?;

    n.is_finite().then_some(n)
}
