use serde::{Deserialize, Serialize};

/// How assigned hours compare to a capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Status {
    Met,
    Warning,
    Under,
}

/// Percentage cut-offs used by [`classify_with`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Lowest ratio (percent) reported as [`Status::Warning`].
    pub warning: f64,
    /// Lowest ratio (percent) reported as [`Status::Met`].
    pub met: f64,
}

impl Thresholds {
    pub const DEFAULT: Thresholds = Thresholds {
        warning: 70.0,
        met: 100.0,
    };
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Classifies `assigned` against `total` with the fixed 70% / 100% cut-offs.
///
/// A non-positive `total` is always [`Status::Under`]: a zero budget is
/// never met.
pub fn classify(assigned: f64, total: f64) -> Status {
    classify_with(assigned, total, Thresholds::DEFAULT)
}

pub fn classify_with(assigned: f64, total: f64, thresholds: Thresholds) -> Status {
    let Some(ratio) = utilization(assigned, total) else {
        return Status::Under;
    };

    if ratio >= thresholds.met {
        Status::Met
    } else if ratio >= thresholds.warning {
        Status::Warning
    } else {
        Status::Under
    }
}

/// `assigned / total * 100`, or `None` when `total <= 0`.
pub fn utilization(assigned: f64, total: f64) -> Option<f64> {
    (total > 0.0).then(|| assigned / total * 100.0)
}
