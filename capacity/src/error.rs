use thiserror::Error;

/// Input rejected before anything is written to storage.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("name is required")]
    EmptyName,
    #[error("month must be between 1 and 12, got {0}")]
    InvalidMonth(i64),
    #[error("hours must be a finite, non-negative number")]
    InvalidHours,
    #[error("total hours must be a finite, non-negative number")]
    InvalidTotalHours,
    #[error("unknown category: {0}")]
    UnknownCategory(String),
    #[error("expected {expected} hour values for the window, got {actual}")]
    WindowMismatch { expected: usize, actual: usize },
    #[error("missing field: {0}")]
    MissingField(&'static str),
    #[error("a window starting in year {0} runs past the last representable year")]
    YearOutOfRange(i32),
}
