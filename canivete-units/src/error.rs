//! Conversion errors

use crate::UnitCategory;
use thiserror::Error;

/// Machine-readable error codes
pub mod codes {
    pub const UNKNOWN_CATEGORY: &str = "UNKNOWN_CATEGORY";
    pub const UNKNOWN_UNIT: &str = "UNKNOWN_UNIT";
}

/// Errors returned by the conversion engine.
///
/// Out-of-range or non-finite values are not errors; they pass through
/// the arithmetic unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitsError {
    /// Category name not present in the static tables
    #[error("unknown category: {0}")]
    UnknownCategory(String),

    /// Unit name not present in the resolved category's table
    #[error("unknown unit '{unit}' for category {category}")]
    UnknownUnit { category: UnitCategory, unit: String },
}

impl UnitsError {
    /// Stable error code for callers that report errors as data
    pub fn code(&self) -> &'static str {
        match self {
            UnitsError::UnknownCategory(_) => codes::UNKNOWN_CATEGORY,
            UnitsError::UnknownUnit { .. } => codes::UNKNOWN_UNIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let e = UnitsError::UnknownCategory("color".to_string());
        assert_eq!(e.code(), codes::UNKNOWN_CATEGORY);

        let e = UnitsError::UnknownUnit {
            category: UnitCategory::Length,
            unit: "furlongs".to_string(),
        };
        assert_eq!(e.code(), codes::UNKNOWN_UNIT);
    }

    #[test]
    fn test_error_display() {
        let e = UnitsError::UnknownUnit {
            category: UnitCategory::Weight,
            unit: "bushels".to_string(),
        };
        assert_eq!(e.to_string(), "unknown unit 'bushels' for category weight");
        assert_eq!(
            UnitsError::UnknownCategory("color".to_string()).to_string(),
            "unknown category: color"
        );
    }
}
