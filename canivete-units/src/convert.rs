//! Conversion entry points over the static unit tables

use serde::{Deserialize, Serialize};
use crate::{UnitCategory, UnitInfo, UnitsError};

/// Convert `value` between two units of `category`.
///
/// Both units are resolved by name or alias inside the category. Conversion
/// always goes through the category's base unit; converting a unit to itself
/// returns `value` unchanged. NaN and infinities pass through the arithmetic.
pub fn convert(category: &str, value: f64, from_unit: &str, to_unit: &str) -> Result<f64, UnitsError> {
    let category: UnitCategory = category.parse()?;
    category.convert(value, from_unit, to_unit)
}

/// Canonical unit names of a category, base unit first
pub fn list_units(category: &str) -> Result<Vec<&'static str>, UnitsError> {
    let category: UnitCategory = category.parse()?;
    Ok(category.table()?.names())
}

/// Units of a category with labels and aliases
pub fn describe_units(category: &str) -> Result<Vec<UnitInfo>, UnitsError> {
    let category: UnitCategory = category.parse()?;
    Ok(category.table()?.info())
}

/// Every known category
pub fn list_categories() -> &'static [UnitCategory] {
    &UnitCategory::ALL
}

/// Name of the category's base unit
pub fn base_unit(category: &str) -> Result<&'static str, UnitsError> {
    let category: UnitCategory = category.parse()?;
    category
        .table()?
        .base_unit()
        .ok_or_else(|| UnitsError::UnknownCategory(category.name().to_string()))
}

/// Express `value` (given in `unit`) in the category's base unit
pub fn to_base(category: &str, value: f64, unit: &str) -> Result<f64, UnitsError> {
    let category: UnitCategory = category.parse()?;
    let table = category.table()?;
    let row = category.resolve(unit)?;
    Ok(table.to_base_index(value, row))
}

/// A single conversion request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversion {
    pub category: UnitCategory,
    pub value: f64,
    pub from_unit: String,
    pub to_unit: String,
}

impl Conversion {
    pub fn new(category: UnitCategory, value: f64, from_unit: impl Into<String>, to_unit: impl Into<String>) -> Self {
        Conversion {
            category,
            value,
            from_unit: from_unit.into(),
            to_unit: to_unit.into(),
        }
    }

    pub fn run(&self) -> Result<f64, UnitsError> {
        self.category.convert(self.value, &self.from_unit, &self.to_unit)
    }
}
