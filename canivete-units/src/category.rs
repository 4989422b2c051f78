//! Unit categories

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::{CategoryTable, UnitsError, UNITS};

/// A domain of mutually convertible units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitCategory {
    Length,
    Weight,
    Volume,
    Area,
    Time,
    Speed,
    Data,
    Temperature,
}

impl UnitCategory {
    /// Every category, in presentation order
    pub const ALL: [UnitCategory; 8] = [
        UnitCategory::Length,
        UnitCategory::Weight,
        UnitCategory::Volume,
        UnitCategory::Area,
        UnitCategory::Time,
        UnitCategory::Speed,
        UnitCategory::Data,
        UnitCategory::Temperature,
    ];

    /// Lowercase category name
    pub fn name(&self) -> &'static str {
        match self {
            UnitCategory::Length => "length",
            UnitCategory::Weight => "weight",
            UnitCategory::Volume => "volume",
            UnitCategory::Area => "area",
            UnitCategory::Time => "time",
            UnitCategory::Speed => "speed",
            UnitCategory::Data => "data",
            UnitCategory::Temperature => "temperature",
        }
    }

    /// The static unit table for this category
    pub fn table(&self) -> Result<&'static CategoryTable, UnitsError> {
        UNITS
            .table(*self)
            .ok_or_else(|| UnitsError::UnknownCategory(self.name().to_string()))
    }

    /// Convert `value` from one unit of this category to another
    pub fn convert(&self, value: f64, from_unit: &str, to_unit: &str) -> Result<f64, UnitsError> {
        let table = self.table()?;
        let from = self.resolve(from_unit)?;
        let to = self.resolve(to_unit)?;
        let result = table.convert_index(value, from, to);

        tracing::trace!(category = %self, value, from_unit, to_unit, result, "converted");
        Ok(result)
    }

    /// Canonical name of a unit given by name or alias
    pub fn unit_name(&self, unit: &str) -> Result<&'static str, UnitsError> {
        let row = self.resolve(unit)?;
        Ok(self.table()?.names()[row])
    }

    /// Resolve a unit name or alias to its row in the table
    pub(crate) fn resolve(&self, unit: &str) -> Result<usize, UnitsError> {
        UNITS.lookup(*self, unit).ok_or_else(|| UnitsError::UnknownUnit {
            category: *self,
            unit: unit.to_string(),
        })
    }
}

impl FromStr for UnitCategory {
    type Err = UnitsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "length" | "distance" => Ok(UnitCategory::Length),
            "weight" | "mass" => Ok(UnitCategory::Weight),
            "volume" => Ok(UnitCategory::Volume),
            "area" => Ok(UnitCategory::Area),
            "time" | "duration" => Ok(UnitCategory::Time),
            "speed" | "velocity" => Ok(UnitCategory::Speed),
            "data" | "storage" => Ok(UnitCategory::Data),
            "temperature" | "temp" => Ok(UnitCategory::Temperature),
            _ => Err(UnitsError::UnknownCategory(s.to_string())),
        }
    }
}

impl fmt::Display for UnitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
