//! Canivete Units - Category-Based Unit Conversion
//!
//! Converts a value between two units of the same category. Every category
//! routes through a single base unit, so each table holds one entry per unit.
//!
//! Categories:
//! - Length (meters, km, ft, mi, etc.)
//! - Weight (kilograms, g, lb, oz, etc.)
//! - Volume (liters, mL, gal, cup, etc.)
//! - Area (square meters, ha, acre, etc.)
//! - Time (seconds, min, h, d, etc.)
//! - Speed (m/s, km/h, mph, knots, etc.)
//! - Data (bytes, bits, KB, MB, etc.)
//! - Temperature (celsius, fahrenheit, kelvin, rankine)
//!
//! Length, weight and the other ratio-scale categories use a linear factor
//! table. Temperature is affine and keeps a `to_base`/`from_base` pair per
//! unit instead. Interval-scale units must never be added to a linear table.

mod category;
mod convert;
mod error;
mod unit;
mod units;

pub use category::UnitCategory;
pub use convert::{
    base_unit, convert, describe_units, list_categories, list_units, to_base, Conversion,
};
pub use error::{codes, UnitsError};
pub use unit::{AffineUnit, CategoryTable, LinearUnit, UnitInfo};
pub use units::{UnitRegistry, UNITS};
