//! Unit definitions organized by category

use std::collections::HashMap;
use std::sync::LazyLock;
use crate::{AffineUnit, CategoryTable, LinearUnit, UnitCategory};

/// Global unit registry
pub static UNITS: LazyLock<UnitRegistry> = LazyLock::new(UnitRegistry::new);

// Exact SI definitions of the imperial/US units
const INCH_M: f64 = 0.0254;
const FOOT_M: f64 = 0.3048;
const YARD_M: f64 = 0.9144;
const MILE_M: f64 = 1609.344;
const NAUTICAL_MILE_M: f64 = 1852.0;
const POUND_KG: f64 = 0.45359237;
const OUNCE_KG: f64 = 0.028349523125;
const STONE_KG: f64 = 6.35029318;
const GALLON_L: f64 = 3.785411784;

/// Registry of every category table, keyed by category
pub struct UnitRegistry {
    tables: HashMap<UnitCategory, CategoryTable>,
    /// Normalized name or alias -> row in the category's table
    index: HashMap<UnitCategory, HashMap<String, usize>>,
}

impl UnitRegistry {
    pub fn new() -> Self {
        let mut registry = UnitRegistry {
            tables: HashMap::new(),
            index: HashMap::new(),
        };
        registry.register_all_units();
        registry
    }

    /// Table for a category
    pub fn table(&self, category: UnitCategory) -> Option<&CategoryTable> {
        self.tables.get(&category)
    }

    /// Find a unit by canonical name or alias. Matching ignores case,
    /// surrounding whitespace, and treats spaces and hyphens as underscores.
    pub fn lookup(&self, category: UnitCategory, unit: &str) -> Option<usize> {
        self.index.get(&category)?.get(&normalize(unit)).copied()
    }

    fn register(&mut self, category: UnitCategory, table: CategoryTable) {
        let mut keys = HashMap::new();
        for row in 0..table.len() {
            for key in table.keys(row) {
                let previous = keys.insert(normalize(key), row);
                debug_assert!(previous.is_none(), "duplicate unit key '{}' in {}", key, category);
            }
        }
        self.index.insert(category, keys);
        self.tables.insert(category, table);
    }

    fn register_all_units(&mut self) {
        self.register_length_units();
        self.register_weight_units();
        self.register_volume_units();
        self.register_area_units();
        self.register_time_units();
        self.register_speed_units();
        self.register_data_units();
        self.register_temperature_units();
    }

    fn register_length_units(&mut self) {
        self.register(UnitCategory::Length, CategoryTable::Linear(vec![
            linear("meters", "Meters", 1.0, &["m", "meter", "metre", "metres"]),
            linear("kilometers", "Kilometers", 0.001, &["km", "kilometer", "kilometre", "kilometres"]),
            linear("centimeters", "Centimeters", 100.0, &["cm", "centimeter", "centimetre"]),
            linear("millimeters", "Millimeters", 1000.0, &["mm", "millimeter", "millimetre"]),
            linear("micrometers", "Micrometers", 1e6, &["um", "µm", "micrometer", "micron", "microns"]),
            linear("inches", "Inches", 1.0 / INCH_M, &["in", "inch"]),
            linear("feet", "Feet", 1.0 / FOOT_M, &["ft", "foot"]),
            linear("yards", "Yards", 1.0 / YARD_M, &["yd", "yard"]),
            linear("miles", "Miles", 1.0 / MILE_M, &["mi", "mile"]),
            linear("nautical_miles", "Nautical miles", 1.0 / NAUTICAL_MILE_M, &["nmi", "nautical_mile"]),
        ]));
    }

    fn register_weight_units(&mut self) {
        self.register(UnitCategory::Weight, CategoryTable::Linear(vec![
            linear("kilograms", "Kilograms", 1.0, &["kg", "kilogram", "kilo", "kilos"]),
            linear("grams", "Grams", 1000.0, &["g", "gram"]),
            linear("milligrams", "Milligrams", 1e6, &["mg", "milligram"]),
            linear("tonnes", "Tonnes", 0.001, &["t", "tonne", "metric_ton"]),
            linear("pounds", "Pounds", 1.0 / POUND_KG, &["lb", "lbs", "pound"]),
            linear("ounces", "Ounces", 1.0 / OUNCE_KG, &["oz", "ounce"]),
            linear("stones", "Stones", 1.0 / STONE_KG, &["st", "stone"]),
        ]));
    }

    fn register_volume_units(&mut self) {
        self.register(UnitCategory::Volume, CategoryTable::Linear(vec![
            linear("liters", "Liters", 1.0, &["l", "liter", "litre", "litres"]),
            linear("milliliters", "Milliliters", 1000.0, &["ml", "milliliter", "millilitre"]),
            linear("cubic_meters", "Cubic meters", 0.001, &["m3", "m³", "cubic_meter"]),
            // US customary, all defined from the US liquid gallon
            linear("gallons", "Gallons (US)", 1.0 / GALLON_L, &["gal", "gallon"]),
            linear("quarts", "Quarts (US)", 4.0 / GALLON_L, &["qt", "quart"]),
            linear("pints", "Pints (US)", 8.0 / GALLON_L, &["pt", "pint"]),
            linear("cups", "Cups (US)", 16.0 / GALLON_L, &["cup"]),
            linear("fluid_ounces", "Fluid ounces (US)", 128.0 / GALLON_L, &["fl_oz", "floz", "fluid_ounce"]),
            linear("tablespoons", "Tablespoons (US)", 256.0 / GALLON_L, &["tbsp", "tablespoon"]),
            linear("teaspoons", "Teaspoons (US)", 768.0 / GALLON_L, &["tsp", "teaspoon"]),
        ]));
    }

    fn register_area_units(&mut self) {
        self.register(UnitCategory::Area, CategoryTable::Linear(vec![
            linear("square_meters", "Square meters", 1.0, &["m2", "m²", "sq_m", "square_meter"]),
            linear("square_kilometers", "Square kilometers", 1e-6, &["km2", "km²", "sq_km", "square_kilometer"]),
            linear("square_centimeters", "Square centimeters", 1e4, &["cm2", "cm²", "sq_cm", "square_centimeter"]),
            linear("hectares", "Hectares", 1e-4, &["ha", "hectare"]),
            linear("acres", "Acres", 1.0 / 4046.8564224, &["ac", "acre"]),
            linear("square_feet", "Square feet", 1.0 / (FOOT_M * FOOT_M), &["ft2", "ft²", "sq_ft", "square_foot"]),
            linear("square_inches", "Square inches", 1.0 / (INCH_M * INCH_M), &["in2", "in²", "sq_in", "square_inch"]),
            linear("square_yards", "Square yards", 1.0 / (YARD_M * YARD_M), &["yd2", "yd²", "sq_yd", "square_yard"]),
            linear("square_miles", "Square miles", 1.0 / (MILE_M * MILE_M), &["mi2", "mi²", "sq_mi", "square_mile"]),
        ]));
    }

    fn register_time_units(&mut self) {
        self.register(UnitCategory::Time, CategoryTable::Linear(vec![
            linear("seconds", "Seconds", 1.0, &["s", "sec", "secs", "second"]),
            linear("milliseconds", "Milliseconds", 1000.0, &["ms", "millisecond"]),
            linear("minutes", "Minutes", 1.0 / 60.0, &["min", "mins", "minute"]),
            linear("hours", "Hours", 1.0 / 3600.0, &["h", "hr", "hrs", "hour"]),
            linear("days", "Days", 1.0 / 86400.0, &["d", "day"]),
            linear("weeks", "Weeks", 1.0 / 604800.0, &["wk", "week"]),
        ]));
    }

    fn register_speed_units(&mut self) {
        self.register(UnitCategory::Speed, CategoryTable::Linear(vec![
            linear("meters_per_second", "Meters per second", 1.0, &["m/s", "mps"]),
            linear("kilometers_per_hour", "Kilometers per hour", 3.6, &["km/h", "kmh", "kph"]),
            linear("miles_per_hour", "Miles per hour", 3600.0 / MILE_M, &["mph", "mi/h"]),
            linear("knots", "Knots", 3600.0 / NAUTICAL_MILE_M, &["kn", "kt", "knot"]),
            linear("feet_per_second", "Feet per second", 1.0 / FOOT_M, &["ft/s", "fps"]),
        ]));
    }

    fn register_data_units(&mut self) {
        // Decimal (SI) multiples. No "kb"/"MB" style aliases: lookup ignores
        // case, so they cannot tell bits from bytes.
        self.register(UnitCategory::Data, CategoryTable::Linear(vec![
            linear("bytes", "Bytes", 1.0, &["byte"]),
            linear("bits", "Bits", 8.0, &["bit"]),
            linear("kilobytes", "Kilobytes", 1e-3, &["kilobyte"]),
            linear("megabytes", "Megabytes", 1e-6, &["megabyte"]),
            linear("gigabytes", "Gigabytes", 1e-9, &["gigabyte"]),
            linear("terabytes", "Terabytes", 1e-12, &["terabyte"]),
        ]));
    }

    fn register_temperature_units(&mut self) {
        // Celsius is the base; listed first
        self.register(UnitCategory::Temperature, CategoryTable::Affine(vec![
            AffineUnit {
                name: "celsius",
                label: "Celsius",
                aliases: &["c", "°c", "degc"],
                to_base: celsius_identity,
                from_base: celsius_identity,
            },
            AffineUnit {
                name: "fahrenheit",
                label: "Fahrenheit",
                aliases: &["f", "°f", "degf"],
                to_base: fahrenheit_to_celsius,
                from_base: celsius_to_fahrenheit,
            },
            AffineUnit {
                name: "kelvin",
                label: "Kelvin",
                aliases: &["k"],
                to_base: kelvin_to_celsius,
                from_base: celsius_to_kelvin,
            },
            AffineUnit {
                name: "rankine",
                label: "Rankine",
                aliases: &["r", "°r", "degr"],
                to_base: rankine_to_celsius,
                from_base: celsius_to_rankine,
            },
        ]));
    }
}

impl Default for UnitRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn linear(name: &'static str, label: &'static str, factor: f64, aliases: &'static [&'static str]) -> LinearUnit {
    LinearUnit { name, label, factor, aliases }
}

fn normalize(unit: &str) -> String {
    unit.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect()
}

fn celsius_identity(v: f64) -> f64 {
    v
}

fn fahrenheit_to_celsius(v: f64) -> f64 {
    (v - 32.0) * 5.0 / 9.0
}

fn celsius_to_fahrenheit(v: f64) -> f64 {
    v * 9.0 / 5.0 + 32.0
}

fn kelvin_to_celsius(v: f64) -> f64 {
    v - 273.15
}

fn celsius_to_kelvin(v: f64) -> f64 {
    v + 273.15
}

fn rankine_to_celsius(v: f64) -> f64 {
    (v - 491.67) * 5.0 / 9.0
}

fn celsius_to_rankine(v: f64) -> f64 {
    (v + 273.15) * 9.0 / 5.0
}
