//! Unit descriptors and per-category tables

use serde::Serialize;

/// A ratio-scale unit. `factor` of these units make one base unit, so
/// `base = value / factor` and `value = base * factor`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearUnit {
    pub name: &'static str,
    pub label: &'static str,
    pub factor: f64,
    pub aliases: &'static [&'static str],
}

impl LinearUnit {
    pub fn is_base(&self) -> bool {
        self.factor == 1.0
    }

    pub fn to_base(&self, value: f64) -> f64 {
        value / self.factor
    }

    pub fn from_base(&self, base: f64) -> f64 {
        base * self.factor
    }
}

/// An interval-scale unit related to the base unit by scale and offset
#[derive(Debug, Clone, Copy)]
pub struct AffineUnit {
    pub name: &'static str,
    pub label: &'static str,
    pub aliases: &'static [&'static str],
    pub to_base: fn(f64) -> f64,
    pub from_base: fn(f64) -> f64,
}

/// The units of one category, base unit first.
#[derive(Debug, Clone)]
pub enum CategoryTable {
    Linear(Vec<LinearUnit>),
    Affine(Vec<AffineUnit>),
}

impl CategoryTable {
    /// Canonical unit names in table order
    pub fn names(&self) -> Vec<&'static str> {
        match self {
            CategoryTable::Linear(units) => units.iter().map(|u| u.name).collect(),
            CategoryTable::Affine(units) => units.iter().map(|u| u.name).collect(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            CategoryTable::Linear(units) => units.len(),
            CategoryTable::Affine(units) => units.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_affine(&self) -> bool {
        matches!(self, CategoryTable::Affine(_))
    }

    /// Name of the base unit. Affine tables list their base first.
    pub fn base_unit(&self) -> Option<&'static str> {
        match self {
            CategoryTable::Linear(units) => units.iter().find(|u| u.is_base()).map(|u| u.name),
            CategoryTable::Affine(units) => units.first().map(|u| u.name),
        }
    }

    /// Name plus every alias for the unit at `index`
    pub(crate) fn keys(&self, index: usize) -> Vec<&'static str> {
        let (name, aliases) = match self {
            CategoryTable::Linear(units) => (units[index].name, units[index].aliases),
            CategoryTable::Affine(units) => (units[index].name, units[index].aliases),
        };
        std::iter::once(name).chain(aliases.iter().copied()).collect()
    }

    /// Express `value` (in the unit at `index`) in the base unit
    pub(crate) fn to_base_index(&self, value: f64, index: usize) -> f64 {
        match self {
            CategoryTable::Linear(units) => units[index].to_base(value),
            CategoryTable::Affine(units) => (units[index].to_base)(value),
        }
    }

    /// Convert between two rows of this table, always through the base unit.
    /// Same-row conversions return `value` untouched.
    pub(crate) fn convert_index(&self, value: f64, from: usize, to: usize) -> f64 {
        if from == to {
            return value;
        }
        match self {
            CategoryTable::Linear(units) => units[to].from_base(units[from].to_base(value)),
            CategoryTable::Affine(units) => (units[to].from_base)((units[from].to_base)(value)),
        }
    }

    pub(crate) fn info(&self) -> Vec<UnitInfo> {
        let base = self.base_unit();
        let describe = |name: &'static str, label: &'static str, aliases: &'static [&'static str]| UnitInfo {
            name,
            label,
            aliases: aliases.to_vec(),
            base: Some(name) == base,
        };
        match self {
            CategoryTable::Linear(units) => units.iter().map(|u| describe(u.name, u.label, u.aliases)).collect(),
            CategoryTable::Affine(units) => units.iter().map(|u| describe(u.name, u.label, u.aliases)).collect(),
        }
    }
}

/// Description of a unit for caller-side pickers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitInfo {
    pub name: &'static str,
    pub label: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<&'static str>,
    pub base: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meters() -> LinearUnit {
        LinearUnit { name: "meters", label: "Meters", factor: 1.0, aliases: &["m"] }
    }

    fn centimeters() -> LinearUnit {
        LinearUnit { name: "centimeters", label: "Centimeters", factor: 100.0, aliases: &["cm"] }
    }

    fn identity(v: f64) -> f64 {
        v
    }

    fn c_to_k(v: f64) -> f64 {
        v + 273.15
    }

    fn k_to_c(v: f64) -> f64 {
        v - 273.15
    }

    fn temperature() -> CategoryTable {
        CategoryTable::Affine(vec![
            AffineUnit { name: "celsius", label: "Celsius", aliases: &[], to_base: identity, from_base: identity },
            AffineUnit { name: "kelvin", label: "Kelvin", aliases: &["k"], to_base: k_to_c, from_base: c_to_k },
        ])
    }

    #[test]
    fn test_linear_base() {
        assert!(meters().is_base());
        assert!(!centimeters().is_base());
    }

    #[test]
    fn test_linear_to_from_base() {
        let cm = centimeters();
        assert_eq!(cm.to_base(250.0), 2.5);
        assert_eq!(cm.from_base(2.5), 250.0);
    }

    #[test]
    fn test_linear_table() {
        let table = CategoryTable::Linear(vec![meters(), centimeters()]);
        assert_eq!(table.names(), vec!["meters", "centimeters"]);
        assert_eq!(table.base_unit(), Some("meters"));
        assert!(!table.is_affine());
        assert_eq!(table.convert_index(1.0, 0, 1), 100.0);
        assert_eq!(table.keys(1), vec!["centimeters", "cm"]);
    }

    #[test]
    fn test_affine_table() {
        let table = temperature();
        assert!(table.is_affine());
        assert_eq!(table.base_unit(), Some("celsius"));
        assert_eq!(table.convert_index(0.0, 0, 1), 273.15);
        assert_eq!(table.to_base_index(273.15, 1), 0.0);
    }

    #[test]
    fn test_same_row_is_identity() {
        let table = temperature();
        let v = 0.1 + 0.2;
        assert_eq!(table.convert_index(v, 1, 1), v);
    }

    #[test]
    fn test_info_marks_base() {
        let info = CategoryTable::Linear(vec![meters(), centimeters()]).info();
        assert!(info[0].base);
        assert!(!info[1].base);
        assert_eq!(info[1].aliases, vec!["cm"]);
    }
}
