//! Static material and product catalogs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Stock thresholds and labels for one raw material
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialMeta {
    /// Name used on the wire
    pub name: &'static str,
    /// Name with chemical formula
    pub display_name: &'static str,
    pub unit: Unit,
    /// Balances strictly below this are low
    pub min_stock: f64,
    /// Balance rendered as a full bar
    pub max_stock: f64,
}

/// Raw materials tracked in inventory
pub const RAW_MATERIALS: &[MaterialMeta] = &[
    MaterialMeta {
        name: "Nitrogen",
        display_name: "Nitrogen (N₂)",
        unit: Unit::Mt,
        min_stock: 500.0,
        max_stock: 2000.0,
    },
    MaterialMeta {
        name: "Sulphuric Acid",
        display_name: "Sulphuric Acid (H₂SO₄)",
        unit: Unit::Mt,
        min_stock: 400.0,
        max_stock: 1500.0,
    },
    MaterialMeta {
        name: "Caustic Soda",
        display_name: "Caustic Soda (NaOH)",
        unit: Unit::Mt,
        min_stock: 300.0,
        max_stock: 1200.0,
    },
    MaterialMeta {
        name: "Phosphoric Acid",
        display_name: "Phosphoric Acid (H₃PO₄)",
        unit: Unit::Mt,
        min_stock: 250.0,
        max_stock: 1000.0,
    },
    MaterialMeta {
        name: "Ammonia",
        display_name: "Ammonia (NH₃)",
        unit: Unit::Mt,
        min_stock: 500.0,
        max_stock: 2500.0,
    },
    MaterialMeta {
        name: "Potassium Chloride",
        display_name: "Potassium Chloride (KCl)",
        unit: Unit::Mt,
        min_stock: 200.0,
        max_stock: 800.0,
    },
];

/// Finished products as `(wire name, label)`
pub const PRODUCTS: &[(&str, &str)] = &[
    ("Urea", "Urea"),
    ("DAP", "DAP (Diammonium Phosphate)"),
    ("NPK", "NPK Complex"),
    ("SSP", "SSP (Single Super Phosphate)"),
    ("MOP", "MOP (Muriate of Potash)"),
    ("Ammonium Sulphate", "Ammonium Sulphate"),
];

/// Look up a raw material by wire name
pub fn material(name: &str) -> Option<&'static MaterialMeta> {
    RAW_MATERIALS.iter().find(|m| m.name == name)
}

/// Thresholds for `name`, with a permissive default for materials the
/// catalog does not know about
pub fn material_or_default(name: &str) -> MaterialMeta {
    material(name).copied().unwrap_or(MaterialMeta {
        name: "",
        display_name: "",
        unit: Unit::Mt,
        min_stock: 0.0,
        max_stock: 1000.0,
    })
}

/// Label for a raw material, or the name itself when unknown
pub fn material_display_name(name: &str) -> &str {
    material(name).map(|m| m.display_name).unwrap_or(name)
}

pub fn is_product(name: &str) -> bool {
    PRODUCTS.iter().any(|(p, _)| *p == name)
}

/// Quantity unit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    /// Metric tonnes
    #[default]
    #[serde(rename = "MT")]
    Mt,
    #[serde(rename = "KG")]
    Kg,
    #[serde(rename = "L")]
    L,
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Unit::Mt => "MT",
            Unit::Kg => "KG",
            Unit::L => "L",
        })
    }
}

impl FromStr for Unit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "MT" => Ok(Unit::Mt),
            "KG" => Ok(Unit::Kg),
            "L" => Ok(Unit::L),
            _ => Err(Error::validation(format!("Unknown unit: {}", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_materials_get_default_thresholds() {
        let meta = material_or_default("Helium");
        assert_eq!(meta.min_stock, 0.0);
        assert_eq!(meta.max_stock, 1000.0);
        assert_eq!(material_display_name("Helium"), "Helium");
        assert_eq!(material_display_name("Ammonia"), "Ammonia (NH₃)");
    }

    #[test]
    fn units_parse_case_insensitively() {
        assert_eq!("kg".parse::<Unit>().unwrap(), Unit::Kg);
        assert_eq!(serde_json::to_string(&Unit::Mt).unwrap(), "\"MT\"");
        assert!("ton".parse::<Unit>().is_err());
    }
}
