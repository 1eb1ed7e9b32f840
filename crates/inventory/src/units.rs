//! Units of measure, passed around explicitly instead of living in a global registry.

use serde::{Deserialize, Serialize};

use warehouse_core::ValueObject;

/// Unit of length. Base unit is the metre.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    Millimetre,
    Centimetre,
    Metre,
    Inch,
    Foot,
}

impl LengthUnit {
    /// Metres per one of this unit.
    pub fn to_metres(self) -> f64 {
        match self {
            LengthUnit::Millimetre => 0.001,
            LengthUnit::Centimetre => 0.01,
            LengthUnit::Metre => 1.0,
            LengthUnit::Inch => 0.0254,
            LengthUnit::Foot => 0.3048,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            LengthUnit::Millimetre => "mm",
            LengthUnit::Centimetre => "cm",
            LengthUnit::Metre => "m",
            LengthUnit::Inch => "in",
            LengthUnit::Foot => "ft",
        }
    }
}

/// Unit of mass. Base unit is the kilogram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MassUnit {
    Gram,
    Kilogram,
    Tonne,
    Pound,
}

impl MassUnit {
    /// Kilograms per one of this unit.
    pub fn to_kilograms(self) -> f64 {
        match self {
            MassUnit::Gram => 0.001,
            MassUnit::Kilogram => 1.0,
            MassUnit::Tonne => 1000.0,
            MassUnit::Pound => 0.453_592_37,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            MassUnit::Gram => "g",
            MassUnit::Kilogram => "kg",
            MassUnit::Tonne => "t",
            MassUnit::Pound => "lb",
        }
    }
}

/// The units a warehouse records its measurements in.
///
/// Handed to constructors that take bare numbers, e.g.
/// [`crate::SpatialDimensions::with_units`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitConfig {
    pub length: LengthUnit,
    pub mass: MassUnit,
}

impl UnitConfig {
    pub fn new(length: LengthUnit, mass: MassUnit) -> Self {
        Self { length, mass }
    }
}

impl Default for UnitConfig {
    fn default() -> Self {
        Self {
            length: LengthUnit::Metre,
            mass: MassUnit::Kilogram,
        }
    }
}

impl ValueObject for UnitConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_units_are_si() {
        let units = UnitConfig::default();
        assert_eq!(units.length, LengthUnit::Metre);
        assert_eq!(units.mass, MassUnit::Kilogram);
    }

    #[test]
    fn conversion_factors() {
        assert_eq!(LengthUnit::Centimetre.to_metres() * 100.0, 1.0);
        assert!((LengthUnit::Foot.to_metres() - 12.0 * LengthUnit::Inch.to_metres()).abs() < 1e-12);
        assert_eq!(MassUnit::Tonne.to_kilograms(), 1000.0);
    }

    #[test]
    fn units_serialize_lowercase() {
        let json = serde_json::to_string(&UnitConfig::new(LengthUnit::Foot, MassUnit::Pound)).unwrap();
        assert_eq!(json, r#"{"length":"foot","mass":"pound"}"#);
    }
}
