//! Physical measurements of items: outer dimensions and weight.

use serde::{Deserialize, Serialize};

use warehouse_core::{DomainError, DomainResult, ValueObject};

use crate::units::{LengthUnit, MassUnit, UnitConfig};

/// Outer dimensions of an item, tagged with the unit they were measured in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DimensionsRepr", into = "DimensionsRepr")]
pub struct SpatialDimensions {
    length: f64,
    width: f64,
    height: f64,
    unit: LengthUnit,
}

#[derive(Serialize, Deserialize)]
struct DimensionsRepr {
    length: f64,
    width: f64,
    height: f64,
    unit: LengthUnit,
}

impl SpatialDimensions {
    /// All three extents must be finite and strictly positive.
    pub fn new(length: f64, width: f64, height: f64, unit: LengthUnit) -> DomainResult<Self> {
        for (name, value) in [("length", length), ("width", width), ("height", height)] {
            ensure_positive(name, value)?;
        }
        Ok(Self {
            length,
            width,
            height,
            unit,
        })
    }

    /// Build from bare numbers in the configured length unit.
    pub fn with_units(length: f64, width: f64, height: f64, units: &UnitConfig) -> DomainResult<Self> {
        Self::new(length, width, height, units.length)
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn unit(&self) -> LengthUnit {
        self.unit
    }

    /// `(length, width, height)` converted to metres.
    pub fn in_metres(&self) -> (f64, f64, f64) {
        let f = self.unit.to_metres();
        (self.length * f, self.width * f, self.height * f)
    }

    /// Volume in cubic metres.
    pub fn volume(&self) -> f64 {
        let (l, w, h) = self.in_metres();
        l * w * h
    }
}

impl ValueObject for SpatialDimensions {}

impl core::fmt::Display for SpatialDimensions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let u = self.unit.symbol();
        write!(f, "{}{u} x {}{u} x {}{u}", self.length, self.width, self.height)
    }
}

/// A weight, tagged with its unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WeightRepr", into = "WeightRepr")]
pub struct Weight {
    value: f64,
    unit: MassUnit,
}

#[derive(Serialize, Deserialize)]
struct WeightRepr {
    value: f64,
    unit: MassUnit,
}

impl Weight {
    /// Weight must be finite and non-negative (zero is allowed for packaging-only entries).
    pub fn new(value: f64, unit: MassUnit) -> DomainResult<Self> {
        if !value.is_finite() {
            return Err(DomainError::validation("weight must be finite"));
        }
        if value < 0.0 {
            return Err(DomainError::validation("weight cannot be negative"));
        }
        Ok(Self { value, unit })
    }

    pub fn with_units(value: f64, units: &UnitConfig) -> DomainResult<Self> {
        Self::new(value, units.mass)
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> MassUnit {
        self.unit
    }

    pub fn kilograms(&self) -> f64 {
        self.value * self.unit.to_kilograms()
    }
}

impl ValueObject for Weight {}

impl core::fmt::Display for Weight {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}{}", self.value, self.unit.symbol())
    }
}

impl TryFrom<DimensionsRepr> for SpatialDimensions {
    type Error = DomainError;

    fn try_from(repr: DimensionsRepr) -> Result<Self, Self::Error> {
        SpatialDimensions::new(repr.length, repr.width, repr.height, repr.unit)
    }
}

impl From<SpatialDimensions> for DimensionsRepr {
    fn from(dims: SpatialDimensions) -> Self {
        DimensionsRepr {
            length: dims.length,
            width: dims.width,
            height: dims.height,
            unit: dims.unit,
        }
    }
}

impl TryFrom<WeightRepr> for Weight {
    type Error = DomainError;

    fn try_from(repr: WeightRepr) -> Result<Self, Self::Error> {
        Weight::new(repr.value, repr.unit)
    }
}

impl From<Weight> for WeightRepr {
    fn from(weight: Weight) -> Self {
        WeightRepr {
            value: weight.value,
            unit: weight.unit,
        }
    }
}

pub(crate) fn ensure_positive(name: &str, value: f64) -> DomainResult<()> {
    if !value.is_finite() {
        return Err(DomainError::validation(format!("{name} must be finite")));
    }
    if value <= 0.0 {
        return Err(DomainError::validation(format!("{name} must be positive")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensions_convert_to_metres() {
        let dims = SpatialDimensions::new(50.0, 40.0, 30.0, LengthUnit::Centimetre).unwrap();
        let (l, w, h) = dims.in_metres();
        assert!((l - 0.5).abs() < 1e-12);
        assert!((w - 0.4).abs() < 1e-12);
        assert!((h - 0.3).abs() < 1e-12);
        assert!((dims.volume() - 0.06).abs() < 1e-12);
        assert_eq!(dims.to_string(), "50cm x 40cm x 30cm");
    }

    #[test]
    fn dimensions_reject_non_positive_values() {
        for (l, w, h) in [(0.0, 1.0, 1.0), (1.0, -2.0, 1.0), (1.0, 1.0, f64::NAN)] {
            match SpatialDimensions::new(l, w, h, LengthUnit::Metre).unwrap_err() {
                DomainError::Validation(_) => {}
                other => panic!("Expected Validation error, got {other:?}"),
            }
        }
    }

    #[test]
    fn dimensions_use_configured_unit() {
        let units = UnitConfig::new(LengthUnit::Inch, MassUnit::Pound);
        let dims = SpatialDimensions::with_units(10.0, 10.0, 10.0, &units).unwrap();
        assert_eq!(dims.unit(), LengthUnit::Inch);
    }

    #[test]
    fn weight_rejects_negative() {
        let err = Weight::new(-0.5, MassUnit::Kilogram).unwrap_err();
        assert_eq!(err, DomainError::validation("weight cannot be negative"));
        assert!(Weight::new(0.0, MassUnit::Kilogram).is_ok());
    }

    #[test]
    fn weight_in_kilograms() {
        let w = Weight::new(2500.0, MassUnit::Gram).unwrap();
        assert!((w.kilograms() - 2.5).abs() < 1e-12);
        assert_eq!(w.to_string(), "2500g");
    }

    #[test]
    fn deserialize_validates() {
        let dims: SpatialDimensions =
            serde_json::from_str(r#"{"length":2.0,"width":1.0,"height":0.5,"unit":"metre"}"#).unwrap();
        assert_eq!(dims, SpatialDimensions::new(2.0, 1.0, 0.5, LengthUnit::Metre).unwrap());
        assert!(
            serde_json::from_str::<SpatialDimensions>(r#"{"length":-1.0,"width":0.0,"height":1.0,"unit":"metre"}"#)
                .is_err()
        );

        let weight: Weight = serde_json::from_str(r#"{"value":3.5,"unit":"kilogram"}"#).unwrap();
        assert_eq!(weight, Weight::new(3.5, MassUnit::Kilogram).unwrap());
        assert_eq!(serde_json::to_string(&weight).unwrap(), r#"{"value":3.5,"unit":"kilogram"}"#);
        assert!(serde_json::from_str::<Weight>(r#"{"value":-5.0,"unit":"kilogram"}"#).is_err());
    }
}
