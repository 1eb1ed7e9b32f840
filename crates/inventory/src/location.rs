//! Points in warehouse space.
//!
//! ```text
//!     x
//! +-------+
//! |       |
//! |       | y
//! |       |
//! +-------+
//! ```
//!
//! Heights are `z`. All coordinates share one length unit per index.

use core::cmp::Ordering;
use core::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use warehouse_core::{DomainError, DomainResult, ValueObject};

/// A point (x, y, z) in physical space.
///
/// Coordinates are always finite and `-0.0` is stored as `0.0`, which makes
/// `Eq`, `Hash` and `Ord` consistent with each other.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "LocationRepr", into = "LocationRepr")]
pub struct Location {
    x: f64,
    y: f64,
    z: f64,
}

#[derive(Serialize, Deserialize)]
struct LocationRepr {
    x: f64,
    y: f64,
    z: f64,
}

impl Location {
    pub fn new(x: f64, y: f64, z: f64) -> DomainResult<Self> {
        if !(x.is_finite() && y.is_finite() && z.is_finite()) {
            return Err(DomainError::validation(format!(
                "location coordinates must be finite (got {x}, {y}, {z})"
            )));
        }
        Ok(Self {
            x: normalize(x),
            y: normalize(y),
            z: normalize(z),
        })
    }

    pub const fn origin() -> Self {
        Self { x: 0.0, y: 0.0, z: 0.0 }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn z(&self) -> f64 {
        self.z
    }

    /// Squared Euclidean distance. May be `+inf` for far-apart points.
    pub fn distance_squared_to(&self, other: &Location) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }

    /// Euclidean distance.
    pub fn distance_to(&self, other: &Location) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx.hypot(dy).hypot(dz)
    }

    /// Whether `other` lies within `tolerance` (inclusive) of this point.
    pub fn is_within(&self, other: &Location, tolerance: f64) -> bool {
        if tolerance == 0.0 {
            return self == other;
        }
        self.distance_to(other) <= tolerance
    }
}

fn normalize(v: f64) -> f64 {
    if v == 0.0 { 0.0 } else { v }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y && self.z == other.z
    }
}

impl Eq for Location {}

impl Hash for Location {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.x.to_bits().hash(state);
        self.y.to_bits().hash(state);
        self.z.to_bits().hash(state);
    }
}

impl Ord for Location {
    fn cmp(&self, other: &Self) -> Ordering {
        self.x
            .total_cmp(&other.x)
            .then_with(|| self.y.total_cmp(&other.y))
            .then_with(|| self.z.total_cmp(&other.z))
    }
}

impl PartialOrd for Location {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl ValueObject for Location {}

impl core::fmt::Display for Location {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl TryFrom<LocationRepr> for Location {
    type Error = DomainError;

    fn try_from(repr: LocationRepr) -> Result<Self, Self::Error> {
        Location::new(repr.x, repr.y, repr.z)
    }
}

impl From<Location> for LocationRepr {
    fn from(loc: Location) -> Self {
        LocationRepr {
            x: loc.x,
            y: loc.y,
            z: loc.z,
        }
    }
}

impl TryFrom<(f64, f64, f64)> for Location {
    type Error = DomainError;

    fn try_from((x, y, z): (f64, f64, f64)) -> Result<Self, Self::Error> {
        Location::new(x, y, z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn loc(x: f64, y: f64, z: f64) -> Location {
        Location::new(x, y, z).unwrap()
    }

    #[test]
    fn rejects_non_finite_coordinates() {
        assert!(Location::new(f64::NAN, 0.0, 0.0).is_err());
        assert!(Location::new(0.0, f64::INFINITY, 0.0).is_err());
        assert!(Location::new(0.0, 0.0, f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn negative_zero_equals_zero_and_hashes_alike() {
        let a = loc(-0.0, 0.0, -0.0);
        let b = Location::origin();
        assert_eq!(a, b);

        let set: HashSet<Location> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn ordering_is_x_then_y_then_z() {
        let mut locs = vec![loc(1.0, 0.0, 0.0), loc(0.0, 2.0, 0.0), loc(0.0, 1.0, 5.0), loc(0.0, 1.0, -1.0)];
        locs.sort();
        assert_eq!(
            locs,
            vec![loc(0.0, 1.0, -1.0), loc(0.0, 1.0, 5.0), loc(0.0, 2.0, 0.0), loc(1.0, 0.0, 0.0)]
        );
    }

    #[test]
    fn euclidean_distance() {
        let a = Location::origin();
        let b = loc(1.0, 2.0, 2.0);
        assert_eq!(a.distance_to(&b), 3.0);
        assert_eq!(a.distance_squared_to(&b), 9.0);
        assert!(a.is_within(&b, 3.0));
        assert!(!a.is_within(&b, 2.999));
    }

    #[test]
    fn zero_tolerance_is_exact_match() {
        let a = loc(1.5, 2.5, 0.0);
        assert!(a.is_within(&loc(1.5, 2.5, 0.0), 0.0));
        assert!(!a.is_within(&loc(1.5, 2.5, 1e-12), 0.0));
    }

    #[test]
    fn deserialize_validates() {
        let ok: Location = serde_json::from_str(r#"{"x":1.0,"y":2.0,"z":3.0}"#).unwrap();
        assert_eq!(ok, loc(1.0, 2.0, 3.0));
        assert_eq!(serde_json::to_string(&ok).unwrap(), r#"{"x":1.0,"y":2.0,"z":3.0}"#);
    }
}
