//! Shelving descriptors. Not consulted by the index.

use serde::{Deserialize, Serialize};

use warehouse_core::{DomainError, DomainResult, ValueObject};

use crate::dimensions::{ensure_positive, Weight};

/// Rectangular shelving.
///
/// - `width`: the edge from which items are accessible.
/// - `depth`: how far the shelving goes back.
/// - `max_weight`: the load one shelf can take, when known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ShelvingRepr", into = "ShelvingRepr")]
pub struct Shelving {
    label: String,
    width: f64,
    depth: f64,
    max_weight: Option<Weight>,
}

#[derive(Serialize, Deserialize)]
struct ShelvingRepr {
    label: String,
    width: f64,
    depth: f64,
    max_weight: Option<Weight>,
}

impl Shelving {
    pub fn new(
        label: impl Into<String>,
        width: f64,
        depth: f64,
        max_weight: Option<Weight>,
    ) -> DomainResult<Self> {
        let label = label.into();
        if label.trim().is_empty() {
            return Err(DomainError::validation("shelving label cannot be empty"));
        }
        ensure_positive("width", width)?;
        ensure_positive("depth", depth)?;
        Ok(Self {
            label,
            width,
            depth,
            max_weight,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn depth(&self) -> f64 {
        self.depth
    }

    pub fn max_weight(&self) -> Option<Weight> {
        self.max_weight
    }

    /// Shelf surface (width x depth).
    pub fn area(&self) -> f64 {
        self.width * self.depth
    }
}

impl ValueObject for Shelving {}

impl TryFrom<ShelvingRepr> for Shelving {
    type Error = DomainError;

    fn try_from(repr: ShelvingRepr) -> Result<Self, Self::Error> {
        Shelving::new(repr.label, repr.width, repr.depth, repr.max_weight)
    }
}

impl From<Shelving> for ShelvingRepr {
    fn from(shelf: Shelving) -> Self {
        ShelvingRepr {
            label: shelf.label,
            width: shelf.width,
            depth: shelf.depth,
            max_weight: shelf.max_weight,
        }
    }
}

impl core::fmt::Display for Shelving {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Shelving(label={}, width={}, depth={}",
            self.label, self.width, self.depth
        )?;
        // A zero limit reads as "no limit known" and is left out.
        if let Some(max) = self.max_weight.filter(|w| w.value() != 0.0) {
            write!(f, ", max_weight={max}")?;
        }
        f.write_str(")")
    }
}
