use serde::{Deserialize, Serialize};

use warehouse_core::Sku;

use crate::location::Location;

/// One item at one location, with a quantity of at least 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub sku: Sku,
    pub location: Location,
    pub quantity: i64,
}

/// Initial stock handed to [`crate::SpatialInventoryIndex::seeded`].
///
/// Built from `(sku, location)` (quantity 1) or `(sku, location, quantity)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementSeed {
    pub sku: Sku,
    pub location: Location,
    pub quantity: i64,
}

impl From<(Sku, Location)> for PlacementSeed {
    fn from((sku, location): (Sku, Location)) -> Self {
        Self {
            sku,
            location,
            quantity: 1,
        }
    }
}

impl From<(Sku, Location, i64)> for PlacementSeed {
    fn from((sku, location, quantity): (Sku, Location, i64)) -> Self {
        Self {
            sku,
            location,
            quantity,
        }
    }
}

impl From<Placement> for PlacementSeed {
    fn from(p: Placement) -> Self {
        Self {
            sku: p.sku,
            location: p.location,
            quantity: p.quantity,
        }
    }
}
