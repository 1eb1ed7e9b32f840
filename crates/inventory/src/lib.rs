//! Warehouse inventory: where every SKU is, and how many of it.
//!
//! The centre of this crate is [`SpatialInventoryIndex`]. The value types
//! around it (units, dimensions, weights, item and shelving descriptors) are
//! plain validated data; the index itself only keys on [`Sku`] and
//! [`Location`].

pub mod config;
pub mod dimensions;
pub mod error;
pub mod event;
mod grid;
pub mod index;
pub mod item;
pub mod location;
pub mod placement;
pub mod shelving;
pub mod units;

pub use config::{IndexConfig, CELL_SIZE_ENV};
pub use dimensions::{SpatialDimensions, Weight};
pub use error::IndexError;
pub use event::{PlacementEvent, StockMoved, StockPlaced, StockRemoved};
pub use index::{NearbyPlacements, SpatialInventoryIndex};
pub use item::Item;
pub use location::Location;
pub use placement::{Placement, PlacementSeed};
pub use shelving::Shelving;
pub use units::{LengthUnit, MassUnit, UnitConfig};

pub use warehouse_core::Sku;
