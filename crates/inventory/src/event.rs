//! Events emitted by index mutations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use warehouse_core::Sku;
use warehouse_events::Event;

use crate::location::Location;

/// Event: StockPlaced (stock entered the index at a location).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockPlaced {
    pub sku: Sku,
    pub location: Location,
    pub quantity: i64,
    pub occurred_at: DateTime<Utc>,
}

/// Event: StockMoved (stock relocated; total quantity unchanged).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockMoved {
    pub sku: Sku,
    pub quantity: i64,
    pub from: Location,
    pub to: Location,
    pub occurred_at: DateTime<Utc>,
}

/// Event: StockRemoved (stock left the index).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRemoved {
    pub sku: Sku,
    pub location: Location,
    pub quantity: i64,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementEvent {
    StockPlaced(StockPlaced),
    StockMoved(StockMoved),
    StockRemoved(StockRemoved),
}

impl PlacementEvent {
    pub fn sku(&self) -> &Sku {
        match self {
            PlacementEvent::StockPlaced(e) => &e.sku,
            PlacementEvent::StockMoved(e) => &e.sku,
            PlacementEvent::StockRemoved(e) => &e.sku,
        }
    }
}

impl Event for PlacementEvent {
    fn event_type(&self) -> &'static str {
        match self {
            PlacementEvent::StockPlaced(_) => "inventory.stock.placed",
            PlacementEvent::StockMoved(_) => "inventory.stock.moved",
            PlacementEvent::StockRemoved(_) => "inventory.stock.removed",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            PlacementEvent::StockPlaced(e) => e.occurred_at,
            PlacementEvent::StockMoved(e) => e.occurred_at,
            PlacementEvent::StockRemoved(e) => e.occurred_at,
        }
    }
}
