//! The spatial inventory index: which SKU sits where, and how many.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use tracing::{debug, warn};

use warehouse_core::Sku;
use warehouse_events::EventEnvelope;

use crate::config::IndexConfig;
use crate::error::IndexError;
use crate::event::{PlacementEvent, StockMoved, StockPlaced, StockRemoved};
use crate::grid::Grid;
use crate::location::Location;
use crate::placement::{Placement, PlacementSeed};

/// Authoritative mapping of (sku, location) to a positive quantity.
///
/// - At most one placement exists per (sku, location); adds merge quantities.
/// - A placement whose quantity reaches zero is removed.
/// - [`move_stock`](Self::move_stock) conserves the item's total quantity.
///
/// One `RwLock` guards the whole index. Mutations take it exclusively, so a
/// move's two placements change together; queries copy out under a shared
/// lock and never see half of a move.
#[derive(Debug)]
pub struct SpatialInventoryIndex {
    config: IndexConfig,
    state: RwLock<IndexState>,
}

#[derive(Debug)]
struct IndexState {
    by_item: BTreeMap<Sku, BTreeMap<Location, i64>>,
    grid: Grid,
    placement_count: usize,
    /// Sequence number of the last recorded event (0 = none yet).
    sequence: u64,
}

impl Default for SpatialInventoryIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl SpatialInventoryIndex {
    /// Empty index with the default configuration.
    pub fn new() -> Self {
        Self::build(IndexConfig::default())
    }

    pub fn with_config(config: IndexConfig) -> Result<Self, IndexError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    /// Index holding `seeds` as its starting state.
    ///
    /// Seeds with the same (sku, location) are merged. Seeding records no
    /// events; sequence numbers count mutations made afterwards, and
    /// [`replay`](Self::replay) takes the same seeds to rebuild the index.
    pub fn seeded<I, S>(config: IndexConfig, seeds: I) -> Result<Self, IndexError>
    where
        I: IntoIterator<Item = S>,
        S: Into<PlacementSeed>,
    {
        let index = Self::with_config(config)?;
        {
            let mut state = index.write();
            for seed in seeds {
                let seed = seed.into();
                state.place(&seed.sku, seed.location, seed.quantity)?;
            }
        }
        Ok(index)
    }

    /// Rebuild an index from the seeds it started with and the events it
    /// recorded since, applied in sequence order.
    ///
    /// Pass no seeds for an index that started empty.
    pub fn replay<I, S>(
        config: IndexConfig,
        seeds: I,
        envelopes: impl IntoIterator<Item = EventEnvelope<PlacementEvent>>,
    ) -> Result<Self, IndexError>
    where
        I: IntoIterator<Item = S>,
        S: Into<PlacementSeed>,
    {
        let index = Self::seeded(config, seeds)?;
        let mut envs: Vec<_> = envelopes.into_iter().collect();
        envs.sort_by_key(|e| e.sequence_number());
        for env in &envs {
            index.apply_envelope(env)?;
        }
        Ok(index)
    }

    fn build(config: IndexConfig) -> Self {
        Self {
            state: RwLock::new(IndexState {
                by_item: BTreeMap::new(),
                grid: Grid::new(config.cell_size),
                placement_count: 0,
                sequence: 0,
            }),
            config,
        }
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Put `quantity` units of `sku` at `location`, merging with any existing placement.
    pub fn add(
        &self,
        sku: &Sku,
        location: Location,
        quantity: i64,
    ) -> Result<EventEnvelope<PlacementEvent>, IndexError> {
        let event = PlacementEvent::StockPlaced(StockPlaced {
            sku: sku.clone(),
            location,
            quantity,
            occurred_at: Utc::now(),
        });
        self.commit(event)
    }

    /// Move `quantity` units of `sku` from `from` to `to` as one step.
    ///
    /// Moving to the same location changes nothing but is still validated
    /// against the stock at `from`.
    pub fn move_stock(
        &self,
        sku: &Sku,
        quantity: i64,
        from: Location,
        to: Location,
    ) -> Result<EventEnvelope<PlacementEvent>, IndexError> {
        let event = PlacementEvent::StockMoved(StockMoved {
            sku: sku.clone(),
            quantity,
            from,
            to,
            occurred_at: Utc::now(),
        });
        self.commit(event)
    }

    /// Take `quantity` units of `sku` out of the index at `location`.
    pub fn remove(
        &self,
        sku: &Sku,
        location: Location,
        quantity: i64,
    ) -> Result<EventEnvelope<PlacementEvent>, IndexError> {
        let event = PlacementEvent::StockRemoved(StockRemoved {
            sku: sku.clone(),
            location,
            quantity,
            occurred_at: Utc::now(),
        });
        self.commit(event)
    }

    /// Apply an event recorded by another index (or an earlier run of this one).
    ///
    /// Envelopes at or below the current sequence number are ignored, so
    /// redelivery is harmless. Gaps are rejected.
    pub fn apply_envelope(&self, envelope: &EventEnvelope<PlacementEvent>) -> Result<(), IndexError> {
        let mut state = self.write();
        let last = state.sequence;
        let found = envelope.sequence_number();

        if found == 0 {
            return Err(IndexError::NonMonotonicSequence { last, found });
        }
        if found <= last {
            return Ok(());
        }
        if found != last + 1 {
            return Err(IndexError::NonMonotonicSequence { last, found });
        }

        state.apply(envelope.payload())?;
        state.sequence = found;
        Ok(())
    }

    fn commit(&self, event: PlacementEvent) -> Result<EventEnvelope<PlacementEvent>, IndexError> {
        let mut state = self.write();
        match state.apply(&event) {
            Ok(()) => {
                state.sequence += 1;
                debug!(sku = %event.sku(), sequence = state.sequence, event = ?event, "placement updated");
                Ok(EventEnvelope::wrap(state.sequence, event))
            }
            Err(error) => {
                warn!(sku = %event.sku(), error = %error, "placement update rejected");
                Err(error)
            }
        }
    }

    /// Placements within `tolerance` of `location`, ascending by (location, sku).
    ///
    /// The result is a snapshot: later mutations do not affect it, and it can
    /// be iterated any number of times.
    pub fn get_items_near_location(
        &self,
        location: &Location,
        tolerance: f64,
    ) -> Result<NearbyPlacements, IndexError> {
        if tolerance.is_nan() || tolerance < 0.0 {
            return Err(IndexError::InvalidTolerance { tolerance });
        }

        let state = self.read();
        let candidates = state
            .grid
            .candidates(location, tolerance)
            .into_iter()
            .map(|(loc, sku)| {
                let quantity = state.quantity_at(&sku, &loc);
                Placement {
                    sku,
                    location: loc,
                    quantity,
                }
            })
            .collect();

        Ok(NearbyPlacements {
            center: *location,
            tolerance,
            candidates,
        })
    }

    /// Every (location, quantity) holding `sku`, ascending by location.
    pub fn get_locations_of_item(&self, sku: &Sku) -> Vec<(Location, i64)> {
        let state = self.read();
        state
            .by_item
            .get(sku)
            .map(|locs| locs.iter().map(|(l, q)| (*l, *q)).collect())
            .unwrap_or_default()
    }

    /// Units of `sku` at `location` (0 when there is no placement).
    pub fn quantity_at(&self, sku: &Sku, location: &Location) -> i64 {
        self.read().quantity_at(sku, location)
    }

    /// Units of `sku` across all locations.
    pub fn total_quantity(&self, sku: &Sku) -> i128 {
        self.read()
            .by_item
            .get(sku)
            .map(|locs| locs.values().map(|q| *q as i128).sum())
            .unwrap_or(0)
    }

    /// All placements, ascending by (sku, location).
    pub fn placements(&self) -> Vec<Placement> {
        let state = self.read();
        state
            .by_item
            .iter()
            .flat_map(|(sku, locs)| {
                locs.iter().map(move |(location, quantity)| Placement {
                    sku: sku.clone(),
                    location: *location,
                    quantity: *quantity,
                })
            })
            .collect()
    }

    /// Distinct SKUs with at least one placement, ascending.
    pub fn items(&self) -> Vec<Sku> {
        self.read().by_item.keys().cloned().collect()
    }

    /// Number of placements.
    pub fn len(&self) -> usize {
        self.read().placement_count
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sequence number of the last recorded mutation (0 when none).
    pub fn sequence(&self) -> u64 {
        self.read().sequence
    }

    // Mutations validate before touching state, so a poisoned lock still
    // guards a consistent index.
    fn read(&self) -> RwLockReadGuard<'_, IndexState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, IndexState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl IndexState {
    fn apply(&mut self, event: &PlacementEvent) -> Result<(), IndexError> {
        match event {
            PlacementEvent::StockPlaced(e) => self.place(&e.sku, e.location, e.quantity),
            PlacementEvent::StockMoved(e) => self.transfer(&e.sku, e.quantity, e.from, e.to),
            PlacementEvent::StockRemoved(e) => self.take(&e.sku, e.location, e.quantity),
        }
    }

    fn quantity_at(&self, sku: &Sku, location: &Location) -> i64 {
        self.by_item
            .get(sku)
            .and_then(|locs| locs.get(location))
            .copied()
            .unwrap_or(0)
    }

    fn place(&mut self, sku: &Sku, location: Location, quantity: i64) -> Result<(), IndexError> {
        ensure_positive(quantity)?;
        let updated = self
            .quantity_at(sku, &location)
            .checked_add(quantity)
            .ok_or_else(|| IndexError::QuantityOverflow {
                sku: sku.clone(),
                location,
            })?;
        self.set(sku, location, updated);
        Ok(())
    }

    fn take(&mut self, sku: &Sku, location: Location, quantity: i64) -> Result<(), IndexError> {
        let available = self.available(sku, location, quantity)?;
        self.set(sku, location, available - quantity);
        Ok(())
    }

    fn transfer(&mut self, sku: &Sku, quantity: i64, from: Location, to: Location) -> Result<(), IndexError> {
        let available = self.available(sku, from, quantity)?;
        if from == to {
            return Ok(());
        }
        let arriving = self
            .quantity_at(sku, &to)
            .checked_add(quantity)
            .ok_or_else(|| IndexError::QuantityOverflow {
                sku: sku.clone(),
                location: to,
            })?;

        self.set(sku, from, available - quantity);
        self.set(sku, to, arriving);
        Ok(())
    }

    /// Stock at `location`, provided it covers `quantity`.
    fn available(&self, sku: &Sku, location: Location, quantity: i64) -> Result<i64, IndexError> {
        ensure_positive(quantity)?;
        let available = self.quantity_at(sku, &location);
        if available == 0 {
            return Err(IndexError::NoSuchPlacement {
                sku: sku.clone(),
                location,
            });
        }
        if quantity > available {
            return Err(IndexError::InsufficientQuantity {
                sku: sku.clone(),
                location,
                requested: quantity,
                available,
            });
        }
        Ok(available)
    }

    /// Store `quantity` for (sku, location); zero deletes the placement.
    fn set(&mut self, sku: &Sku, location: Location, quantity: i64) {
        if quantity == 0 {
            let Some(locs) = self.by_item.get_mut(sku) else {
                return;
            };
            if locs.remove(&location).is_some() {
                self.placement_count -= 1;
                self.grid.remove(&location, sku);
            }
            if locs.is_empty() {
                self.by_item.remove(sku);
            }
            return;
        }

        let locs = self.by_item.entry(sku.clone()).or_default();
        if locs.insert(location, quantity).is_none() {
            self.placement_count += 1;
            self.grid.insert(location, sku.clone());
        }
    }
}

fn ensure_positive(quantity: i64) -> Result<(), IndexError> {
    if quantity < 1 {
        return Err(IndexError::InvalidQuantity { quantity });
    }
    Ok(())
}

/// Result of a proximity query.
///
/// Holds the placements from the grid cells near the query point; the exact
/// distance test runs lazily on each iteration.
#[derive(Debug, Clone)]
pub struct NearbyPlacements {
    center: Location,
    tolerance: f64,
    candidates: Vec<Placement>,
}

impl NearbyPlacements {
    pub fn center(&self) -> &Location {
        &self.center
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn iter(&self) -> impl Iterator<Item = &Placement> + '_ {
        self.candidates
            .iter()
            .filter(move |p| self.center.is_within(&p.location, self.tolerance))
    }

    pub fn to_vec(&self) -> Vec<Placement> {
        self.iter().cloned().collect()
    }
}

impl<'a> IntoIterator for &'a NearbyPlacements {
    type Item = &'a Placement;
    type IntoIter = Box<dyn Iterator<Item = &'a Placement> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
