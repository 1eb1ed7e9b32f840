//! Uniform grid bucketing placements by location.

use std::collections::{BTreeSet, HashMap};

use warehouse_core::Sku;

use crate::location::Location;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
struct CellKey {
    x: i64,
    y: i64,
    z: i64,
}

impl CellKey {
    // `as` saturates, so far-away points collapse into the outermost cells.
    fn containing(x: f64, y: f64, z: f64, cell_size: f64) -> Self {
        Self {
            x: (x / cell_size).floor() as i64,
            y: (y / cell_size).floor() as i64,
            z: (z / cell_size).floor() as i64,
        }
    }

    fn of(location: &Location, cell_size: f64) -> Self {
        Self::containing(location.x(), location.y(), location.z(), cell_size)
    }
}

/// Occupied cells only; a cell disappears with its last entry.
#[derive(Debug)]
pub(crate) struct Grid {
    cell_size: f64,
    cells: HashMap<CellKey, BTreeSet<(Location, Sku)>>,
}

impl Grid {
    pub(crate) fn new(cell_size: f64) -> Self {
        Self {
            cell_size,
            cells: HashMap::new(),
        }
    }

    pub(crate) fn insert(&mut self, location: Location, sku: Sku) {
        let key = CellKey::of(&location, self.cell_size);
        self.cells.entry(key).or_default().insert((location, sku));
    }

    pub(crate) fn remove(&mut self, location: &Location, sku: &Sku) {
        let key = CellKey::of(location, self.cell_size);
        if let Some(cell) = self.cells.get_mut(&key) {
            cell.retain(|(l, s)| !(l == location && s == sku));
            if cell.is_empty() {
                self.cells.remove(&key);
            }
        }
    }

    /// Entries whose cell intersects the cube of half-edge `tolerance`
    /// around `center`, ascending by (location, sku).
    ///
    /// A superset of the entries within `tolerance`; callers apply the exact
    /// distance test.
    pub(crate) fn candidates(&self, center: &Location, tolerance: f64) -> Vec<(Location, Sku)> {
        let mut out: Vec<(Location, Sku)> = match self.cube_cells(center, tolerance) {
            Some(keys) => keys
                .filter_map(|key| self.cells.get(&key))
                .flat_map(|cell| cell.iter().cloned())
                .collect(),
            None => self.cells.values().flat_map(|cell| cell.iter().cloned()).collect(),
        };
        out.sort();
        out
    }

    /// Cell keys covering the query cube, or `None` when visiting them would
    /// cost more than scanning every occupied cell.
    fn cube_cells(&self, center: &Location, tolerance: f64) -> Option<impl Iterator<Item = CellKey>> {
        if !tolerance.is_finite() {
            return None;
        }
        let lo = CellKey::containing(
            center.x() - tolerance,
            center.y() - tolerance,
            center.z() - tolerance,
            self.cell_size,
        );
        let hi = CellKey::containing(
            center.x() + tolerance,
            center.y() + tolerance,
            center.z() + tolerance,
            self.cell_size,
        );

        // One cell of slack on each side absorbs rounding at cell boundaries.
        let (x0, x1) = (lo.x.saturating_sub(1), hi.x.saturating_add(1));
        let (y0, y1) = (lo.y.saturating_sub(1), hi.y.saturating_add(1));
        let (z0, z1) = (lo.z.saturating_sub(1), hi.z.saturating_add(1));

        let span = |a: i64, b: i64| (b as i128) - (a as i128) + 1;
        let volume = span(x0, x1)
            .checked_mul(span(y0, y1))
            .and_then(|v| v.checked_mul(span(z0, z1)))?;
        if volume > self.cells.len() as i128 {
            return None;
        }

        Some((x0..=x1).flat_map(move |x| {
            (y0..=y1).flat_map(move |y| (z0..=z1).map(move |z| CellKey { x, y, z }))
        }))
    }

    #[cfg(test)]
    fn occupied_cells(&self) -> usize {
        self.cells.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(x: f64, y: f64, z: f64) -> Location {
        Location::new(x, y, z).unwrap()
    }

    fn sku(s: &str) -> Sku {
        Sku::new(s).unwrap()
    }

    #[test]
    fn removing_last_entry_drops_the_cell() {
        let mut grid = Grid::new(1.0);
        grid.insert(loc(0.5, 0.5, 0.5), sku("A"));
        grid.insert(loc(0.6, 0.5, 0.5), sku("B"));
        assert_eq!(grid.occupied_cells(), 1);

        grid.remove(&loc(0.5, 0.5, 0.5), &sku("A"));
        assert_eq!(grid.occupied_cells(), 1);
        grid.remove(&loc(0.6, 0.5, 0.5), &sku("B"));
        assert_eq!(grid.occupied_cells(), 0);
    }

    #[test]
    fn candidates_skip_distant_cells() {
        let mut grid = Grid::new(1.0);
        for i in 0..200 {
            grid.insert(loc(i as f64 * 10.0, 0.0, 0.0), sku("A"));
        }

        let near = grid.candidates(&loc(100.0, 0.0, 0.0), 0.5);
        assert_eq!(near, vec![(loc(100.0, 0.0, 0.0), sku("A"))]);
    }

    #[test]
    fn huge_tolerance_falls_back_to_full_scan() {
        let mut grid = Grid::new(0.001);
        grid.insert(loc(-1e300, 0.0, 0.0), sku("A"));
        grid.insert(loc(1e300, 0.0, 0.0), sku("B"));

        assert_eq!(grid.candidates(&Location::origin(), f64::INFINITY).len(), 2);
        assert_eq!(grid.candidates(&Location::origin(), f64::MAX).len(), 2);
    }

    #[test]
    fn candidates_are_sorted() {
        let mut grid = Grid::new(1.0);
        grid.insert(loc(2.0, 0.0, 0.0), sku("B"));
        grid.insert(loc(-2.0, 0.0, 0.0), sku("A"));
        grid.insert(loc(2.0, 0.0, 0.0), sku("A"));

        let all = grid.candidates(&Location::origin(), 5.0);
        assert_eq!(
            all,
            vec![
                (loc(-2.0, 0.0, 0.0), sku("A")),
                (loc(2.0, 0.0, 0.0), sku("A")),
                (loc(2.0, 0.0, 0.0), sku("B")),
            ]
        );
    }
}
