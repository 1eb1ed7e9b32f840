//! Index configuration.

use serde::{Deserialize, Serialize};

use warehouse_core::{DomainError, DomainResult};

use crate::units::UnitConfig;

/// Environment variable overriding [`IndexConfig::cell_size`].
pub const CELL_SIZE_ENV: &str = "WAREHOUSE_INDEX_CELL_SIZE";

/// Spatial index configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Edge length of one grid bucket, in `units.length`.
    pub cell_size: f64,
    /// Units that locations and tolerances are expressed in.
    ///
    /// Only a label for callers: the index does no unit conversion, and
    /// `cell_size` is read in the same unit as the coordinates.
    pub units: UnitConfig,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            cell_size: 1.0,
            units: UnitConfig::default(),
        }
    }
}

impl IndexConfig {
    pub fn with_cell_size(mut self, cell_size: f64) -> Self {
        self.cell_size = cell_size;
        self
    }

    pub fn with_units(mut self, units: UnitConfig) -> Self {
        self.units = units;
        self
    }

    pub fn validate(&self) -> DomainResult<()> {
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            return Err(DomainError::validation(format!(
                "cell_size must be a positive finite number (got {})",
                self.cell_size
            )));
        }
        Ok(())
    }

    /// Defaults, overridden by `WAREHOUSE_INDEX_CELL_SIZE` when set.
    pub fn from_env() -> DomainResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> DomainResult<Self> {
        let mut config = Self::default();
        if let Some(raw) = lookup(CELL_SIZE_ENV) {
            let cell_size: f64 = raw.trim().parse().map_err(|e| {
                DomainError::validation(format!("{CELL_SIZE_ENV}={raw:?}: {e}"))
            })?;
            config.cell_size = cell_size;
        }
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = IndexConfig::default();
        assert_eq!(config.cell_size, 1.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn lookup_overrides_cell_size() {
        let config = IndexConfig::from_lookup(|k| (k == CELL_SIZE_ENV).then(|| " 2.5 ".to_string())).unwrap();
        assert_eq!(config.cell_size, 2.5);
    }

    #[test]
    fn missing_variable_falls_back_to_default() {
        let config = IndexConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, IndexConfig::default());
    }

    #[test]
    fn rejects_unparsable_and_non_positive_values() {
        for raw in ["abc", "0", "-1", "inf", "NaN"] {
            let err = IndexConfig::from_lookup(|_| Some(raw.to_string())).unwrap_err();
            match err {
                DomainError::Validation(_) => {}
                other => panic!("Expected Validation error for {raw:?}, got {other:?}"),
            }
        }
    }
}
