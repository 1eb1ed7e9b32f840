use serde::{Deserialize, Serialize};

use warehouse_core::{DomainError, DomainResult, Entity, Sku};

use crate::dimensions::{SpatialDimensions, Weight};

/// Item descriptor: what a SKU physically is.
///
/// The spatial index only stores the [`Sku`]; descriptors are display and
/// planning data kept by callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ItemRepr", into = "ItemRepr")]
pub struct Item {
    sku: Sku,
    weight: Option<Weight>,
    dimensions: Option<SpatialDimensions>,
    /// How many units may be stacked on top of each other. Not enforced by the index.
    max_stack: Option<u32>,
}

#[derive(Serialize, Deserialize)]
struct ItemRepr {
    sku: Sku,
    weight: Option<Weight>,
    dimensions: Option<SpatialDimensions>,
    max_stack: Option<u32>,
}

impl Item {
    pub fn new(sku: Sku) -> Self {
        Self {
            sku,
            weight: None,
            dimensions: None,
            max_stack: None,
        }
    }

    pub fn with_weight(mut self, weight: Weight) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn with_dimensions(mut self, dimensions: SpatialDimensions) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    pub fn with_max_stack(mut self, max_stack: u32) -> DomainResult<Self> {
        if max_stack == 0 {
            return Err(DomainError::validation("max_stack must be at least 1"));
        }
        self.max_stack = Some(max_stack);
        Ok(self)
    }

    pub fn sku(&self) -> &Sku {
        &self.sku
    }

    pub fn weight(&self) -> Option<Weight> {
        self.weight
    }

    pub fn dimensions(&self) -> Option<SpatialDimensions> {
        self.dimensions
    }

    pub fn max_stack(&self) -> Option<u32> {
        self.max_stack
    }

    /// Weight of `quantity` units in kilograms, if the unit weight is known.
    pub fn total_kilograms(&self, quantity: i64) -> Option<f64> {
        self.weight.map(|w| w.kilograms() * quantity as f64)
    }
}

impl Entity for Item {
    type Id = Sku;

    fn id(&self) -> &Self::Id {
        &self.sku
    }
}

impl TryFrom<ItemRepr> for Item {
    type Error = DomainError;

    fn try_from(repr: ItemRepr) -> Result<Self, Self::Error> {
        let mut item = Item::new(repr.sku);
        item.weight = repr.weight;
        item.dimensions = repr.dimensions;
        match repr.max_stack {
            Some(max_stack) => item.with_max_stack(max_stack),
            None => Ok(item),
        }
    }
}

impl From<Item> for ItemRepr {
    fn from(item: Item) -> Self {
        ItemRepr {
            sku: item.sku,
            weight: item.weight,
            dimensions: item.dimensions,
            max_stack: item.max_stack,
        }
    }
}

impl From<Item> for Sku {
    fn from(item: Item) -> Self {
        item.sku
    }
}

impl From<&Item> for Sku {
    fn from(item: &Item) -> Self {
        item.sku.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{LengthUnit, MassUnit};

    fn test_sku() -> Sku {
        Sku::new("CRATE-01").unwrap()
    }

    #[test]
    fn builder_sets_descriptors() {
        let item = Item::new(test_sku())
            .with_weight(Weight::new(12.0, MassUnit::Kilogram).unwrap())
            .with_dimensions(SpatialDimensions::new(0.6, 0.4, 0.3, LengthUnit::Metre).unwrap())
            .with_max_stack(4)
            .unwrap();

        assert_eq!(item.sku().as_str(), "CRATE-01");
        assert_eq!(item.max_stack(), Some(4));
        assert_eq!(item.total_kilograms(3), Some(36.0));
    }

    #[test]
    fn zero_max_stack_is_rejected() {
        let err = Item::new(test_sku()).with_max_stack(0).unwrap_err();
        match err {
            DomainError::Validation(_) => {}
            _ => panic!("Expected Validation error for zero max_stack"),
        }
    }

    #[test]
    fn identity_is_the_sku() {
        let light = Item::new(test_sku()).with_weight(Weight::new(1.0, MassUnit::Kilogram).unwrap());
        let heavy = Item::new(test_sku()).with_weight(Weight::new(9.0, MassUnit::Kilogram).unwrap());

        assert_ne!(light, heavy);
        assert!(light.same_identity_as(&heavy));
        assert_eq!(Sku::from(&light), test_sku());
    }

    #[test]
    fn deserialize_validates() {
        let item: Item = serde_json::from_str(
            r#"{"sku":"CRATE-01","weight":{"value":12.0,"unit":"kilogram"},"dimensions":null,"max_stack":4}"#,
        )
        .unwrap();
        assert_eq!(item.sku(), &test_sku());
        assert_eq!(item.max_stack(), Some(4));

        let json = serde_json::to_string(&item).unwrap();
        assert_eq!(serde_json::from_str::<Item>(&json).unwrap(), item);

        assert!(
            serde_json::from_str::<Item>(r#"{"sku":"CRATE-01","weight":null,"dimensions":null,"max_stack":0}"#)
                .is_err()
        );
        assert!(
            serde_json::from_str::<Item>(
                r#"{"sku":"CRATE-01","weight":{"value":-1.0,"unit":"kilogram"},"dimensions":null,"max_stack":null}"#
            )
            .is_err()
        );
    }
}
