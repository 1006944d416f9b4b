//! # Domain Types
//!
//! Core domain types used throughout the fruit store.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    NewFruit     │   │      Fruit      │   │   FruitPatch    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  (no id yet)    │──►│  id (i64)       │◄──│  Option<...>    │       │
//! │  │  name           │   │  name, category │   │  per field      │       │
//! │  │  category       │   │  price, qty     │   │                 │       │
//! │  │  price, qty     │   │  timestamps     │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │        insert                stored               update                │
//! │                                                                         │
//! │  ┌─────────────────┐                                                    │
//! │  │ CategorySummary │  one row per category present in the store         │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! `id` is assigned by the store on insert and never changes. A record
//! that has not been persisted yet is a [`NewFruit`], which has no id at
//! all, so "update a record without an id" cannot be expressed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Fruit
// =============================================================================

/// A stored fruit inventory record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Fruit {
    /// Store-assigned identifier (positive, never reused).
    pub id: i64,

    /// Display name, e.g. "Apple".
    pub name: String,

    /// Category label from an open set, e.g. "Citrus".
    pub category: String,

    /// Unit price in currency units. Never negative.
    pub price: f64,

    /// Units in stock. Never negative.
    pub quantity: i64,

    /// Optional path to a product image.
    pub image_path: Option<String>,

    /// When the record was inserted.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the record was last mutated (including stock changes).
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Fruit {
    /// Value of the stock on hand (`price × quantity`).
    #[inline]
    pub fn inventory_value(&self) -> f64 {
        self.price * self.quantity as f64
    }

    /// True when stock is strictly below `threshold`.
    #[inline]
    pub fn is_low_stock(&self, threshold: i64) -> bool {
        self.quantity < threshold
    }
}

// =============================================================================
// New Fruit
// =============================================================================

/// A validated fruit that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFruit {
    pub name: String,
    pub category: String,
    pub price: f64,
    pub quantity: i64,
    pub image_path: Option<String>,
}

// =============================================================================
// Fruit Patch
// =============================================================================

/// A validated partial update.
///
/// `image_path` is doubly optional: `None` leaves it alone,
/// `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FruitPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i64>,
    pub image_path: Option<Option<String>>,
}

// =============================================================================
// Category Summary
// =============================================================================

/// Aggregate figures for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub category: String,
    /// Number of distinct fruits in the category.
    pub count: i64,
    /// Sum of quantities.
    pub total_quantity: i64,
    /// Sum of `price × quantity`.
    pub total_value: f64,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn apple() -> Fruit {
        let now = Utc::now();
        Fruit {
            id: 1,
            name: "Apple".to_string(),
            category: "Fresh Fruits".to_string(),
            price: 1.5,
            quantity: 100,
            image_path: Some("images/apple.png".to_string()),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_inventory_value() {
        assert!((apple().inventory_value() - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_is_low_stock() {
        let mut fruit = apple();
        assert!(!fruit.is_low_stock(10));
        fruit.quantity = 9;
        assert!(fruit.is_low_stock(10));
        fruit.quantity = 10;
        assert!(!fruit.is_low_stock(10));
    }
}
