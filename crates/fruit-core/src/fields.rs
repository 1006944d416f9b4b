//! # Raw Field Dictionary
//!
//! UI glue hands the service whatever the user typed: form text, JSON
//! numbers, sometimes nothing at all. [`FruitFields`] carries those values
//! untyped so that validation can report *every* bad field with a precise
//! message ("price must be a valid number") instead of failing at
//! deserialization time.
//!
//! ## Sources
//! ```text
//! Form inputs ──► FruitFields::new().name(..).price("1.99")
//! JSON body   ──► serde_json::from_str::<FruitFields>(body)
//!                       │
//!                       ▼
//!          validation::validate_new_fruit / validate_fruit_patch
//! ```
//!
//! Unknown keys are ignored. In particular an `id` key is never read, so a
//! caller cannot change a record's identity through its fields.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Loosely typed input for create and update.
///
/// `None` means "field not supplied". `Some(Value::Null)` means the caller
/// explicitly sent `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FruitFields {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,

    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub category: Option<Value>,

    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub price: Option<Value>,

    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Value>,

    #[serde(
        default,
        alias = "imagePath",
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_path: Option<Value>,
}

/// Keeps an explicit JSON `null` as `Some(Value::Null)` rather than
/// collapsing it into "absent".
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl FruitFields {
    /// Creates an empty field set.
    pub fn new() -> Self {
        FruitFields::default()
    }

    pub fn name(mut self, value: impl Into<Value>) -> Self {
        self.name = Some(value.into());
        self
    }

    pub fn category(mut self, value: impl Into<Value>) -> Self {
        self.category = Some(value.into());
        self
    }

    pub fn price(mut self, value: impl Into<Value>) -> Self {
        self.price = Some(value.into());
        self
    }

    pub fn quantity(mut self, value: impl Into<Value>) -> Self {
        self.quantity = Some(value.into());
        self
    }

    pub fn image_path(mut self, value: impl Into<Value>) -> Self {
        self.image_path = Some(value.into());
        self
    }

    /// Names of the required fields that were not supplied at all.
    pub fn missing_required(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("category", &self.category),
            ("price", &self.price),
            ("quantity", &self.quantity),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_none())
        .map(|(field, _)| field)
        .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_fields() {
        let fields = FruitFields::new().name("Apple").price(1.99).quantity("100");

        assert_eq!(fields.name, Some(Value::from("Apple")));
        assert_eq!(fields.price, Some(Value::from(1.99)));
        assert_eq!(fields.quantity, Some(Value::from("100")));
        assert_eq!(fields.category, None);
        assert_eq!(fields.missing_required(), vec!["category"]);
    }

    #[test]
    fn test_deserialize_ignores_id_and_unknown_keys() {
        let fields: FruitFields = serde_json::from_str(
            r#"{"id": 42, "name": "Mango", "origin": "Mexico", "quantity": 75}"#,
        )
        .unwrap();

        assert_eq!(fields.name, Some(Value::from("Mango")));
        assert_eq!(fields.quantity, Some(Value::from(75)));
        assert_eq!(fields.price, None);
    }

    #[test]
    fn test_deserialize_keeps_explicit_null() {
        let fields: FruitFields = serde_json::from_str(r#"{"imagePath": null}"#).unwrap();
        assert_eq!(fields.image_path, Some(Value::Null));
        assert_eq!(fields.name, None);
    }

    #[test]
    fn test_empty() {
        assert_eq!(FruitFields::new(), FruitFields::default());
        assert_eq!(FruitFields::new().missing_required().len(), 4);
    }
}
