//! # Validation Module
//!
//! Input validation for the fruit store.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: UI glue                                                      │
//! │  └── Collects raw form values into FruitFields                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: FruitService (Rust)                                          │
//! │  └── THIS MODULE: parse + business rule validation                     │
//! │      (every failing field is reported, not just the first)             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── CHECK (price >= 0), CHECK (quantity >= 0)                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use fruit_core::validation::{validate_id, validate_price_range};
//!
//! assert!(validate_id(7).is_ok());
//! assert!(validate_id(0).is_err());
//! assert!(validate_price_range(5.0, 1.0).is_err());
//! ```

use serde_json::Value;

use crate::error::{ValidationError, ValidationErrors, ValidationResult};
use crate::fields::FruitFields;
use crate::types::{FruitPatch, NewFruit};
use crate::{MIN_CATEGORY_LEN, MIN_NAME_LEN};

// =============================================================================
// Identifier Validators
// =============================================================================

/// Validates a record identifier.
///
/// ## Rules
/// - Must be a positive integer (> 0)
pub fn validate_id(id: i64) -> ValidationResult<()> {
    if id <= 0 {
        return Err(ValidationError::InvalidId { id });
    }
    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a text field with a minimum length.
///
/// Returns the trimmed value.
fn validate_label(field: &str, value: &str, min: usize) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::required(field));
    }

    if value.chars().count() < min {
        return Err(ValidationError::too_short(field, min));
    }

    Ok(value.to_string())
}

/// Validates a fruit name.
///
/// ## Rules
/// - Must not be blank
/// - At least 2 characters after trimming
///
/// ## Example
/// ```rust
/// use fruit_core::validation::validate_name;
///
/// assert_eq!(validate_name("  Kiwi ").unwrap(), "Kiwi");
/// assert!(validate_name("A").is_err());
/// ```
pub fn validate_name(name: &str) -> ValidationResult<String> {
    validate_label("name", name, MIN_NAME_LEN)
}

/// Validates a category label. Same rules as [`validate_name`].
pub fn validate_category(category: &str) -> ValidationResult<String> {
    validate_label("category", category, MIN_CATEGORY_LEN)
}

/// Validates a name search pattern.
///
/// ## Rules
/// - Must not be blank
///
/// ## Returns
/// The trimmed pattern.
pub fn validate_search_pattern(pattern: &str) -> ValidationResult<String> {
    let pattern = pattern.trim();
    if pattern.is_empty() {
        return Err(ValidationError::required("name pattern"));
    }
    Ok(pattern.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price.
///
/// ## Rules
/// - Must be finite (no NaN / infinity)
/// - Must be non-negative (>= 0); zero is allowed
pub fn validate_price(price: f64) -> ValidationResult<f64> {
    if !price.is_finite() {
        return Err(ValidationError::InvalidNumber {
            field: "price".to_string(),
        });
    }
    if price < 0.0 {
        return Err(ValidationError::negative("price"));
    }
    Ok(price)
}

/// Validates an absolute stock quantity.
///
/// ## Rules
/// - Must be non-negative (>= 0)
pub fn validate_quantity(quantity: i64) -> ValidationResult<i64> {
    if quantity < 0 {
        return Err(ValidationError::negative("quantity"));
    }
    Ok(quantity)
}

/// Validates a low-stock threshold. Same rule as [`validate_quantity`].
pub fn validate_threshold(threshold: i64) -> ValidationResult<i64> {
    if threshold < 0 {
        return Err(ValidationError::negative("threshold"));
    }
    Ok(threshold)
}

/// Validates a price range query.
///
/// ## Rules
/// - Both bounds finite and non-negative
/// - `min <= max`
///
/// ## Example
/// ```rust
/// use fruit_core::validation::validate_price_range;
///
/// assert!(validate_price_range(1.0, 5.0).is_ok());
/// assert!(validate_price_range(2.0, 2.0).is_ok());
/// assert!(validate_price_range(-1.0, 5.0).is_err());
/// ```
pub fn validate_price_range(min: f64, max: f64) -> ValidationResult<()> {
    validate_price(min)?;
    validate_price(max)?;

    if min > max {
        return Err(ValidationError::PriceRangeInverted { min, max });
    }

    Ok(())
}

/// Computes `current + delta`, rejecting results below zero.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Inventory: Adjust Stock                                                │
/// │                                                                         │
/// │  Current stock: 100, user enters -150                                  │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  checked_stock_adjustment(100, -150) ← THIS FUNCTION                   │
/// │       │                                                                 │
/// │       ├── result < 0? → Error: "... negative quantity ..."             │
/// │       │                                                                 │
/// │       └── OK(new quantity) → persisted                                 │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn checked_stock_adjustment(current: i64, delta: i64) -> ValidationResult<i64> {
    match current.checked_add(delta) {
        Some(quantity) if quantity >= 0 => Ok(quantity),
        Some(_) => Err(ValidationError::NegativeQuantity { current, delta }),
        None => Err(ValidationError::InvalidInteger {
            field: "quantity".to_string(),
        }),
    }
}

// =============================================================================
// Raw Value Parsers
// =============================================================================

fn expect_text<'a>(field: &str, value: &'a Value) -> ValidationResult<&'a str> {
    match value {
        Value::String(s) => Ok(s),
        Value::Null => Err(ValidationError::required(field)),
        _ => Err(ValidationError::InvalidType {
            field: field.to_string(),
            expected: "string".to_string(),
        }),
    }
}

/// Parses a raw price value (JSON number or numeric text).
///
/// ## Rules
/// - `"1.99"`, `1.99`, `2` are accepted
/// - `"abc"`, `true`, `null`, NaN → "price must be a valid number"
/// - negative → "price cannot be negative"
pub fn parse_price(value: &Value) -> ValidationResult<f64> {
    let invalid = || ValidationError::InvalidNumber {
        field: "price".to_string(),
    };

    let price = match value {
        Value::Number(n) => n.as_f64().ok_or_else(invalid)?,
        Value::String(s) => s.trim().parse::<f64>().map_err(|_| invalid())?,
        _ => return Err(invalid()),
    };

    validate_price(price)
}

/// Parses a raw quantity value (JSON integer or integer text).
///
/// ## Rules
/// - `100`, `"100"`, `100.0` are accepted
/// - `"ten"`, `1.5`, `null` → "quantity must be a valid integer"
/// - negative → "quantity cannot be negative"
pub fn parse_quantity(value: &Value) -> ValidationResult<i64> {
    let invalid = || ValidationError::InvalidInteger {
        field: "quantity".to_string(),
    };

    let quantity = match value {
        Value::Number(n) => match n.as_i64() {
            Some(q) => q,
            None => {
                let f = n.as_f64().ok_or_else(invalid)?;
                // i64::MAX as f64 rounds up to 2^63, which is already out of range.
                if f.fract() != 0.0 || f < i64::MIN as f64 || f >= i64::MAX as f64 {
                    return Err(invalid());
                }
                f as i64
            }
        },
        Value::String(s) => s.trim().parse::<i64>().map_err(|_| invalid())?,
        _ => return Err(invalid()),
    };

    validate_quantity(quantity)
}

/// Parses an optional image path. `null` or blank text clears it.
fn parse_image_path(value: &Value) -> ValidationResult<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => Ok(Some(s.trim().to_string())),
        _ => Err(ValidationError::InvalidType {
            field: "image_path".to_string(),
            expected: "string".to_string(),
        }),
    }
}

// =============================================================================
// Record Validators
// =============================================================================

/// Validates input for a new fruit.
///
/// ## Rules
/// - `name`, `category`, `price`, `quantity` must all be supplied
/// - each supplied field must pass its own rule
///
/// All failures are collected; the error lists every missing or invalid
/// field.
pub fn validate_new_fruit(fields: &FruitFields) -> Result<NewFruit, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    for field in fields.missing_required() {
        errors.push(ValidationError::required(field));
    }

    let name = fields
        .name
        .as_ref()
        .and_then(|v| errors.collect(expect_text("name", v).and_then(validate_name)));
    let category = fields
        .category
        .as_ref()
        .and_then(|v| errors.collect(expect_text("category", v).and_then(validate_category)));
    let price = fields
        .price
        .as_ref()
        .and_then(|v| errors.collect(parse_price(v)));
    let quantity = fields
        .quantity
        .as_ref()
        .and_then(|v| errors.collect(parse_quantity(v)));
    let image_path = match fields.image_path.as_ref() {
        Some(v) => errors.collect(parse_image_path(v)).flatten(),
        None => None,
    };

    match (name, category, price, quantity) {
        (Some(name), Some(category), Some(price), Some(quantity)) if errors.is_empty() => {
            Ok(NewFruit {
                name,
                category,
                price,
                quantity,
                image_path,
            })
        }
        _ => Err(errors),
    }
}

/// Validates a partial update.
///
/// ## Rules
/// - Only supplied fields are checked; nothing is required
/// - Supplied fields follow the same rules as on create
pub fn validate_fruit_patch(fields: &FruitFields) -> Result<FruitPatch, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let patch = FruitPatch {
        name: fields
            .name
            .as_ref()
            .and_then(|v| errors.collect(expect_text("name", v).and_then(validate_name))),
        category: fields
            .category
            .as_ref()
            .and_then(|v| errors.collect(expect_text("category", v).and_then(validate_category))),
        price: fields
            .price
            .as_ref()
            .and_then(|v| errors.collect(parse_price(v))),
        quantity: fields
            .quantity
            .as_ref()
            .and_then(|v| errors.collect(parse_quantity(v))),
        image_path: fields
            .image_path
            .as_ref()
            .and_then(|v| errors.collect(parse_image_path(v))),
    };

    errors.into_result(patch)
}

// =============================================================================
// Unit Tests
// =============================================================================
