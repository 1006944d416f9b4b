//! # Fruit Service
//!
//! Business rules for the fruit inventory on top of [`FruitRepository`].
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    FruitService Operation                               │
//! │                                                                         │
//! │  Caller (form, dashboard, import)                                      │
//! │       │  FruitFields / ids / bounds                                     │
//! │       ▼                                                                 │
//! │  fruit_core::validation  ── invalid ──► ServiceError::Validation       │
//! │       │                                  (logged, nothing written)      │
//! │       ▼                                                                 │
//! │  FruitRepository          ── failure ──► ServiceError::Repository      │
//! │       │                                  (logged)                       │
//! │       ▼                                                                 │
//! │  Ok(Fruit | Option<Fruit> | Vec<Fruit> | aggregate)                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Stock Rules
//! - `update_stock` sets an absolute, non-negative quantity.
//! - `adjust_stock` adds a signed delta; a result below zero is rejected and
//!   the stored quantity is left unchanged.

use tracing::{debug, error, info, warn};

use fruit_core::validation::{
    checked_stock_adjustment, validate_category, validate_fruit_patch, validate_id,
    validate_new_fruit, validate_price_range, validate_quantity, validate_search_pattern,
    validate_threshold,
};
use fruit_core::{
    CategorySummary, Fruit, FruitFields, ValidationError, DEFAULT_LOW_STOCK_THRESHOLD,
};
use fruit_db::{Database, FieldFilter, FruitRepository, StockChange};

use crate::config::StoreConfig;
use crate::error::{ServiceError, ServiceResult};

/// Logs a failed operation and hands the error back unchanged.
fn fail(operation: &'static str, err: impl Into<ServiceError>) -> ServiceError {
    let err = err.into();
    error!(operation, error = %err, "Fruit operation failed");
    err
}

/// Domain service for fruit inventory.
///
/// ## Usage
/// ```rust,ignore
/// let service = FruitService::open(&StoreConfig::from_env()?).await?;
///
/// let apple = service
///     .create(&FruitFields::new().name("Apple").category("Core Fruits").price(1.99).quantity(150))
///     .await?;
/// service.adjust_stock(apple.id, -20).await?;
/// ```
#[derive(Debug, Clone)]
pub struct FruitService {
    db: Database,
    low_stock_threshold: i64,
}

impl FruitService {
    /// Wraps an open database with the default low-stock threshold.
    pub fn new(db: Database) -> Self {
        FruitService {
            db,
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }

    /// Opens the database described by `config` and applies its threshold.
    pub async fn open(config: &StoreConfig) -> ServiceResult<Self> {
        let db = Database::new(config.db_config())
            .await
            .map_err(|e| fail("open", e))?;

        Ok(FruitService::new(db).with_low_stock_threshold(config.low_stock_threshold))
    }

    /// Overrides the threshold used by [`get_low_stock_default`](Self::get_low_stock_default).
    pub fn with_low_stock_threshold(mut self, threshold: i64) -> Self {
        self.low_stock_threshold = threshold;
        self
    }

    /// The threshold used by [`get_low_stock_default`](Self::get_low_stock_default).
    pub fn low_stock_threshold(&self) -> i64 {
        self.low_stock_threshold
    }

    /// The underlying database handle.
    pub fn database(&self) -> &Database {
        &self.db
    }

    fn fruits(&self) -> FruitRepository {
        self.db.fruits()
    }

    // =========================================================================
    // CRUD
    // =========================================================================

    /// Validates a raw field dictionary and stores a new fruit.
    ///
    /// Every failing field is reported, not just the first.
    pub async fn create(&self, fields: &FruitFields) -> ServiceResult<Fruit> {
        let new_fruit = validate_new_fruit(fields).map_err(|e| fail("create", e))?;

        let fruit = self
            .fruits()
            .insert(&new_fruit)
            .await
            .map_err(|e| fail("create", e))?;

        info!(id = %fruit.id, name = %fruit.name, "Fruit created");
        Ok(fruit)
    }

    /// Gets a fruit by id. `Ok(None)` when it doesn't exist.
    pub async fn get_by_id(&self, id: i64) -> ServiceResult<Option<Fruit>> {
        validate_id(id).map_err(|e| fail("get_by_id", e))?;

        self.fruits()
            .find_by_id(id)
            .await
            .map_err(|e| fail("get_by_id", e))
    }

    /// Every fruit, ordered by id.
    pub async fn get_all(&self) -> ServiceResult<Vec<Fruit>> {
        self.fruits().find_all().await.map_err(|e| fail("get_all", e))
    }

    /// Applies the present fields of `fields` to an existing fruit.
    ///
    /// ## Order
    /// 1. id must be positive
    /// 2. missing fruit → `Ok(None)`
    /// 3. present fields validated (absent ones untouched)
    /// 4. patched columns written in one statement, `updated_at` refreshed
    ///
    /// Columns the caller did not send are never rewritten, so a stock
    /// adjustment landing between a read and this update is kept.
    pub async fn update(&self, id: i64, fields: &FruitFields) -> ServiceResult<Option<Fruit>> {
        validate_id(id).map_err(|e| fail("update", e))?;

        if !self.fruits().exists(id).await.map_err(|e| fail("update", e))? {
            debug!(id = %id, "Update skipped, fruit not found");
            return Ok(None);
        }

        let patch = validate_fruit_patch(fields).map_err(|e| fail("update", e))?;

        let updated = self
            .fruits()
            .apply_patch(id, &patch)
            .await
            .map_err(|e| fail("update", e))?;

        if updated.is_some() {
            info!(id = %id, "Fruit updated");
        }
        Ok(updated)
    }

    /// Deletes a fruit. `Ok(false)` when there was nothing to delete.
    pub async fn delete(&self, id: i64) -> ServiceResult<bool> {
        validate_id(id).map_err(|e| fail("delete", e))?;

        let deleted = self
            .fruits()
            .delete(id)
            .await
            .map_err(|e| fail("delete", e))?;

        if deleted {
            info!(id = %id, "Fruit deleted");
        }
        Ok(deleted)
    }

    /// Number of stored fruits.
    pub async fn count(&self) -> ServiceResult<i64> {
        self.fruits().count().await.map_err(|e| fail("count", e))
    }

    // =========================================================================
    // Stock
    // =========================================================================

    /// Sets the stock level to `new_quantity`.
    pub async fn update_stock(&self, id: i64, new_quantity: i64) -> ServiceResult<Option<Fruit>> {
        validate_id(id).map_err(|e| fail("update_stock", e))?;
        validate_quantity(new_quantity).map_err(|e| fail("update_stock", e))?;

        let updated = self
            .fruits()
            .set_quantity(id, new_quantity)
            .await
            .map_err(|e| fail("update_stock", e))?;

        if updated.is_some() {
            info!(id = %id, quantity = %new_quantity, "Stock set");
        }
        Ok(updated)
    }

    /// Adds `delta` (positive or negative) to the stock level.
    ///
    /// ## Returns
    /// * `Ok(Some(Fruit))` - Adjusted record
    /// * `Ok(None)` - No fruit with that id
    /// * `Err(ServiceError::Validation)` - Result would be negative; nothing changed
    pub async fn adjust_stock(&self, id: i64, delta: i64) -> ServiceResult<Option<Fruit>> {
        validate_id(id).map_err(|e| fail("adjust_stock", e))?;

        let change = self
            .fruits()
            .adjust_quantity(id, delta)
            .await
            .map_err(|e| fail("adjust_stock", e))?;

        match change {
            StockChange::Applied(fruit) => {
                info!(id = %id, delta = %delta, quantity = %fruit.quantity, "Stock adjusted");
                if delta < 0 && fruit.is_low_stock(self.low_stock_threshold) {
                    warn!(id = %id, quantity = %fruit.quantity, "Fruit is low on stock");
                }
                Ok(Some(fruit))
            }
            StockChange::Missing => Ok(None),
            StockChange::Rejected { quantity } => {
                let err = checked_stock_adjustment(quantity, delta)
                    .err()
                    .unwrap_or(ValidationError::NegativeQuantity {
                        current: quantity,
                        delta,
                    });
                Err(fail("adjust_stock", err))
            }
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Fruits in exactly this category.
    pub async fn get_by_category(&self, category: &str) -> ServiceResult<Vec<Fruit>> {
        let category = validate_category(category).map_err(|e| fail("get_by_category", e))?;

        self.fruits()
            .find_by_field(FieldFilter::Category(category))
            .await
            .map_err(|e| fail("get_by_category", e))
    }

    /// Case-insensitive substring search on the name.
    pub async fn search_by_name(&self, pattern: &str) -> ServiceResult<Vec<Fruit>> {
        let pattern = validate_search_pattern(pattern).map_err(|e| fail("search_by_name", e))?;

        self.fruits()
            .search_by_name(&pattern)
            .await
            .map_err(|e| fail("search_by_name", e))
    }

    /// Fruits priced within `[min, max]`.
    pub async fn get_by_price_range(&self, min: f64, max: f64) -> ServiceResult<Vec<Fruit>> {
        validate_price_range(min, max).map_err(|e| fail("get_by_price_range", e))?;

        self.fruits()
            .find_by_price_range(min, max)
            .await
            .map_err(|e| fail("get_by_price_range", e))
    }

    /// Fruits with fewer than `threshold` units in stock.
    pub async fn get_low_stock(&self, threshold: i64) -> ServiceResult<Vec<Fruit>> {
        let threshold = validate_threshold(threshold).map_err(|e| fail("get_low_stock", e))?;

        self.fruits()
            .find_low_stock(threshold)
            .await
            .map_err(|e| fail("get_low_stock", e))
    }

    /// [`get_low_stock`](Self::get_low_stock) with the configured threshold.
    pub async fn get_low_stock_default(&self) -> ServiceResult<Vec<Fruit>> {
        self.get_low_stock(self.low_stock_threshold).await
    }

    /// Sum of `price * quantity` over the whole inventory.
    pub async fn get_total_inventory_value(&self) -> ServiceResult<f64> {
        self.fruits()
            .total_inventory_value()
            .await
            .map_err(|e| fail("get_total_inventory_value", e))
    }

    /// Count, stock and value per category.
    pub async fn get_category_summary(&self) -> ServiceResult<Vec<CategorySummary>> {
        self.fruits()
            .category_summary()
            .await
            .map_err(|e| fail("get_category_summary", e))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use fruit_db::{DbConfig, DbError};
    use serde_json::json;

    async fn test_service() -> FruitService {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        FruitService::new(db)
    }

    fn fields(name: &str, category: &str, price: f64, quantity: i64) -> FruitFields {
        FruitFields::new()
            .name(name)
            .category(category)
            .price(price)
            .quantity(quantity)
    }

    async fn seeded() -> (FruitService, Vec<Fruit>) {
        let service = test_service().await;
        let mut fruits = Vec::new();
        for f in [
            fields("Apple", "Core Fruits", 1.99, 150),
            fields("Banana", "Tropical", 0.59, 200),
            fields("Orange", "Citrus", 1.29, 100),
            fields("Strawberry", "Berries", 3.99, 5),
            fields("Mango", "Tropical", 2.49, 8),
        ] {
            fruits.push(service.create(&f).await.unwrap());
        }
        (service, fruits)
    }

    fn assert_validation(err: &ServiceError, needle: &str) {
        assert!(err.is_validation(), "expected validation error, got {err:?}");
        assert!(
            err.to_string().contains(needle),
            "{err} does not mention {needle:?}"
        );
    }

    // -------------------------------------------------------------------------
    // create
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_create_assigns_unique_ids_and_equal_timestamps() {
        let (service, fruits) = seeded().await;

        let mut ids: Vec<_> = fruits.iter().map(|f| f.id).collect();
        assert!(ids.iter().all(|id| *id > 0));
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), fruits.len());

        for fruit in &fruits {
            assert_eq!(fruit.created_at, fruit.updated_at);
        }
        assert_eq!(service.count().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_create_apple_round_trip() {
        let service = test_service().await;
        let created = service
            .create(&fields("Apple", "Fresh Fruits", 1.99, 100))
            .await
            .unwrap();

        assert!(created.id > 0);
        let fetched = service.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Apple");
        assert_eq!(fetched.category, "Fresh Fruits");
        assert_eq!(fetched.price, 1.99);
        assert_eq!(fetched.quantity, 100);
        assert_eq!(fetched.image_path, None);
    }

    #[tokio::test]
    async fn test_create_accepts_numeric_strings_and_image_path() {
        let service = test_service().await;
        let fruit = service
            .create(
                &FruitFields::new()
                    .name("Kiwi")
                    .category("Exotic")
                    .price("0.75")
                    .quantity("30")
                    .image_path("images/kiwi.png"),
            )
            .await
            .unwrap();

        assert_eq!(fruit.price, 0.75);
        assert_eq!(fruit.quantity, 30);
        assert_eq!(fruit.image_path.as_deref(), Some("images/kiwi.png"));
    }

    #[tokio::test]
    async fn test_create_rejects_negative_price_and_quantity() {
        let service = test_service().await;

        let err = service
            .create(&fields("Apple", "Core Fruits", -1.0, 10))
            .await
            .unwrap_err();
        assert_validation(&err, "price cannot be negative");

        let err = service
            .create(&fields("Apple", "Core Fruits", 1.0, -10))
            .await
            .unwrap_err();
        assert_validation(&err, "quantity cannot be negative");

        assert_eq!(service.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_rejects_bad_types() {
        let service = test_service().await;

        let err = service
            .create(&fields("Apple", "Core Fruits", 1.0, 1).price("abc"))
            .await
            .unwrap_err();
        assert_validation(&err, "price must be a valid number");

        let err = service
            .create(&fields("Apple", "Core Fruits", 1.0, 1).quantity("lots"))
            .await
            .unwrap_err();
        assert_validation(&err, "quantity must be a valid integer");

        let err = service
            .create(&fields("A", "Core Fruits", 1.0, 1))
            .await
            .unwrap_err();
        assert_validation(&err, "name must be at least 2 characters");
    }

    #[tokio::test]
    async fn test_create_reports_every_failing_field() {
        let service = test_service().await;

        let raw: FruitFields = serde_json::from_value(json!({
            "name": "A",
            "price": -2,
        }))
        .unwrap();

        let err = service.create(&raw).await.unwrap_err();
        let errors = err.validation_errors().unwrap();
        assert!(errors.has_field("name"));
        assert!(errors.has_field("category"));
        assert!(errors.has_field("price"));
        assert!(errors.has_field("quantity"));
    }

    // -------------------------------------------------------------------------
    // read / update / delete
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_get_by_id_validates_id() {
        let service = test_service().await;

        assert!(service.get_by_id(0).await.unwrap_err().is_validation());
        assert!(service.get_by_id(-3).await.unwrap_err().is_validation());
        assert!(service.get_by_id(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_all_in_id_order() {
        let (service, fruits) = seeded().await;
        assert_eq!(service.get_all().await.unwrap(), fruits);
    }

    #[tokio::test]
    async fn test_partial_update_leaves_other_fields() {
        let (service, fruits) = seeded().await;
        let apple = &fruits[0];
        std::thread::sleep(std::time::Duration::from_millis(5));

        let updated = service
            .update(apple.id, &FruitFields::new().price(2.25))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.price, 2.25);
        assert_eq!(updated.name, apple.name);
        assert_eq!(updated.category, apple.category);
        assert_eq!(updated.quantity, apple.quantity);
        assert_eq!(updated.image_path, apple.image_path);
        assert_eq!(updated.created_at, apple.created_at);
        assert!(updated.updated_at > apple.updated_at);
    }

    #[tokio::test]
    async fn test_update_keeps_interleaved_stock_adjustment() {
        let (service, fruits) = seeded().await;
        let id = fruits[0].id;

        // A form reads the record, stock moves, then the form saves a price.
        let read = service.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(read.quantity, 150);
        service.adjust_stock(id, -30).await.unwrap().unwrap();

        let updated = service
            .update(id, &FruitFields::new().price(2.25))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.price, 2.25);
        assert_eq!(updated.quantity, 120);

        let stored = service.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.quantity, 120);
        assert_eq!(stored.price, 2.25);
    }

    #[tokio::test]
    async fn test_update_without_fields_only_touches_timestamp() {
        let (service, fruits) = seeded().await;
        let apple = &fruits[0];
        std::thread::sleep(std::time::Duration::from_millis(5));

        let updated = service
            .update(apple.id, &FruitFields::new())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.name, apple.name);
        assert_eq!(updated.price, apple.price);
        assert_eq!(updated.quantity, apple.quantity);
        assert!(updated.updated_at > apple.updated_at);
    }

    #[tokio::test]
    async fn test_update_clears_image_path_with_null() {
        let service = test_service().await;
        let kiwi = service
            .create(&fields("Kiwi", "Exotic", 0.75, 30).image_path("kiwi.png"))
            .await
            .unwrap();

        let raw: FruitFields = serde_json::from_value(json!({ "imagePath": null })).unwrap();
        let updated = service.update(kiwi.id, &raw).await.unwrap().unwrap();
        assert_eq!(updated.image_path, None);
    }

    #[tokio::test]
    async fn test_update_missing_and_invalid() {
        let (service, fruits) = seeded().await;

        assert!(service
            .update(9999, &FruitFields::new().price(1.0))
            .await
            .unwrap()
            .is_none());

        assert!(service
            .update(0, &FruitFields::new().price(1.0))
            .await
            .unwrap_err()
            .is_validation());

        let err = service
            .update(fruits[0].id, &FruitFields::new().quantity(-1))
            .await
            .unwrap_err();
        assert_validation(&err, "quantity cannot be negative");

        let unchanged = service.get_by_id(fruits[0].id).await.unwrap().unwrap();
        assert_eq!(unchanged.quantity, 150);
    }

    #[tokio::test]
    async fn test_delete_then_get() {
        let (service, fruits) = seeded().await;
        let id = fruits[2].id;

        assert!(service.delete(id).await.unwrap());
        assert!(service.get_by_id(id).await.unwrap().is_none());
        assert!(!service.delete(id).await.unwrap());
        assert!(service.delete(0).await.unwrap_err().is_validation());
        assert_eq!(service.count().await.unwrap(), 4);
    }

    // -------------------------------------------------------------------------
    // stock
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_update_stock() {
        let (service, fruits) = seeded().await;

        let fruit = service.update_stock(fruits[1].id, 0).await.unwrap().unwrap();
        assert_eq!(fruit.quantity, 0);

        let err = service.update_stock(fruits[1].id, -1).await.unwrap_err();
        assert_validation(&err, "quantity cannot be negative");

        assert!(service.update_stock(9999, 5).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_adjust_stock_round_trip() {
        let (service, fruits) = seeded().await;
        let id = fruits[2].id;

        let up = service.adjust_stock(id, 37).await.unwrap().unwrap();
        assert_eq!(up.quantity, 137);
        let down = service.adjust_stock(id, -37).await.unwrap().unwrap();
        assert_eq!(down.quantity, 100);
    }

    #[tokio::test]
    async fn test_stock_operations_refresh_updated_at() {
        let (service, fruits) = seeded().await;
        let orange = &fruits[2];

        std::thread::sleep(std::time::Duration::from_millis(5));
        let set = service.update_stock(orange.id, 40).await.unwrap().unwrap();
        assert_eq!(set.quantity, 40);
        assert!(set.updated_at > orange.updated_at);
        assert_eq!(set.created_at, orange.created_at);

        std::thread::sleep(std::time::Duration::from_millis(5));
        let adjusted = service.adjust_stock(orange.id, -15).await.unwrap().unwrap();
        assert_eq!(adjusted.quantity, 25);
        assert!(adjusted.updated_at > set.updated_at);
        assert_eq!(adjusted.created_at, orange.created_at);

        std::thread::sleep(std::time::Duration::from_millis(5));
        assert!(service.adjust_stock(orange.id, -100).await.is_err());
        let after = service.get_by_id(orange.id).await.unwrap().unwrap();
        assert_eq!(after.updated_at, adjusted.updated_at);
    }

    #[tokio::test]
    async fn test_adjust_stock_below_zero_is_rejected() {
        let service = test_service().await;
        let fruit = service.create(&fields("Lime", "Citrus", 0.3, 100)).await.unwrap();

        let err = service.adjust_stock(fruit.id, -150).await.unwrap_err();
        assert_validation(&err, "negative quantity");

        let after = service.get_by_id(fruit.id).await.unwrap().unwrap();
        assert_eq!(after.quantity, 100);
    }

    #[tokio::test]
    async fn test_adjust_stock_missing_and_overflow() {
        let (service, fruits) = seeded().await;

        assert!(service.adjust_stock(9999, 1).await.unwrap().is_none());
        assert!(service.adjust_stock(0, 1).await.unwrap_err().is_validation());

        let err = service.adjust_stock(fruits[0].id, i64::MAX).await.unwrap_err();
        assert_validation(&err, "quantity must be a valid integer");
    }

    // -------------------------------------------------------------------------
    // queries
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_get_by_category() {
        let (service, _) = seeded().await;

        let tropical = service.get_by_category("Tropical").await.unwrap();
        let names: Vec<_> = tropical.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["Banana", "Mango"]);

        let err = service.get_by_category("T").await.unwrap_err();
        assert_validation(&err, "category must be at least 2 characters");
    }

    #[tokio::test]
    async fn test_search_by_name() {
        let (service, _) = seeded().await;

        let found = service.search_by_name("  an ").await.unwrap();
        let names: Vec<_> = found.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["Banana", "Orange", "Mango"]);

        assert!(service.search_by_name("   ").await.unwrap_err().is_validation());
    }

    #[tokio::test]
    async fn test_get_by_price_range() {
        let (service, _) = seeded().await;

        let cheap = service.get_by_price_range(0.0, 1.5).await.unwrap();
        let names: Vec<_> = cheap.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["Banana", "Orange"]);

        let err = service.get_by_price_range(5.0, 1.0).await.unwrap_err();
        assert_validation(&err, "minimum price cannot be greater than maximum price");

        assert!(service
            .get_by_price_range(-1.0, 1.0)
            .await
            .unwrap_err()
            .is_validation());
        assert!(service
            .get_by_price_range(0.0, f64::NAN)
            .await
            .unwrap_err()
            .is_validation());
    }

    #[tokio::test]
    async fn test_low_stock() {
        let (service, _) = seeded().await;

        let low = service.get_low_stock_default().await.unwrap();
        let names: Vec<_> = low.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["Strawberry", "Mango"]);

        let service = service.with_low_stock_threshold(6);
        assert_eq!(service.low_stock_threshold(), 6);
        assert_eq!(service.get_low_stock_default().await.unwrap().len(), 1);

        assert!(service.get_low_stock(-1).await.unwrap_err().is_validation());
        assert!(service.get_low_stock(0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_total_value_matches_get_all() {
        let (service, _) = seeded().await;

        let expected: f64 = service
            .get_all()
            .await
            .unwrap()
            .iter()
            .map(Fruit::inventory_value)
            .sum();
        let total = service.get_total_inventory_value().await.unwrap();
        assert!((total - expected).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_empty_store_aggregates() {
        let service = test_service().await;

        assert_eq!(service.get_total_inventory_value().await.unwrap(), 0.0);
        assert!(service.get_category_summary().await.unwrap().is_empty());
        assert!(service.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_category_summary() {
        let (service, _) = seeded().await;

        let summary = service.get_category_summary().await.unwrap();
        let categories: Vec<_> = summary.iter().map(|s| s.category.as_str()).collect();
        assert_eq!(categories, ["Berries", "Citrus", "Core Fruits", "Tropical"]);
        assert_eq!(summary.iter().map(|s| s.count).sum::<i64>(), 5);
    }

    // -------------------------------------------------------------------------
    // storage failures
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_closed_database_surfaces_repository_error() {
        let service = test_service().await;
        service.database().close().await;

        let err = service.get_all().await.unwrap_err();
        assert!(matches!(err, ServiceError::Repository(DbError::ConnectionFailed(_))));

        // Validation still runs first.
        assert!(service
            .create(&fields("A", "Core Fruits", 1.0, 1))
            .await
            .unwrap_err()
            .is_validation());
    }

    #[tokio::test]
    async fn test_open_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig::from_lookup(|key| match key {
            "FRUIT_DB_PATH" => Some(dir.path().join("store.db").display().to_string()),
            "FRUIT_LOW_STOCK_THRESHOLD" => Some("3".to_string()),
            _ => None,
        })
        .unwrap();

        let service = FruitService::open(&config).await.unwrap();
        assert_eq!(service.low_stock_threshold(), 3);
        assert_eq!(service.count().await.unwrap(), 0);
        service.database().close().await;
    }
}
