//! # Fruit Repository
//!
//! Database operations for fruit records.
//!
//! ## Key Operations
//! - CRUD operations
//! - Field lookups, name search, price range, low stock
//! - Inventory aggregates
//! - Atomic stock updates
//!
//! ## Row Mapping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Row → Record                                         │
//! │                                                                         │
//! │  SELECT id, name, ... FROM fruits                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  FruitRow (sqlx::FromRow)   ← column type mismatch → DbError::Mapping  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Fruit::try_from(row)       ← id <= 0, price < 0, quantity < 0          │
//! │       │                        → DbError::Mapping                       │
//! │       ▼                                                                 │
//! │  Fruit                                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Stock Updates
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  UPDATE fruits                                                          │
//! │     SET quantity = quantity + ?delta                                    │
//! │   WHERE id = ?id AND quantity + ?delta >= 0                             │
//! │  RETURNING ...                                                          │
//! │                                                                         │
//! │  row returned ──► StockChange::Applied(fruit)                          │
//! │  no row, id exists ──► StockChange::Rejected { quantity }              │
//! │  no row, no id ──► StockChange::Missing                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! The check and the write are one statement, so two concurrent adjustments
//! cannot both read the same starting quantity.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use fruit_core::{CategorySummary, Fruit, FruitPatch, NewFruit};

// =============================================================================
// Row Mapping
// =============================================================================

/// A raw `fruits` row as SQLite returns it.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FruitRow {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub quantity: i64,
    pub image_path: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<FruitRow> for Fruit {
    type Error = DbError;

    fn try_from(row: FruitRow) -> Result<Self, Self::Error> {
        if row.id <= 0 {
            return Err(DbError::mapping("Fruit", format!("id {} is not positive", row.id)));
        }
        if !row.price.is_finite() || row.price < 0.0 {
            return Err(DbError::mapping(
                "Fruit",
                format!("price {} on id {} is invalid", row.price, row.id),
            ));
        }
        if row.quantity < 0 {
            return Err(DbError::mapping(
                "Fruit",
                format!("quantity {} on id {} is negative", row.quantity, row.id),
            ));
        }

        Ok(Fruit {
            id: row.id,
            name: row.name,
            category: row.category,
            price: row.price,
            quantity: row.quantity,
            image_path: row.image_path,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn into_fruits(rows: Vec<FruitRow>) -> DbResult<Vec<Fruit>> {
    rows.into_iter().map(Fruit::try_from).collect()
}

fn into_fruit(row: Option<FruitRow>) -> DbResult<Option<Fruit>> {
    row.map(Fruit::try_from).transpose()
}

/// Escapes `%`, `_` and the escape character itself for a `LIKE ... ESCAPE '\'`.
fn like_contains(pattern: &str) -> String {
    let mut escaped = String::with_capacity(pattern.len() + 2);
    escaped.push('%');
    for c in pattern.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

// =============================================================================
// Field Filter
// =============================================================================

/// Equality filter on a single `fruits` column.
///
/// Typed so that the column name never comes from caller input; string-driven
/// callers go through [`FieldFilter::parse`].
#[derive(Debug, Clone, PartialEq)]
pub enum FieldFilter {
    Id(i64),
    Name(String),
    Category(String),
    Price(f64),
    Quantity(i64),
    /// `None` matches rows without an image.
    ImagePath(Option<String>),
}

impl FieldFilter {
    /// Builds a filter from a field name and its textual value.
    ///
    /// Accepts both `image_path` and `imagePath`. Unknown fields and values
    /// that don't parse for the column's type are mapping errors.
    pub fn parse(field: &str, value: &str) -> DbResult<Self> {
        let invalid = |kind: &str| {
            DbError::mapping("FieldFilter", format!("{field} expects {kind}, got {value:?}"))
        };

        match field {
            "id" => value.trim().parse().map(FieldFilter::Id).map_err(|_| invalid("an integer")),
            "name" => Ok(FieldFilter::Name(value.to_string())),
            "category" => Ok(FieldFilter::Category(value.to_string())),
            "price" => value
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|p| p.is_finite())
                .map(FieldFilter::Price)
                .ok_or_else(|| invalid("a number")),
            "quantity" => value
                .trim()
                .parse()
                .map(FieldFilter::Quantity)
                .map_err(|_| invalid("an integer")),
            "image_path" | "imagePath" => Ok(FieldFilter::ImagePath(Some(value.to_string()))),
            other => Err(DbError::mapping(
                "FieldFilter",
                format!("unknown field {other:?}"),
            )),
        }
    }

    /// The column this filter compares.
    pub fn column(&self) -> &'static str {
        match self {
            FieldFilter::Id(_) => "id",
            FieldFilter::Name(_) => "name",
            FieldFilter::Category(_) => "category",
            FieldFilter::Price(_) => "price",
            FieldFilter::Quantity(_) => "quantity",
            FieldFilter::ImagePath(_) => "image_path",
        }
    }
}

// =============================================================================
// Stock Change
// =============================================================================

/// Outcome of [`FruitRepository::adjust_quantity`].
#[derive(Debug, Clone, PartialEq)]
pub enum StockChange {
    /// The delta was applied; carries the updated record.
    Applied(Fruit),
    /// No fruit with that id.
    Missing,
    /// The delta would have taken stock below zero (or past `i64::MAX`).
    /// Nothing was written; `quantity` is the stock at the time of the check.
    Rejected { quantity: i64 },
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for fruit database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = FruitRepository::new(pool);
///
/// let fruit = repo.insert(&new_fruit).await?;
/// let found = repo.find_by_id(fruit.id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct FruitRepository {
    pool: SqlitePool,
}

impl FruitRepository {
    /// Creates a new FruitRepository.
    pub fn new(pool: SqlitePool) -> Self {
        FruitRepository { pool }
    }

    // -------------------------------------------------------------------------
    // CRUD
    // -------------------------------------------------------------------------

    /// Inserts a new fruit.
    ///
    /// The id is assigned by SQLite (`AUTOINCREMENT`, never reused) and both
    /// timestamps are set to the same instant.
    ///
    /// ## Returns
    /// * `Ok(Fruit)` - The stored record
    /// * `Err(DbError::ConstraintViolation)` - A CHECK rejected the values
    pub async fn insert(&self, fruit: &NewFruit) -> DbResult<Fruit> {
        debug!(name = %fruit.name, category = %fruit.category, "Inserting fruit");

        let now = Utc::now();

        let row = sqlx::query_as::<_, FruitRow>(
            r#"
            INSERT INTO fruits (
                name, category, price, quantity, image_path, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
            RETURNING id, name, category, price, quantity, image_path, created_at, updated_at
            "#,
        )
        .bind(&fruit.name)
        .bind(&fruit.category)
        .bind(fruit.price)
        .bind(fruit.quantity)
        .bind(&fruit.image_path)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Fruit::try_from(row)
    }

    /// Gets a fruit by its id.
    ///
    /// ## Returns
    /// * `Ok(Some(Fruit))` - Fruit found
    /// * `Ok(None)` - Fruit not found
    pub async fn find_by_id(&self, id: i64) -> DbResult<Option<Fruit>> {
        let row = sqlx::query_as::<_, FruitRow>(
            r#"
            SELECT id, name, category, price, quantity, image_path, created_at, updated_at
            FROM fruits
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        into_fruit(row)
    }

    /// Lists every fruit, ordered by id.
    pub async fn find_all(&self) -> DbResult<Vec<Fruit>> {
        let rows = sqlx::query_as::<_, FruitRow>(
            r#"
            SELECT id, name, category, price, quantity, image_path, created_at, updated_at
            FROM fruits
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        into_fruits(rows)
    }

    /// Rewrites every mutable field of an existing fruit.
    ///
    /// `created_at` is kept, `updated_at` is refreshed.
    ///
    /// ## Returns
    /// * `Ok(Some(Fruit))` - The stored record after the update
    /// * `Ok(None)` - No fruit with `fruit.id`
    pub async fn update(&self, fruit: &Fruit) -> DbResult<Option<Fruit>> {
        debug!(id = %fruit.id, "Updating fruit");

        let row = sqlx::query_as::<_, FruitRow>(
            r#"
            UPDATE fruits SET
                name = ?2,
                category = ?3,
                price = ?4,
                quantity = ?5,
                image_path = ?6,
                updated_at = ?7
            WHERE id = ?1
            RETURNING id, name, category, price, quantity, image_path, created_at, updated_at
            "#,
        )
        .bind(fruit.id)
        .bind(&fruit.name)
        .bind(&fruit.category)
        .bind(fruit.price)
        .bind(fruit.quantity)
        .bind(&fruit.image_path)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        into_fruit(row)
    }

    /// Writes only the columns present in `patch`, in one statement.
    ///
    /// Columns the patch leaves out are never rewritten, so a stock
    /// adjustment landing between a caller's read and this write survives.
    /// `updated_at` is refreshed.
    ///
    /// ## Returns
    /// * `Ok(Some(Fruit))` - The stored record after the update
    /// * `Ok(None)` - No fruit with that id
    pub async fn apply_patch(&self, id: i64, patch: &FruitPatch) -> DbResult<Option<Fruit>> {
        debug!(id = %id, "Patching fruit");

        let row = sqlx::query_as::<_, FruitRow>(
            r#"
            UPDATE fruits SET
                name = COALESCE(?2, name),
                category = COALESCE(?3, category),
                price = COALESCE(?4, price),
                quantity = COALESCE(?5, quantity),
                image_path = CASE WHEN ?6 THEN ?7 ELSE image_path END,
                updated_at = ?8
            WHERE id = ?1
            RETURNING id, name, category, price, quantity, image_path, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&patch.name)
        .bind(&patch.category)
        .bind(patch.price)
        .bind(patch.quantity)
        .bind(patch.image_path.is_some())
        .bind(patch.image_path.clone().flatten())
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        into_fruit(row)
    }

    /// Deletes a fruit. Returns whether a row was removed.
    pub async fn delete(&self, id: i64) -> DbResult<bool> {
        debug!(id = %id, "Deleting fruit");

        let result = sqlx::query("DELETE FROM fruits WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Number of stored fruits.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM fruits")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Whether a fruit with this id exists.
    pub async fn exists(&self, id: i64) -> DbResult<bool> {
        let found: i64 = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM fruits WHERE id = ?1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(found != 0)
    }

    // -------------------------------------------------------------------------
    // Lookups
    // -------------------------------------------------------------------------

    /// Equality lookup on one column, ordered by id.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let filter = FieldFilter::parse("category", "Tropical")?;
    /// let tropical = repo.find_by_field(filter).await?;
    /// ```
    pub async fn find_by_field(&self, filter: FieldFilter) -> DbResult<Vec<Fruit>> {
        debug!(field = filter.column(), "Finding fruits by field");

        let predicate = match filter {
            FieldFilter::ImagePath(None) => "image_path IS NULL".to_string(),
            ref other => format!("{} = ?1", other.column()),
        };
        let sql = format!(
            "SELECT id, name, category, price, quantity, image_path, created_at, updated_at \
             FROM fruits WHERE {predicate} ORDER BY id"
        );

        let query = sqlx::query_as::<_, FruitRow>(&sql);
        let query = match filter {
            FieldFilter::Id(id) => query.bind(id),
            FieldFilter::Name(name) => query.bind(name),
            FieldFilter::Category(category) => query.bind(category),
            FieldFilter::Price(price) => query.bind(price),
            FieldFilter::Quantity(quantity) => query.bind(quantity),
            FieldFilter::ImagePath(Some(path)) => query.bind(path),
            FieldFilter::ImagePath(None) => query,
        };

        let rows = query.fetch_all(&self.pool).await?;
        into_fruits(rows)
    }

    /// Case-insensitive substring match on the name.
    ///
    /// `%` and `_` in the pattern match themselves, not wildcards.
    pub async fn search_by_name(&self, pattern: &str) -> DbResult<Vec<Fruit>> {
        debug!(pattern = %pattern, "Searching fruits by name");

        let rows = sqlx::query_as::<_, FruitRow>(
            r#"
            SELECT id, name, category, price, quantity, image_path, created_at, updated_at
            FROM fruits
            WHERE name LIKE ?1 ESCAPE '\'
            ORDER BY id
            "#,
        )
        .bind(like_contains(pattern))
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Search returned fruits");
        into_fruits(rows)
    }

    /// Fruits priced within `[min, max]`, cheapest first.
    pub async fn find_by_price_range(&self, min: f64, max: f64) -> DbResult<Vec<Fruit>> {
        let rows = sqlx::query_as::<_, FruitRow>(
            r#"
            SELECT id, name, category, price, quantity, image_path, created_at, updated_at
            FROM fruits
            WHERE price >= ?1 AND price <= ?2
            ORDER BY price, id
            "#,
        )
        .bind(min)
        .bind(max)
        .fetch_all(&self.pool)
        .await?;

        into_fruits(rows)
    }

    /// Fruits with `quantity < threshold`, lowest stock first.
    pub async fn find_low_stock(&self, threshold: i64) -> DbResult<Vec<Fruit>> {
        let rows = sqlx::query_as::<_, FruitRow>(
            r#"
            SELECT id, name, category, price, quantity, image_path, created_at, updated_at
            FROM fruits
            WHERE quantity < ?1
            ORDER BY quantity, id
            "#,
        )
        .bind(threshold)
        .fetch_all(&self.pool)
        .await?;

        into_fruits(rows)
    }

    // -------------------------------------------------------------------------
    // Aggregates
    // -------------------------------------------------------------------------

    /// `SUM(price * quantity)` over all fruits; `0.0` when empty.
    pub async fn total_inventory_value(&self) -> DbResult<f64> {
        let total: f64 = sqlx::query_scalar(
            "SELECT CAST(COALESCE(SUM(price * quantity), 0) AS REAL) FROM fruits",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }

    /// Per-category count, stock and value, ordered by category.
    pub async fn category_summary(&self) -> DbResult<Vec<CategorySummary>> {
        let rows: Vec<(String, i64, i64, f64)> = sqlx::query_as(
            r#"
            SELECT
                category,
                COUNT(*),
                SUM(quantity),
                CAST(SUM(price * quantity) AS REAL)
            FROM fruits
            GROUP BY category
            ORDER BY category
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(category, count, total_quantity, total_value)| CategorySummary {
                category,
                count,
                total_quantity,
                total_value,
            })
            .collect())
    }

    // -------------------------------------------------------------------------
    // Stock
    // -------------------------------------------------------------------------

    /// Overwrites the stock level.
    ///
    /// ## Returns
    /// * `Ok(Some(Fruit))` - Updated record
    /// * `Ok(None)` - No fruit with that id
    /// * `Err(DbError::ConstraintViolation)` - `quantity` is negative
    pub async fn set_quantity(&self, id: i64, quantity: i64) -> DbResult<Option<Fruit>> {
        debug!(id = %id, quantity = %quantity, "Setting fruit quantity");

        let row = sqlx::query_as::<_, FruitRow>(
            r#"
            UPDATE fruits SET
                quantity = ?2,
                updated_at = ?3
            WHERE id = ?1
            RETURNING id, name, category, price, quantity, image_path, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(quantity)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        into_fruit(row)
    }

    /// Adds `delta` to the stock level in one conditional statement.
    ///
    /// The update only happens if the result stays within `0..=i64::MAX`.
    pub async fn adjust_quantity(&self, id: i64, delta: i64) -> DbResult<StockChange> {
        debug!(id = %id, delta = %delta, "Adjusting fruit quantity");

        // Highest starting quantity that won't overflow once delta is added.
        let ceiling = i64::MAX - delta.max(0);

        let row = sqlx::query_as::<_, FruitRow>(
            r#"
            UPDATE fruits SET
                quantity = quantity + ?2,
                updated_at = ?4
            WHERE id = ?1
              AND quantity + ?2 >= 0
              AND quantity <= ?3
            RETURNING id, name, category, price, quantity, image_path, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(delta)
        .bind(ceiling)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = row {
            return Ok(StockChange::Applied(Fruit::try_from(row)?));
        }

        let current: Option<i64> = sqlx::query_scalar("SELECT quantity FROM fruits WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(match current {
            Some(quantity) => {
                debug!(id = %id, quantity = %quantity, delta = %delta, "Stock adjustment rejected");
                StockChange::Rejected { quantity }
            }
            None => StockChange::Missing,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
