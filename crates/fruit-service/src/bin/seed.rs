//! # Seed Data Loader
//!
//! Populates the store with the sample fruit catalogue for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default database (FRUIT_DB_PATH or the platform data dir)
//! cargo run -p fruit-service --bin seed
//!
//! # Specify database path
//! cargo run -p fruit-service --bin seed -- --db ./data/inventory.db
//! ```
//!
//! Every record goes through `FruitService::create`, so the catalogue is
//! validated exactly like form input. Seeding is skipped when the store
//! already holds fruit.

use std::env;

use fruit_core::FruitFields;
use fruit_service::{init_tracing, FruitService, StoreConfig};

/// Sample catalogue: (name, category, price, quantity)
const CATALOGUE: &[(&str, &str, f64, i64)] = &[
    ("Apple", "Core Fruits", 1.99, 150),
    ("Pear", "Core Fruits", 1.49, 80),
    ("Banana", "Tropical", 0.59, 200),
    ("Mango", "Tropical", 2.49, 75),
    ("Pineapple", "Tropical", 3.49, 30),
    ("Orange", "Citrus", 1.29, 100),
    ("Lemon", "Citrus", 0.79, 120),
    ("Grapefruit", "Citrus", 1.89, 8),
    ("Strawberry", "Berries", 3.99, 50),
    ("Blueberry", "Berries", 4.99, 40),
    ("Raspberry", "Berries", 5.49, 6),
    ("Peach", "Stone Fruits", 2.29, 60),
    ("Cherry", "Stone Fruits", 6.99, 9),
    ("Watermelon", "Melons", 5.99, 20),
    ("Kiwi", "Exotic", 0.75, 90),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Fruit Store Seed Data Loader");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: FRUIT_DB_PATH or data dir)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let mut config = StoreConfig::from_env()?;
    if let Some(path) = db_path {
        config = config.with_database_path(path);
    }

    init_tracing(&config);

    println!("Fruit Store Seed Data Loader");
    println!("============================");
    println!("Database: {}", config.database_path.display());
    println!();

    let service = FruitService::open(&config).await?;

    let (total, applied) = service.database().migration_status().await?;
    println!("Migrations: {}/{} applied", applied, total);

    let existing = service.count().await?;
    if existing > 0 {
        println!("Store already has {} fruits", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to reseed.");
    } else {
        let mut created = 0;
        for (name, category, price, quantity) in CATALOGUE {
            let fields = FruitFields::new()
                .name(*name)
                .category(*category)
                .price(*price)
                .quantity(*quantity);

            if let Err(e) = service.create(&fields).await {
                eprintln!("Failed to insert {}: {}", name, e);
                continue;
            }
            created += 1;
        }
        println!("Seeded {} fruits", created);
    }

    println!();
    println!("{:<14} {:>6} {:>8} {:>12}", "Category", "Fruits", "Units", "Value");
    for summary in service.get_category_summary().await? {
        println!(
            "{:<14} {:>6} {:>8} {:>12.2}",
            summary.category, summary.count, summary.total_quantity, summary.total_value
        );
    }

    println!();
    println!(
        "Total inventory value: {:.2}",
        service.get_total_inventory_value().await?
    );

    let low = service.get_low_stock_default().await?;
    if !low.is_empty() {
        println!();
        println!("Low stock (< {}):", service.low_stock_threshold());
        for fruit in low {
            println!(
                "  {} ({} units, {:.2})",
                fruit.name,
                fruit.quantity,
                fruit.inventory_value()
            );
        }
    }

    service.database().close().await;
    Ok(())
}
