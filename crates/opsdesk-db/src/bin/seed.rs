//! # Seed Data Generator
//!
//! Populates a database with demo inventory and customers for development.
//!
//! ## Usage
//! ```bash
//! # 40 items (default) into ./data.db
//! cargo run -p opsdesk-db --bin seed
//!
//! # Custom amount and path
//! cargo run -p opsdesk-db --bin seed -- --count 200 --db ./dev.db
//! ```
//!
//! Every fifth item is generated below its reorder threshold so the console
//! shows some low-stock rows. Ids already present are skipped, so the tool
//! can be re-run against the same file.

use std::env;

use anyhow::{bail, Context};

use opsdesk_core::{Customer, InventoryItem};
use opsdesk_db::{Database, DbConfig};
use tracing_subscriber::EnvFilter;

/// Item families and the models stocked for each.
const CATALOG: &[(&str, &[&str])] = &[
    ("KIT", &["Standard Kit", "High Performance Kit", "Flat High Performance Kit", "Mini Kit"]),
    ("RTR", &["Gen 3 Router", "Mesh Router", "Router Mini"]),
    ("CBL", &["Cable 15m", "Cable 45m", "Ethernet Adapter"]),
    ("MNT", &["Pipe Adapter", "Wall Mount", "Pivot Mount", "Ridgeline Mount", "Mast"]),
    ("PWR", &["Power Supply", "PoE Injector", "Car Adapter"]),
];

/// Demo customers: (name, email, service history).
const CUSTOMERS: &[(&str, &str, &str)] = &[
    ("Harbor Cafe", "ops@harborcafe.example", "Standard kit installed; router swapped under warranty"),
    ("Ridge Farm", "farm@ridge.example", "Mast mount on barn roof"),
    ("Bay Marina", "office@baymarina.example", "Two flat kits on docks"),
    ("Lakeside Clinic", "it@lakesideclinic.example", ""),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(SeedArgs { count, db_path }) = parse_args(&args)? else {
        print_help();
        return Ok(());
    };

    println!("Opsdesk Seed Data Generator");
    println!("===========================");
    println!("Database: {}", db_path);
    println!("Items:    {}", count);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected, schema ready");

    let mut inserted = 0;
    let mut skipped = 0;
    for item in catalog_items(count) {
        match db.inventory().insert(&item).await {
            Ok(_) => inserted += 1,
            Err(e) if e.is_duplicate() => skipped += 1,
            Err(e) => return Err(e.into()),
        }
    }
    println!("✓ Inventory: {} inserted, {} already present", inserted, skipped);

    let mut inserted = 0;
    for (idx, (name, email, history)) in CUSTOMERS.iter().enumerate() {
        let customer = Customer {
            id: format!("CUST-{:03}", idx + 1),
            name: name.to_string(),
            email: email.to_string(),
            service_history: history.to_string(),
        };
        match db.customers().insert(&customer).await {
            Ok(_) => inserted += 1,
            Err(e) if e.is_duplicate() => {}
            Err(e) => return Err(e.into()),
        }
    }
    println!("✓ Customers: {} inserted", inserted);

    println!();
    println!(
        "Totals: {} items, {} customers",
        db.inventory().count().await?,
        db.customers().count().await?
    );

    db.close().await;
    Ok(())
}

/// Parsed command line.
#[derive(Debug, PartialEq, Eq)]
struct SeedArgs {
    count: usize,
    db_path: String,
}

/// Parses the arguments after the program name. `Ok(None)` means help was asked for.
fn parse_args(args: &[String]) -> anyhow::Result<Option<SeedArgs>> {
    let mut parsed = SeedArgs {
        count: 40,
        db_path: "data.db".to_string(),
    };

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--count" | "-c" => {
                let value = iter.next().context("--count needs a value")?;
                parsed.count = value
                    .parse()
                    .with_context(|| format!("--count expects a whole number, got '{}'", value))?;
            }
            "--db" | "-d" => {
                parsed.db_path = iter.next().context("--db needs a path")?.clone();
            }
            "--help" | "-h" => return Ok(None),
            other => bail!("unknown argument '{}' (try --help)", other),
        }
    }

    Ok(Some(parsed))
}

fn print_help() {
    println!("Opsdesk Seed Data Generator");
    println!();
    println!("Usage: seed [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -c, --count <N>    Number of inventory items to generate (default: 40)");
    println!("  -d, --db <PATH>    Database file path (default: ./data.db)");
    println!("  -h, --help         Show this help message");
}

/// Generates `count` items cycling through the catalog.
fn catalog_items(count: usize) -> Vec<InventoryItem> {
    let models: Vec<(&str, &str)> = CATALOG
        .iter()
        .flat_map(|(family, names)| names.iter().map(move |name| (*family, *name)))
        .collect();

    (0..count)
        .map(|seed| {
            let (family, name) = models[seed % models.len()];
            let batch = seed / models.len();
            let min_stock = 5 + (seed % 4) as i64 * 5;
            let quantity = if seed % 5 == 0 {
                min_stock - 1 - (seed % 3) as i64
            } else {
                min_stock + ((seed * 7) % 40) as i64
            };

            InventoryItem {
                id: format!("{}-{:04}", family, seed),
                name: if batch == 0 {
                    name.to_string()
                } else {
                    format!("{} (lot {})", name, batch + 1)
                },
                quantity,
                min_stock,
            }
        })
        .collect()
}
