//! Seed the database with demo data
//!
//! Writes to `DATABASE_PATH` (default `data/database.json`), replacing any
//! existing content.

use std::path::PathBuf;

use shop_server::auth::hash_password;
use shop_server::db::seed::{ADMIN_PASSWORD, USER_PASSWORD, demo_document};
use shop_server::db::{JsonFileBackend, Store};
use shop_server::init_logger;

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_logger();

    let path = std::env::var("DATABASE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data/database.json"));

    println!("🌱 Seeding database at {}...", path.display());

    let admin_hash = hash_password(ADMIN_PASSWORD)?;
    let user_hash = hash_password(USER_PASSWORD)?;

    let store = Store::open(JsonFileBackend::new(&path));
    store.replace(demo_document(&admin_hash, &user_hash))?;

    println!("✅ Database seeded successfully!");
    println!();
    println!("📋 Demo Accounts:");
    println!("   Admin: username=\"admin\", password=\"{}\"", ADMIN_PASSWORD);
    println!("   User:  username=\"john_doe\", password=\"{}\"", USER_PASSWORD);
    println!("   User:  username=\"jane_smith\", password=\"{}\"", USER_PASSWORD);
    println!();
    println!("🚀 Start the server with: cargo run --bin shop-server");

    Ok(())
}
