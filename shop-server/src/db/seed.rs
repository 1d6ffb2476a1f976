//! Demo data
//!
//! Five products, an admin and two customers, and one past order for
//! `john_doe`. Used by the `seed` binary and by the integration tests.

use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use shared::models::{Order, OrderLine, Product, Role, User};

use super::Document;

pub const ADMIN_PASSWORD: &str = "admin123";
pub const USER_PASSWORD: &str = "user123";

fn product(
    id: &str,
    name: &str,
    cents: i64,
    categories: &[&str],
    on_hand: u32,
    description: &str,
) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        price: Decimal::new(cents, 2),
        categories: categories.iter().map(|c| c.to_string()).collect(),
        on_hand,
        description: description.to_string(),
    }
}

fn user(
    username: &str,
    email: &str,
    password_hash: &str,
    (first, last): (&str, &str),
    street_address: &str,
    role: Role,
) -> User {
    User {
        username: username.to_string(),
        email: email.to_string(),
        password: password_hash.to_string(),
        first: first.to_string(),
        last: last.to_string(),
        street_address: street_address.to_string(),
        role,
    }
}

/// Demo catalog
pub fn demo_products() -> Vec<Product> {
    vec![
        product(
            "1",
            "Classic T-Shirt",
            1999,
            &["clothing", "casual", "cotton"],
            50,
            "Comfortable cotton t-shirt available in multiple colors",
        ),
        product(
            "2",
            "Wireless Headphones",
            9999,
            &["electronics", "audio", "wireless"],
            25,
            "High-quality wireless headphones with noise cancellation",
        ),
        product(
            "3",
            "Running Shoes",
            8999,
            &["footwear", "sports", "running"],
            30,
            "Lightweight running shoes with excellent cushioning",
        ),
        product(
            "4",
            "Coffee Mug",
            1299,
            &["kitchenware", "ceramic", "drink"],
            100,
            "Ceramic coffee mug perfect for your morning brew",
        ),
        product(
            "5",
            "Bluetooth Speaker",
            5999,
            &["electronics", "audio", "portable"],
            15,
            "Portable Bluetooth speaker with excellent sound quality",
        ),
    ]
}

/// Full demo document; hashes are for [`ADMIN_PASSWORD`] and [`USER_PASSWORD`]
pub fn demo_document(admin_hash: &str, user_hash: &str) -> Document {
    let users = vec![
        user(
            "admin",
            "admin@example.com",
            admin_hash,
            ("Admin", "User"),
            "123 Admin Street, Admin City, AC 12345",
            Role::Admin,
        ),
        user(
            "john_doe",
            "john@example.com",
            user_hash,
            ("John", "Doe"),
            "456 User Avenue, User City, UC 67890",
            Role::User,
        ),
        user(
            "jane_smith",
            "jane@example.com",
            user_hash,
            ("Jane", "Smith"),
            "789 Customer Lane, Customer City, CC 11111",
            Role::User,
        ),
    ];

    let orders = vec![Order {
        id: "1".to_string(),
        username: "john_doe".to_string(),
        order_date: Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 0).single().unwrap_or_default(),
        ship_address: "456 User Avenue, User City, UC 67890".to_string(),
        products: vec![
            OrderLine {
                product_id: "1".to_string(),
                quantity: 2,
                price: Decimal::new(1999, 2),
            },
            OrderLine {
                product_id: "4".to_string(),
                quantity: 1,
                price: Decimal::new(1299, 2),
            },
        ],
    }];

    Document {
        products: demo_products(),
        users,
        orders,
    }
}
