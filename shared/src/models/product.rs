//! Product Model

use super::serde_helpers;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    /// Unit price, non-negative
    #[serde(with = "serde_helpers::money")]
    pub price: Decimal,
    /// Non-empty set of category tags
    pub categories: Vec<String>,
    /// Available inventory count
    pub on_hand: u32,
    pub description: String,
}

/// Create product payload
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ProductCreate {
    #[serde(default, deserialize_with = "serde_helpers::trimmed")]
    #[validate(length(min = 1, message = "Product name is required"))]
    pub name: String,
    #[serde(default, deserialize_with = "serde_helpers::decimal_opt")]
    #[validate(required(message = "Price must be a positive number"))]
    pub price: Option<Decimal>,
    #[serde(default)]
    #[validate(length(min = 1, message = "Categories must be a non-empty array"))]
    pub categories: Vec<String>,
    #[serde(default, deserialize_with = "serde_helpers::integer_opt")]
    #[validate(
        required(message = "On hand quantity must be a non-negative integer"),
        range(min = 0, max = 4_294_967_295_i64, message = "On hand quantity must be a non-negative integer")
    )]
    pub on_hand: Option<i64>,
    #[serde(default, deserialize_with = "serde_helpers::trimmed")]
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
}

/// Update product payload
///
/// Only supplied fields are merged into the stored product.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ProductUpdate {
    #[serde(default, deserialize_with = "serde_helpers::trimmed_opt")]
    #[validate(length(min = 1, message = "Product name cannot be empty"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "serde_helpers::decimal_opt")]
    pub price: Option<Decimal>,
    #[serde(default)]
    #[validate(length(min = 1, message = "Categories must be a non-empty array"))]
    pub categories: Option<Vec<String>>,
    #[serde(default, deserialize_with = "serde_helpers::integer_opt")]
    #[validate(range(min = 0, max = 4_294_967_295_i64, message = "On hand quantity must be a non-negative integer"))]
    pub on_hand: Option<i64>,
    #[serde(default, deserialize_with = "serde_helpers::trimmed_opt")]
    #[validate(length(min = 1, message = "Description cannot be empty"))]
    pub description: Option<String>,
}

impl ProductUpdate {
    /// True when the payload carries no field at all
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.price.is_none()
            && self.categories.is_none()
            && self.on_hand.is_none()
            && self.description.is_none()
    }
}

/// Product search query (`GET /products/search?q=`)
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ProductSearchQuery {
    #[serde(default, deserialize_with = "serde_helpers::trimmed")]
    #[validate(length(min = 1, message = "Search query is required"))]
    pub q: String,
}

/// Largest accepted unit price; keeps 2-dp prices exact as JSON numbers
pub const MAX_PRICE: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Prices may be zero but never negative, and never above [`MAX_PRICE`]
pub fn is_valid_price(price: &Decimal) -> bool {
    (!price.is_sign_negative() || price.is_zero()) && *price <= MAX_PRICE
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_product_json_shape() {
        let product = Product {
            id: "1".to_string(),
            name: "Classic T-Shirt".to_string(),
            price: Decimal::from_str("19.99").unwrap(),
            categories: vec!["clothing".to_string(), "casual".to_string()],
            on_hand: 50,
            description: "Comfortable cotton t-shirt".to_string(),
        };
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["id"], "1");
        assert_eq!(json["price"], 19.99);
        assert_eq!(json["on_hand"], 50);
        assert_eq!(json["categories"][1], "casual");
    }

    #[test]
    fn test_create_valid() {
        let payload: ProductCreate = serde_json::from_str(
            r#"{"name":"Lamp","price":"24.50","categories":["home"],"on_hand":"3","description":"Desk lamp"}"#,
        )
        .unwrap();
        assert!(payload.validate().is_ok());
        assert_eq!(payload.on_hand, Some(3));
        assert_eq!(payload.price, Some(Decimal::from_str("24.50").unwrap()));
    }

    #[test]
    fn test_create_missing_fields() {
        let payload: ProductCreate = serde_json::from_str("{}").unwrap();
        let errors = payload.validate().unwrap_err();
        let fields = errors.field_errors();
        for field in ["name", "price", "categories", "on_hand", "description"] {
            assert!(fields.contains_key(field), "missing error for {field}");
        }
    }

    #[test]
    fn test_create_negative_values() {
        let payload: ProductCreate = serde_json::from_str(
            r#"{"name":"Lamp","price":-1,"categories":["home"],"on_hand":-2,"description":"x"}"#,
        )
        .unwrap();
        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("on_hand"));
        assert!(!is_valid_price(&payload.price.unwrap()));
        assert!(is_valid_price(&Decimal::ZERO));
    }

    #[test]
    fn test_price_upper_bound() {
        assert_eq!(MAX_PRICE.to_string(), "1000000000000");
        assert!(is_valid_price(&MAX_PRICE));
        assert!(!is_valid_price(&(MAX_PRICE + Decimal::new(1, 2))));
        assert!(!is_valid_price(&Decimal::MAX));
    }

    #[test]
    fn test_update_partial() {
        let payload: ProductUpdate = serde_json::from_str(r#"{"price":"9.5"}"#).unwrap();
        assert!(payload.validate().is_ok());
        assert!(!payload.is_empty());
        assert!(payload.name.is_none());

        let empty: ProductUpdate = serde_json::from_str("{}").unwrap();
        assert!(empty.is_empty());

        let bad: ProductUpdate = serde_json::from_str(r#"{"categories":[]}"#).unwrap();
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_search_query_required() {
        let query = ProductSearchQuery {
            q: String::new(),
        };
        assert!(query.validate().is_err());
    }
}
