//! Catalog Service
//!
//! Product listing, search and admin CRUD on top of [`ProductRepository`].

use rust_decimal::Decimal;
use shared::models::{
    MAX_PRICE, Product, ProductCreate, ProductSearchQuery, ProductUpdate, is_valid_price,
};
use shared::{AppError, AppResult, ErrorCode};
use validator::Validate;

use crate::db::repository::product::NewProduct;
use crate::db::repository::{ProductRepository, RepoError};

const PRICE_MESSAGE: &str = "Price must be a positive number";

#[derive(Debug, Clone)]
pub struct CatalogService {
    products: ProductRepository,
}

impl CatalogService {
    pub fn new(products: ProductRepository) -> Self {
        Self { products }
    }

    /// All products, insertion order
    pub fn list(&self) -> Vec<Product> {
        self.products.find_all()
    }

    pub fn get(&self, id: &str) -> AppResult<Product> {
        self.products.find_by_id(id).ok_or_else(product_not_found)
    }

    /// Products whose name or a category contains the query; empty result is not an error
    pub fn search(&self, query: &ProductSearchQuery) -> AppResult<Vec<Product>> {
        query.validate()?;
        Ok(self.products.search(&query.q))
    }

    pub fn create(&self, payload: ProductCreate) -> AppResult<Product> {
        payload.validate()?;

        let price = match payload.price {
            Some(price) if is_valid_price(&price) => price,
            other => return Err(price_error(other.as_ref())),
        };
        let on_hand = payload
            .on_hand
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| {
                AppError::validation("On hand quantity must be a non-negative integer")
                    .with_detail("on_hand", vec!["On hand quantity must be a non-negative integer"])
            })?;

        let product = self
            .products
            .create(NewProduct {
                name: payload.name,
                price: price.round_dp(2),
                categories: payload.categories,
                on_hand,
                description: payload.description,
            })
            .map_err(map_repo_error)?;

        tracing::info!(product_id = %product.id, name = %product.name, "Product created");
        Ok(product)
    }

    /// Merge the supplied fields into product `id`
    pub fn update(&self, id: &str, mut payload: ProductUpdate) -> AppResult<Product> {
        payload.validate()?;

        if let Some(price) = payload.price {
            if !is_valid_price(&price) {
                return Err(price_error(Some(&price)));
            }
            payload.price = Some(price.round_dp(2));
        }

        let product = self
            .products
            .update(id, &payload)
            .map_err(map_repo_error)?;

        tracing::info!(product_id = %product.id, "Product updated");
        Ok(product)
    }

    /// Remove product `id`, returning it
    pub fn delete(&self, id: &str) -> AppResult<Product> {
        let product = self.products.delete(id).map_err(map_repo_error)?;
        tracing::info!(product_id = %product.id, name = %product.name, "Product deleted");
        Ok(product)
    }
}

fn product_not_found() -> AppError {
    AppError::with_message(ErrorCode::ProductNotFound, "The requested product does not exist")
}

fn price_error(price: Option<&Decimal>) -> AppError {
    let message = match price {
        Some(p) if *p > MAX_PRICE => format!("Price must not exceed {MAX_PRICE}"),
        _ => PRICE_MESSAGE.to_string(),
    };
    AppError::validation(message.clone()).with_detail("price", vec![message])
}

fn map_repo_error(err: RepoError) -> AppError {
    match err {
        RepoError::NotFound(_) => product_not_found(),
        other => other.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{MemoryBackend, Store};
    use crate::db::repository::Repository;
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use std::sync::Arc;

    fn service() -> CatalogService {
        CatalogService::new(Repository::new(Arc::new(Store::open(MemoryBackend::new()))))
    }

    fn create_payload(name: &str) -> ProductCreate {
        ProductCreate {
            name: name.to_string(),
            price: Some(Decimal::from_str("19.99").unwrap()),
            categories: vec!["clothing".to_string()],
            on_hand: Some(50),
            description: "Comfortable".to_string(),
        }
    }

    #[test]
    fn test_create_and_get() {
        let service = service();
        let product = service.create(create_payload("Classic T-Shirt")).unwrap();
        assert_eq!(product.id, "1");
        assert_eq!(product.on_hand, 50);
        assert_eq!(service.get("1").unwrap().name, "Classic T-Shirt");
        assert_eq!(service.list().len(), 1);
    }

    #[test]
    fn test_create_rejects_negative_price() {
        let service = service();
        let mut payload = create_payload("Broken");
        payload.price = Some(Decimal::from_str("-1").unwrap());
        let err = service.create(payload).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert!(service.list().is_empty());
    }

    #[test]
    fn test_create_allows_zero_price() {
        let mut payload = create_payload("Freebie");
        payload.price = Some(Decimal::ZERO);
        assert!(service().create(payload).is_ok());
    }

    #[test]
    fn test_create_missing_fields() {
        let err = service().create(ProductCreate::default()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        let details = err.details.unwrap();
        assert!(details.contains_key("name"));
        assert!(details.contains_key("categories"));
    }

    #[test]
    fn test_search_requires_query() {
        let service = service();
        let err = service
            .search(&ProductSearchQuery { q: String::new() })
            .unwrap_err();
        assert_eq!(err.message, "Search query is required");
    }

    #[test]
    fn test_search_empty_result_is_ok() {
        let service = service();
        service.create(create_payload("Classic T-Shirt")).unwrap();
        let hits = service
            .search(&ProductSearchQuery { q: "zzz".to_string() })
            .unwrap();
        assert!(hits.is_empty());
        let hits = service
            .search(&ProductSearchQuery { q: "CLOTH".to_string() })
            .unwrap();
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_update_and_delete_unknown() {
        let service = service();
        let err = service.update("9", ProductUpdate::default()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ProductNotFound);
        let err = service.delete("9").unwrap_err();
        assert_eq!(err.code, ErrorCode::ProductNotFound);
    }

    #[test]
    fn test_update_rejects_negative_price() {
        let service = service();
        service.create(create_payload("Mug")).unwrap();
        let err = service
            .update(
                "1",
                ProductUpdate {
                    price: Some(Decimal::from_str("-0.01").unwrap()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert_eq!(err.message, PRICE_MESSAGE);
        assert_eq!(service.get("1").unwrap().price, Decimal::from_str("19.99").unwrap());
    }

    #[test]
    fn test_update_rejects_huge_price() {
        let service = service();
        service.create(create_payload("Mug")).unwrap();
        let err = service
            .update(
                "1",
                ProductUpdate {
                    price: Some(Decimal::from_str("79228162514264337593543950335").unwrap()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.message, "Price must not exceed 1000000000000");
        assert_eq!(service.get("1").unwrap().price, Decimal::from_str("19.99").unwrap());

        let mut payload = create_payload("Yacht");
        payload.price = Some(Decimal::from_str("1000000000000.01").unwrap());
        assert!(service.create(payload).is_err());
        assert_eq!(service.list().len(), 1);
    }

    #[test]
    fn test_delete_returns_product() {
        let service = service();
        service.create(create_payload("Mug")).unwrap();
        let deleted = service.delete("1").unwrap();
        assert_eq!(deleted.name, "Mug");
        assert!(service.list().is_empty());
    }
}
