//! Product Repository

use shared::models::{Product, ProductUpdate};

use super::{RepoError, RepoResult, Repository};

pub type ProductRepository = Repository<Product>;

/// Fields of a product that does not have an id yet
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub price: rust_decimal::Decimal,
    pub categories: Vec<String>,
    pub on_hand: u32,
    pub description: String,
}

impl Repository<Product> {
    /// Case-insensitive substring match on the name or any category
    pub fn search(&self, term: &str) -> Vec<Product> {
        let needle = term.to_lowercase();
        self.find_where(|p| {
            p.name.to_lowercase().contains(&needle)
                || p
                    .categories
                    .iter()
                    .any(|c| c.to_lowercase().contains(&needle))
        })
    }

    /// Assign the next id and append
    pub fn create(&self, data: NewProduct) -> RepoResult<Product> {
        self.store().write(|doc| {
            let product = Product {
                id: doc.next_id::<Product>(),
                name: data.name,
                price: data.price,
                categories: data.categories,
                on_hand: data.on_hand,
                description: data.description,
            };
            doc.products.push(product.clone());
            Ok(product)
        })
    }

    /// Merge the supplied fields into an existing product
    pub fn update(&self, id: &str, data: &ProductUpdate) -> RepoResult<Product> {
        let on_hand = data
            .on_hand
            .map(|n| {
                u32::try_from(n).map_err(|_| {
                    RepoError::Validation("On hand quantity must be a non-negative integer".into())
                })
            })
            .transpose()?;

        self.store().write(|doc| {
            let product = doc
                .product_mut(id)
                .ok_or_else(|| RepoError::NotFound(format!("product {}", id)))?;

            if let Some(name) = &data.name {
                product.name = name.clone();
            }
            if let Some(price) = data.price {
                product.price = price;
            }
            if let Some(categories) = &data.categories {
                product.categories = categories.clone();
            }
            if let Some(on_hand) = on_hand {
                product.on_hand = on_hand;
            }
            if let Some(description) = &data.description {
                product.description = description.clone();
            }
            Ok(product.clone())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{MemoryBackend, Store};
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use std::sync::Arc;

    fn repo() -> ProductRepository {
        Repository::new(Arc::new(Store::open(MemoryBackend::new())))
    }

    fn new_product(name: &str, categories: &[&str]) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            price: Decimal::from_str("19.99").unwrap(),
            categories: categories.iter().map(|c| c.to_string()).collect(),
            on_hand: 10,
            description: "desc".to_string(),
        }
    }

    #[test]
    fn test_create_assigns_sequential_ids() {
        let repo = repo();
        let a = repo.create(new_product("Mug", &["kitchenware"])).unwrap();
        let b = repo.create(new_product("Lamp", &["home"])).unwrap();
        assert_eq!(a.id, "1");
        assert_eq!(b.id, "2");
    }

    #[test]
    fn test_ids_continue_after_delete_of_lower_id() {
        let repo = repo();
        repo.create(new_product("A", &["x"])).unwrap();
        repo.create(new_product("B", &["x"])).unwrap();
        repo.delete("1").unwrap();
        assert_eq!(repo.create(new_product("C", &["x"])).unwrap().id, "3");
    }

    #[test]
    fn test_search_matches_category_only() {
        let repo = repo();
        repo.create(new_product("Wireless Headphones", &["electronics", "audio"]))
            .unwrap();
        repo.create(new_product("Coffee Mug", &["kitchenware"])).unwrap();

        let hits = repo.search("AUDIO");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Wireless Headphones");
    }

    #[test]
    fn test_search_matches_name_and_keeps_order() {
        let repo = repo();
        repo.create(new_product("Bluetooth Speaker", &["audio"])).unwrap();
        repo.create(new_product("Speaker Stand", &["furniture"])).unwrap();
        repo.create(new_product("Mug", &["kitchenware"])).unwrap();

        let names: Vec<String> = repo.search("speak").into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Bluetooth Speaker", "Speaker Stand"]);
        assert!(repo.search("nothing-here").is_empty());
    }

    #[test]
    fn test_update_merges_supplied_fields() {
        let repo = repo();
        let created = repo.create(new_product("Mug", &["kitchenware"])).unwrap();

        let update = ProductUpdate {
            price: Some(Decimal::from_str("9.50").unwrap()),
            on_hand: Some(4),
            ..Default::default()
        };
        let updated = repo.update(&created.id, &update).unwrap();

        assert_eq!(updated.name, "Mug");
        assert_eq!(updated.price, Decimal::from_str("9.50").unwrap());
        assert_eq!(updated.on_hand, 4);
        assert_eq!(updated.categories, vec!["kitchenware"]);
    }

    #[test]
    fn test_update_unknown_product() {
        let repo = repo();
        let result = repo.update("42", &ProductUpdate::default());
        assert!(matches!(result, Err(RepoError::NotFound(_))));
    }
}
