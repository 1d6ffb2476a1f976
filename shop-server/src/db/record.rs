//! Collection records and id generation

use shared::models::{Order, Product, User};

use super::Document;

/// A record stored in one of the document's collections
pub trait Record: Clone + Send + Sync + 'static {
    /// Collection name, for errors and logs
    const COLLECTION: &'static str;

    /// Unique key within the collection
    fn key(&self) -> &str;

    fn items(doc: &Document) -> &Vec<Self>;

    fn items_mut(doc: &mut Document) -> &mut Vec<Self>;
}

impl Record for Product {
    const COLLECTION: &'static str = "products";

    fn key(&self) -> &str {
        &self.id
    }

    fn items(doc: &Document) -> &Vec<Self> {
        &doc.products
    }

    fn items_mut(doc: &mut Document) -> &mut Vec<Self> {
        &mut doc.products
    }
}

impl Record for User {
    const COLLECTION: &'static str = "users";

    fn key(&self) -> &str {
        &self.username
    }

    fn items(doc: &Document) -> &Vec<Self> {
        &doc.users
    }

    fn items_mut(doc: &mut Document) -> &mut Vec<Self> {
        &mut doc.users
    }
}

impl Record for Order {
    const COLLECTION: &'static str = "orders";

    fn key(&self) -> &str {
        &self.id
    }

    fn items(doc: &Document) -> &Vec<Self> {
        &doc.orders
    }

    fn items_mut(doc: &mut Document) -> &mut Vec<Self> {
        &mut doc.orders
    }
}

/// Next id for a collection: highest numeric id + 1, `"1"` when empty
///
/// Ids that do not parse as integers count as 0. Must be called inside
/// [`Store::write`](super::Store::write) so two writers never see the same
/// maximum.
pub fn generate_id<'a>(ids: impl IntoIterator<Item = &'a str>) -> String {
    let max = ids
        .into_iter()
        .map(|id| id.trim().parse::<u64>().unwrap_or(0))
        .max()
        .unwrap_or(0);
    (max + 1).to_string()
}

impl Document {
    /// Next id for the collection holding `T`
    pub fn next_id<T: Record>(&self) -> String {
        generate_id(T::items(self).iter().map(Record::key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_empty() {
        assert_eq!(generate_id(Vec::<&str>::new()), "1");
    }

    #[test]
    fn test_generate_id_uses_max() {
        assert_eq!(generate_id(["3", "7"]), "8");
        assert_eq!(generate_id(["7", "3"]), "8");
    }

    #[test]
    fn test_generate_id_ignores_non_numeric() {
        assert_eq!(generate_id(["abc", "2"]), "3");
        assert_eq!(generate_id(["abc"]), "1");
    }

    #[test]
    fn test_next_id_per_collection() {
        let doc = Document::default();
        assert_eq!(doc.next_id::<Product>(), "1");
        assert_eq!(doc.next_id::<Order>(), "1");
    }
}
