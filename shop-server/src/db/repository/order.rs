//! Order Repository
//!
//! Orders are only ever created by checkout, which inserts them inside the
//! same store write that decrements stock (see `services::orders`).

use shared::models::Order;

use super::Repository;

pub type OrderRepository = Repository<Order>;

impl Repository<Order> {
    /// Orders owned by one account, insertion order
    pub fn find_by_username(&self, username: &str) -> Vec<Order> {
        self.find_where(|o| o.username == username)
    }
}
