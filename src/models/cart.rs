use serde::{Deserialize, Serialize};

use crate::models::Product;

/// A product pending order submission, together with how many units are wanted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    pub product: Product,
    /// Always at least 1; items dropping to 0 are removed from the cart
    pub quantity: u32,
}

impl CartItem {
    /// Price of this line (unit price × quantity)
    pub fn subtotal(&self) -> f64 {
        self.product.unit_price * f64::from(self.quantity)
    }
}

/// In-memory shopping cart holding at most one item per product id.
///
/// Lives for the current page load only; nothing is persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add one unit of `product`. Returns the resulting quantity for that product.
    pub fn add(&mut self, product: Product) -> u32 {
        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product.id) {
            item.quantity = item.quantity.saturating_add(1);
            return item.quantity;
        }

        self.items.push(CartItem {
            product,
            quantity: 1,
        });
        1
    }

    /// Remove the item for `product_id`. Absent ids are ignored.
    pub fn remove(&mut self, product_id: &str) {
        self.items.retain(|i| i.product.id != product_id);
    }

    /// Set the quantity for `product_id`; 0 removes the item. Absent ids are ignored.
    pub fn set_quantity(&mut self, product_id: &str, quantity: u32) {
        if quantity == 0 {
            self.remove(product_id);
            return;
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product_id) {
            item.quantity = quantity;
        }
    }

    /// Sum of unit price × quantity over all items
    pub fn total(&self) -> f64 {
        self.items.iter().map(CartItem::subtotal).sum()
    }

    /// Total number of units across all items (used for the header badge)
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    pub fn get(&self, product_id: &str) -> Option<&CartItem> {
        self.items.iter().find(|i| i.product.id == product_id)
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, price: f64) -> Product {
        Product {
            name: format!("Product {id}"),
            unit_price: price,
            ..Product::placeholder(id)
        }
    }

    #[test]
    fn test_add_same_product_twice_increments_quantity() {
        let mut cart = Cart::new();

        assert_eq!(cart.add(product("p1", 10.0)), 1);
        assert_eq!(cart.add(product("p1", 10.0)), 2);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get("p1").map(|i| i.quantity), Some(2));
    }

    #[test]
    fn test_add_distinct_products_keeps_insertion_order() {
        let mut cart = Cart::new();
        cart.add(product("p1", 1.0));
        cart.add(product("p2", 2.0));
        cart.add(product("p1", 1.0));

        let ids: Vec<&str> = cart.items().iter().map(|i| i.product.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2"]);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_remove_missing_product_is_noop() {
        let mut cart = Cart::new();
        cart.add(product("p1", 5.0));
        cart.add(product("p2", 7.0));
        let before = cart.clone();

        cart.remove("does-not-exist");

        assert_eq!(cart, before);
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_remove_existing_product() {
        let mut cart = Cart::new();
        cart.add(product("p1", 5.0));
        cart.add(product("p1", 5.0));

        cart.remove("p1");

        assert!(cart.is_empty());
    }

    #[test]
    fn test_total() {
        let mut cart = Cart::new();
        assert!(cart.total().abs() < f64::EPSILON);

        cart.add(product("p1", 12.5));
        cart.add(product("p1", 12.5));
        cart.add(product("p2", 3.0));

        assert!((cart.total() - 28.0).abs() < 1e-9);
    }

    #[test]
    fn test_set_quantity() {
        let mut cart = Cart::new();
        cart.add(product("p1", 4.0));

        cart.set_quantity("p1", 5);
        assert_eq!(cart.get("p1").map(|i| i.quantity), Some(5));

        // Unknown ids are not inserted
        cart.set_quantity("p2", 3);
        assert_eq!(cart.len(), 1);

        cart.set_quantity("p1", 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add(product("p1", 4.0));
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
    }
}
