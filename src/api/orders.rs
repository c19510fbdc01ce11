use std::collections::{HashMap, HashSet};

use crate::api::ApiError;
use crate::models::{Order, Product};

/// Outcome of fetching one product's details during the order-history join.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductLookup {
    pub product_id: String,
    pub outcome: Result<Product, ApiError>,
}

/// Product details keyed by id, with placeholders for ids whose lookup failed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductDirectory {
    /// `None` marks an id whose lookup failed
    products: HashMap<String, Option<Product>>,
}

impl ProductDirectory {
    /// Build the directory. Failed lookups are logged and replaced by
    /// [`Product::placeholder`]; they are never surfaced as errors.
    pub fn from_lookups(lookups: impl IntoIterator<Item = ProductLookup>) -> Self {
        let products = lookups
            .into_iter()
            .map(|lookup| {
                let product = match lookup.outcome {
                    Ok(product) => Some(product),
                    Err(e) => {
                        tracing::warn!(
                            "Product {} unavailable, using placeholder: {}",
                            lookup.product_id,
                            e
                        );
                        None
                    }
                };
                (lookup.product_id, product)
            })
            .collect();

        Self { products }
    }

    /// Details for `product_id`; ids never looked up also get a placeholder
    pub fn get(&self, product_id: &str) -> Product {
        self.products
            .get(product_id)
            .and_then(Option::clone)
            .unwrap_or_else(|| Product::placeholder(product_id))
    }

    /// Whether real details were fetched for `product_id`
    pub fn is_resolved(&self, product_id: &str) -> bool {
        matches!(self.products.get(product_id), Some(Some(_)))
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// An order joined with the product it refers to.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderEntry {
    pub order: Order,
    pub product: Product,
    /// False when `product` is the placeholder
    pub product_resolved: bool,
}

/// Orders plus the product lookup table, ready for rendering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderHistory {
    pub orders: Vec<Order>,
    pub products: ProductDirectory,
}

impl OrderHistory {
    /// Orders in server order, each paired with its product details
    pub fn entries(&self) -> Vec<OrderEntry> {
        self.orders
            .iter()
            .map(|order| OrderEntry {
                order: order.clone(),
                product: self.products.get(&order.product_id),
                product_resolved: self.products.is_resolved(&order.product_id),
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

/// Product ids referenced by `orders`, deduplicated, in first-seen order.
pub fn distinct_product_ids(orders: &[Order]) -> Vec<String> {
    let mut seen = HashSet::new();
    orders
        .iter()
        .filter(|o| seen.insert(o.product_id.as_str()))
        .map(|o| o.product_id.clone())
        .collect()
}
