use serde::{Deserialize, Serialize};

use crate::models::nullable::null_as_default;

/// Name shown for products whose details could not be fetched.
pub const UNKNOWN_PRODUCT_NAME: &str = "Unknown Product";

/// A raw material listed by a supplier. Owned by the server; the client never edits it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Price per unit, older payloads call this `price`
    #[serde(default, alias = "price", deserialize_with = "null_as_default")]
    pub unit_price: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stock: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub unit_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_name: Option<String>,
    #[serde(default, alias = "image", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

impl Product {
    /// Stand-in record used when a product lookup fails.
    pub fn placeholder(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: UNKNOWN_PRODUCT_NAME.to_string(),
            unit_price: 0.0,
            stock: 0,
            unit_type: String::new(),
            category: String::new(),
            supplier_id: None,
            supplier_name: None,
            image_url: None,
            rating: None,
        }
    }

    /// Label for the seller line on a product card.
    pub fn seller_label(&self) -> &str {
        self.supplier_name
            .as_deref()
            .or(self.supplier_id.as_deref())
            .unwrap_or("Vendor-Buddy")
    }
}

/// Format an amount in rupees with two decimals.
pub fn format_price(amount: f64) -> String {
    format!("₹{amount:.2}")
}
