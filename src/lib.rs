//! Browser client for the Vendor-Buddy marketplace: product catalog, cart,
//! checkout and order history, rendered with Leptos.

pub mod api;
pub mod app;
pub mod components;
pub mod config;
pub mod logging;
pub mod models;
