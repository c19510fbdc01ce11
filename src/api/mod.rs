//! REST boundary: transport, session persistence and the shared client policy.

pub mod catalog;
pub mod client;
pub mod error;
pub mod fetch;
pub mod orders;
pub mod session_store;
pub mod transport;

pub use catalog::{
    filter_products, normalize_catalog, CatalogPage, CatalogPayload, PageInfo, ProductFilters,
    ProductQuery, CATEGORIES,
};
pub use client::{ApiClient, CheckoutReport};
pub use error::ApiError;
pub use fetch::FetchTransport;
pub use orders::{OrderEntry, OrderHistory, ProductDirectory, ProductLookup};
pub use session_store::{LocalStorageSessionStore, MemorySessionStore, SessionStore};
pub use transport::{HttpRequest, HttpResponse, Method, Transport};

/// Client type used by the browser build
pub type BrowserApiClient = ApiClient<FetchTransport>;
