use std::fmt::Write as _;

use serde::Deserialize;
use serde_json::Value;

use crate::models::Product;

/// Product list after classifying the shape of a `GET /products` response.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogPayload {
    /// The body was a bare JSON array
    Bare(Vec<Product>),
    /// `{ "products": [...] }`
    Products(Vec<Product>),
    /// Paginated envelope `{ "content": [...], "totalPages": n, "totalElements": n }`
    Paged {
        content: Vec<Product>,
        total_pages: u32,
        total_elements: u64,
    },
    /// Anything else, including `null` and `{}`
    Unrecognized,
}

impl CatalogPayload {
    /// The products carried by the payload; empty for unrecognized shapes
    pub fn into_products(self) -> Vec<Product> {
        match self {
            Self::Bare(products) | Self::Products(products) => products,
            Self::Paged { content, .. } => content,
            Self::Unrecognized => Vec::new(),
        }
    }

    pub const fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized)
    }
}

/// Classify a catalog response body.
///
/// Checked in order: bare array, `products` envelope, `content` envelope. Entries
/// that are not valid products are dropped individually.
pub fn normalize_catalog(body: &Value) -> CatalogPayload {
    match body {
        Value::Array(items) => CatalogPayload::Bare(parse_products(items)),
        Value::Object(map) => {
            if let Some(Value::Array(items)) = map.get("products") {
                return CatalogPayload::Products(parse_products(items));
            }

            if let Some(Value::Array(items)) = map.get("content") {
                let content = parse_products(items);
                let total_elements = map
                    .get("totalElements")
                    .and_then(Value::as_u64)
                    .unwrap_or(content.len() as u64);
                let total_pages = map
                    .get("totalPages")
                    .and_then(Value::as_u64)
                    .and_then(|n| u32::try_from(n).ok())
                    .unwrap_or(1);
                return CatalogPayload::Paged {
                    content,
                    total_pages,
                    total_elements,
                };
            }

            CatalogPayload::Unrecognized
        }
        _ => CatalogPayload::Unrecognized,
    }
}

fn parse_products(items: &[Value]) -> Vec<Product> {
    items
        .iter()
        .enumerate()
        .filter_map(|(idx, item)| match Product::deserialize(item) {
            Ok(product) => Some(product),
            Err(e) => {
                tracing::warn!("Skipping malformed product at index {}: {}", idx, e);
                None
            }
        })
        .collect()
}

/// Case-insensitive substring match on product name. An empty search keeps everything.
pub fn filter_products(products: &[Product], search: &str) -> Vec<Product> {
    let needle = search.to_lowercase();
    if needle.is_empty() {
        return products.to_vec();
    }

    products
        .iter()
        .filter(|p| p.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Product categories offered by the browse filter.
pub const CATEGORIES: [&str; 8] = [
    "Vegetables",
    "Fruits",
    "Grains",
    "Spices",
    "Oils",
    "Dairy",
    "Meat",
    "Others",
];

/// Position of one result page within the whole result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub page: u32,
    pub size: u32,
    pub total_pages: u32,
    pub total_elements: u64,
}

impl PageInfo {
    pub const fn has_previous(&self) -> bool {
        self.page > 0
    }

    pub const fn has_next(&self) -> bool {
        self.page.saturating_add(1) < self.total_pages
    }

    /// Pagination controls are only shown for more than one page
    pub const fn is_paginated(&self) -> bool {
        self.total_pages > 1
    }

    /// `Showing 13 to 24 of 30 results`
    pub fn range_label(&self) -> String {
        if self.total_elements == 0 {
            return "No results".to_string();
        }
        let size = u64::from(self.size);
        let first = u64::from(self.page) * size + 1;
        let last = (u64::from(self.page) + 1)
            .saturating_mul(size)
            .min(self.total_elements);
        format!("Showing {first} to {last} of {} results", self.total_elements)
    }
}

/// One page of products plus its position, as rendered by the browse page.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogPage {
    pub products: Vec<Product>,
    pub info: PageInfo,
}

impl CatalogPage {
    /// Unpaged shapes are treated as a single page holding everything.
    pub fn from_payload(payload: CatalogPayload, query: &ProductQuery) -> Self {
        let (products, total_pages, total_elements) = match payload {
            CatalogPayload::Paged {
                content,
                total_pages,
                total_elements,
            } => (content, total_pages, total_elements),
            other => {
                let products = other.into_products();
                let total = products.len() as u64;
                (products, 1, total)
            }
        };

        Self {
            products,
            info: PageInfo {
                page: query.page,
                size: query.size,
                total_pages,
                total_elements,
            },
        }
    }
}

/// Raw text of the browse page's filter form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilters {
    pub search: String,
    pub category: String,
    pub min_price: String,
    pub max_price: String,
}

impl ProductFilters {
    /// Build the query for `page`. Price fields that are blank or not a
    /// non-negative number are left out.
    pub fn to_query(&self, page: u32, size: u32) -> ProductQuery {
        ProductQuery {
            page,
            ..ProductQuery::first_page(size)
        }
        .search(self.search.clone())
        .category(self.category.clone())
        .price_range(parse_price(&self.min_price), parse_price(&self.max_price))
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn parse_price(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

/// Query parameters accepted by `GET /products`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductQuery {
    pub page: u32,
    pub size: u32,
    pub search: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl ProductQuery {
    /// First page with the given page size and no filters
    pub const fn first_page(size: u32) -> Self {
        Self {
            page: 0,
            size,
            search: None,
            category: None,
            min_price: None,
            max_price: None,
        }
    }

    #[must_use]
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub const fn price_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    /// Render as `page=..&size=..[&search=..][&category=..][&minPrice=..][&maxPrice=..]`.
    /// Blank strings are omitted.
    pub fn to_query_string(&self) -> String {
        let mut query = format!("page={}&size={}", self.page, self.size);

        let text_params = [("search", &self.search), ("category", &self.category)];
        for (key, value) in text_params {
            if let Some(value) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
                let _ = write!(query, "&{key}={}", encode_component(value));
            }
        }

        if let Some(min) = self.min_price {
            let _ = write!(query, "&minPrice={min}");
        }
        if let Some(max) = self.max_price {
            let _ = write!(query, "&maxPrice={max}");
        }

        query
    }
}

/// Percent-encode everything outside the RFC 3986 unreserved set.
pub fn encode_component(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(char::from(byte));
            }
            _ => {
                let _ = write!(out, "%{byte:02X}");
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_items() -> Value {
        json!([
            {"id": "p1", "name": "Red Onion", "unitPrice": 30.0, "stock": 10, "unitType": "kg", "category": "Vegetables"},
            {"id": "p2", "name": "Mustard Oil", "unitPrice": 180.0, "stock": 4, "unitType": "litre", "category": "Oils"}
        ])
    }

    #[test]
    fn test_all_recognized_shapes_normalize_to_same_list() {
        let items = sample_items();

        let bare = normalize_catalog(&items);
        let products = normalize_catalog(&json!({ "products": items.clone() }));
        let paged = normalize_catalog(&json!({
            "content": items,
            "totalPages": 3,
            "totalElements": 26
        }));

        assert!(matches!(bare, CatalogPayload::Bare(_)));
        assert!(matches!(products, CatalogPayload::Products(_)));
        assert!(matches!(
            paged,
            CatalogPayload::Paged {
                total_pages: 3,
                total_elements: 26,
                ..
            }
        ));

        let expected = bare.into_products();
        assert_eq!(expected.len(), 2);
        assert_eq!(products.into_products(), expected);
        assert_eq!(paged.into_products(), expected);
    }

    #[test]
    fn test_unrecognized_shapes_yield_empty_list() {
        for body in [
            json!({}),
            Value::Null,
            json!("products"),
            json!(42),
            json!({ "products": "not-a-list" }),
            json!({ "data": [] }),
        ] {
            let payload = normalize_catalog(&body);
            assert!(!payload.is_recognized(), "{body}");
            assert!(payload.into_products().is_empty());
        }
    }

    #[test]
    fn test_products_field_wins_over_content() {
        let payload = normalize_catalog(&json!({
            "products": [{"id": "a", "name": "A"}],
            "content": [{"id": "b", "name": "B"}]
        }));

        let products = payload.into_products();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, "a");
    }

    #[test]
    fn test_malformed_entries_are_skipped() {
        let payload = normalize_catalog(&json!([
            {"id": "p1", "name": "Turmeric"},
            {"name": "no id"},
            "garbage",
            {"id": "p3", "name": "Cumin"}
        ]));

        let ids: Vec<String> = payload.into_products().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["p1", "p3"]);
    }

    #[test]
    fn test_entries_with_null_fields_are_kept() {
        let payload = normalize_catalog(&json!([
            {"id": "p1", "name": "Jaggery", "category": null, "unitType": null, "stock": null},
            {"id": "p2", "name": "Salt", "unitPrice": null}
        ]));

        let products = payload.into_products();
        assert_eq!(products.len(), 2);
        assert!(products[0].category.is_empty());
        assert_eq!(products[0].stock, 0);
        assert!(products[1].unit_price.abs() < f64::EPSILON);
    }

    #[test]
    fn test_paged_defaults_when_metadata_missing() {
        let payload = normalize_catalog(&json!({ "content": sample_items() }));
        assert_eq!(
            payload,
            CatalogPayload::Paged {
                content: normalize_catalog(&sample_items()).into_products(),
                total_pages: 1,
                total_elements: 2,
            }
        );
    }

    #[test]
    fn test_filter_is_case_insensitive_on_name_only() {
        let products = normalize_catalog(&sample_items()).into_products();

        let hits = filter_products(&products, "ONION");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "p1");

        // Category text is not searched
        assert!(filter_products(&products, "vegetables").is_empty());

        assert_eq!(filter_products(&products, "").len(), 2);
        assert_eq!(filter_products(&products, "o").len(), 2);
    }

    #[test]
    fn test_query_string_defaults() {
        let query = ProductQuery::first_page(100);
        assert_eq!(query.to_query_string(), "page=0&size=100");
    }

    #[test]
    fn test_query_string_with_filters() {
        let query = ProductQuery::first_page(12)
            .search("green chilli")
            .category("Spices")
            .price_range(Some(10.0), Some(99.5));

        assert_eq!(
            query.to_query_string(),
            "page=0&size=12&search=green%20chilli&category=Spices&minPrice=10&maxPrice=99.5"
        );
    }

    #[test]
    fn test_query_string_skips_blank_text() {
        let query = ProductQuery::first_page(12).search("   ").category("");
        assert_eq!(query.to_query_string(), "page=0&size=12");
    }

    #[test]
    fn test_page_info_range_label() {
        let info = PageInfo {
            page: 1,
            size: 12,
            total_pages: 3,
            total_elements: 30,
        };
        assert_eq!(info.range_label(), "Showing 13 to 24 of 30 results");
        assert!(info.has_previous());
        assert!(info.has_next());

        let last = PageInfo { page: 2, ..info };
        assert_eq!(last.range_label(), "Showing 25 to 30 of 30 results");
        assert!(!last.has_next());

        let empty = PageInfo {
            page: 0,
            size: 12,
            total_pages: 0,
            total_elements: 0,
        };
        assert_eq!(empty.range_label(), "No results");
        assert!(!empty.has_previous());
        assert!(!empty.is_paginated());
    }

    #[test]
    fn test_catalog_page_from_each_shape() {
        let query = ProductQuery::first_page(12);

        let paged = CatalogPage::from_payload(
            normalize_catalog(&json!({
                "content": sample_items(),
                "totalPages": 4,
                "totalElements": 40
            })),
            &query,
        );
        assert_eq!(paged.products.len(), 2);
        assert_eq!(paged.info.total_pages, 4);
        assert_eq!(paged.info.total_elements, 40);
        assert!(paged.info.is_paginated());

        let bare = CatalogPage::from_payload(normalize_catalog(&sample_items()), &query);
        assert_eq!(bare.info.total_pages, 1);
        assert_eq!(bare.info.total_elements, 2);
        assert!(!bare.info.is_paginated());

        let unknown = CatalogPage::from_payload(normalize_catalog(&Value::Null), &query);
        assert!(unknown.products.is_empty());
        assert_eq!(unknown.info.range_label(), "No results");
    }

    #[test]
    fn test_filters_build_query() {
        let filters = ProductFilters {
            search: "rice".to_string(),
            category: "Grains".to_string(),
            min_price: " 20 ".to_string(),
            max_price: "cheap".to_string(),
        };

        assert_eq!(
            filters.to_query(2, 12).to_query_string(),
            "page=2&size=12&search=rice&category=Grains&minPrice=20"
        );
        assert!(!filters.is_empty());
    }

    #[test]
    fn test_empty_filters_only_page() {
        let filters = ProductFilters::default();
        assert!(filters.is_empty());
        assert_eq!(filters.to_query(0, 12).to_query_string(), "page=0&size=12");
    }

    #[test]
    fn test_negative_price_is_ignored() {
        let filters = ProductFilters {
            min_price: "-5".to_string(),
            ..ProductFilters::default()
        };
        assert_eq!(filters.to_query(0, 12).min_price, None);
    }

    #[test]
    fn test_encode_component() {
        assert_eq!(encode_component("a-b_c.d~"), "a-b_c.d~");
        assert_eq!(encode_component("a&b=c"), "a%26b%3Dc");
        assert_eq!(encode_component("मसाला"), "%E0%A4%AE%E0%A4%B8%E0%A4%BE%E0%A4%B2%E0%A4%BE");
    }
}
