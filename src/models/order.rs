use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::nullable::null_as_default;

/// Server-side order lifecycle. The client only ever reads it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "Option<String>", into = "String")]
pub enum OrderStatus {
    Pending,
    Accepted,
    InTransit,
    Delivered,
    Cancelled,
    Rejected,
    /// A status string this client does not know about; empty when the server sent none
    Unrecognized(String),
}

impl Default for OrderStatus {
    fn default() -> Self {
        Self::Unrecognized(String::new())
    }
}

impl OrderStatus {
    /// Wire name of the status (e.g. `IN_TRANSIT`)
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "PENDING",
            Self::Accepted => "ACCEPTED",
            Self::InTransit => "IN_TRANSIT",
            Self::Delivered => "DELIVERED",
            Self::Cancelled => "CANCELLED",
            Self::Rejected => "REJECTED",
            Self::Unrecognized(raw) => raw,
        }
    }

    /// Human label: the wire name with underscores shown as spaces
    pub fn label(&self) -> String {
        match self.as_str() {
            "" => "UNKNOWN".to_string(),
            raw => raw.replace('_', " "),
        }
    }

    /// Badge styling for this status; unknown statuses get the neutral style
    pub const fn style(&self) -> StatusStyle {
        match self {
            Self::Pending => StatusStyle {
                badge_class: "badge badge-pending",
                icon: "⏳",
            },
            Self::Accepted => StatusStyle {
                badge_class: "badge badge-accepted",
                icon: "📦",
            },
            Self::InTransit => StatusStyle {
                badge_class: "badge badge-in-transit",
                icon: "🚚",
            },
            Self::Delivered => StatusStyle {
                badge_class: "badge badge-delivered",
                icon: "✅",
            },
            Self::Cancelled => StatusStyle {
                badge_class: "badge badge-cancelled",
                icon: "❌",
            },
            Self::Rejected => StatusStyle {
                badge_class: "badge badge-rejected",
                icon: "⚠️",
            },
            Self::Unrecognized(_) => StatusStyle::NEUTRAL,
        }
    }
}

impl From<String> for OrderStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "PENDING" => Self::Pending,
            "ACCEPTED" => Self::Accepted,
            "IN_TRANSIT" => Self::InTransit,
            "DELIVERED" => Self::Delivered,
            "CANCELLED" => Self::Cancelled,
            "REJECTED" => Self::Rejected,
            _ => Self::Unrecognized(raw),
        }
    }
}

impl From<Option<String>> for OrderStatus {
    fn from(raw: Option<String>) -> Self {
        raw.map_or_else(Self::default, Self::from)
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        status.as_str().to_string()
    }
}

/// CSS class and icon pairing for an order status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusStyle {
    pub badge_class: &'static str,
    pub icon: &'static str,
}

impl StatusStyle {
    /// Fallback used for statuses without a dedicated style
    pub const NEUTRAL: Self = Self {
        badge_class: "badge badge-neutral",
        icon: "⏳",
    };
}

/// A placed order as returned by `GET /orders`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub product_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub quantity: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_amount: f64,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub estimated_delivery_time: Option<String>,
}

impl Order {
    /// First eight characters of the order id, as shown on order cards
    pub fn short_id(&self) -> &str {
        self.id
            .char_indices()
            .nth(8)
            .map_or(self.id.as_str(), |(idx, _)| &self.id[..idx])
    }
}

/// Envelope returned by `GET /orders`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderList {
    #[serde(default)]
    pub orders: Vec<Order>,
}

/// Body of `POST /orders`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub product_id: String,
    pub quantity: u32,
}

/// Format a server timestamp for display.
///
/// Absent values show as `N/A`; values that do not parse are shown verbatim.
pub fn format_timestamp(raw: Option<&str>) -> String {
    let Some(raw) = raw.filter(|s| !s.trim().is_empty()) else {
        return "N/A".to_string();
    };

    let parsed = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.naive_local())
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"));

    match parsed {
        Ok(dt) => dt.format("%d %b %Y, %I:%M %p").to_string(),
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrips_known_values() {
        for raw in [
            "PENDING",
            "ACCEPTED",
            "IN_TRANSIT",
            "DELIVERED",
            "CANCELLED",
            "REJECTED",
        ] {
            let status = OrderStatus::from(raw.to_string());
            assert!(!matches!(status, OrderStatus::Unrecognized(_)), "{raw}");
            assert_eq!(status.as_str(), raw);
        }
    }

    #[test]
    fn test_unrecognized_status_falls_back_to_neutral_style() {
        let status: OrderStatus = serde_json::from_str("\"ON_HOLD\"").unwrap();

        assert_eq!(status, OrderStatus::Unrecognized("ON_HOLD".to_string()));
        assert_eq!(status.style(), StatusStyle::NEUTRAL);
        assert_eq!(status.label(), "ON HOLD");
    }

    #[test]
    fn test_every_known_status_has_its_own_style() {
        let styles = [
            OrderStatus::Pending,
            OrderStatus::Accepted,
            OrderStatus::InTransit,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
            OrderStatus::Rejected,
        ]
        .map(|s| s.style().badge_class);

        for (i, a) in styles.iter().enumerate() {
            assert_ne!(*a, StatusStyle::NEUTRAL.badge_class);
            assert!(styles.iter().skip(i + 1).all(|b| a != b));
        }
    }

    #[test]
    fn test_order_deserialization() {
        let json = r#"{
            "id": "6650f1c2a9e4b7d3",
            "productId": "p1",
            "quantity": 3,
            "totalAmount": 97.5,
            "status": "IN_TRANSIT",
            "createdAt": "2025-01-05T14:30:00"
        }"#;

        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.product_id, "p1");
        assert_eq!(order.status, OrderStatus::InTransit);
        assert_eq!(order.short_id(), "6650f1c2");
        assert!(order.estimated_delivery_time.is_none());
    }

    #[test]
    fn test_order_with_null_fields() {
        let json = r#"{
            "id": "o9",
            "productId": "p1",
            "quantity": null,
            "totalAmount": null,
            "status": null,
            "createdAt": null
        }"#;

        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.quantity, 0);
        assert!(order.total_amount.abs() < f64::EPSILON);
        assert_eq!(order.status, OrderStatus::default());
        assert_eq!(order.status.style(), StatusStyle::NEUTRAL);
        assert_eq!(order.status.label(), "UNKNOWN");
        assert!(order.created_at.is_none());
    }

    #[test]
    fn test_order_without_status_is_neutral() {
        let json = r#"{"id": "o10", "productId": "p1"}"#;

        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.status.style(), StatusStyle::NEUTRAL);
    }

    #[test]
    fn test_short_id_of_short_value() {
        let order = Order {
            id: "abc".to_string(),
            product_id: "p1".to_string(),
            quantity: 1,
            total_amount: 0.0,
            status: OrderStatus::Pending,
            created_at: None,
            estimated_delivery_time: None,
        };
        assert_eq!(order.short_id(), "abc");
    }

    #[test]
    fn test_order_list_without_orders_field() {
        let list: OrderList = serde_json::from_str("{}").unwrap();
        assert!(list.orders.is_empty());
    }

    #[test]
    fn test_new_order_serialization() {
        let body = NewOrder {
            product_id: "p7".to_string(),
            quantity: 2,
        };
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"productId":"p7","quantity":2}"#);
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(None), "N/A");
        assert_eq!(format_timestamp(Some("")), "N/A");
        assert_eq!(
            format_timestamp(Some("2025-01-05T14:30:00")),
            "05 Jan 2025, 02:30 PM"
        );
        assert_eq!(
            format_timestamp(Some("2025-01-05T14:30:00.123456")),
            "05 Jan 2025, 02:30 PM"
        );
        assert_eq!(
            format_timestamp(Some("2025-01-05T09:05:00+05:30")),
            "05 Jan 2025, 09:05 AM"
        );
        assert_eq!(format_timestamp(Some("yesterday")), "yesterday");
    }
}
