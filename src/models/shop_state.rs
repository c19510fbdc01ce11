use leptos::prelude::*;

use crate::api::CheckoutReport;
use crate::models::{Cart, Product, Role, Session};

/// Frontend-only reactive state (Leptos signals) for the shopping flow.
/// Shared with all components via `use_context()`.
#[derive(Clone, Copy)]
pub struct ShopState {
    /// Cart for this page load
    pub cart: RwSignal<Cart>,
    /// Active notification (if any)
    pub notification: RwSignal<Option<String>>,
}

impl ShopState {
    /// Create a new shop state with an empty cart
    pub fn new() -> Self {
        Self {
            cart: RwSignal::new(Cart::new()),
            notification: RwSignal::new(None),
        }
    }

    /// Add one unit of `product` and tell the user about it
    pub fn add_to_cart(&self, product: Product) {
        let message = format!("{} added to cart", product.name);
        self.cart.update(|cart| {
            cart.add(product);
        });
        self.show_notification(message);
    }

    pub fn remove_from_cart(&self, product_id: &str) {
        self.cart.update(|cart| cart.remove(product_id));
    }

    pub fn set_quantity(&self, product_id: &str, quantity: u32) {
        self.cart
            .update(|cart| cart.set_quantity(product_id, quantity));
    }

    /// Drop the lines that became orders; failed lines stay for another attempt.
    ///
    /// A fully placed cart is announced with a notification. Otherwise the failure
    /// summary is returned for inline display.
    pub fn apply_checkout(&self, report: &CheckoutReport) -> Option<String> {
        self.cart.update(|cart| {
            for product_id in &report.placed {
                cart.remove(product_id);
            }
        });

        if report.is_complete() {
            self.show_notification(report.summary());
            None
        } else {
            Some(report.summary())
        }
    }

    /// Units in the cart, for the header badge
    pub fn item_count(&self) -> u32 {
        self.cart.with(Cart::item_count)
    }

    /// Show a notification (auto-dismiss is handled by `NotificationBar`)
    pub fn show_notification(&self, message: impl Into<String>) {
        self.notification.set(Some(message.into()));
    }

    /// Clear the current notification
    pub fn clear_notification(&self) {
        self.notification.set(None);
    }
}

impl Default for ShopState {
    fn default() -> Self {
        Self::new()
    }
}

/// Reactive view of the signed-in session.
#[derive(Clone, Copy)]
pub struct AuthState {
    pub session: RwSignal<Option<Session>>,
}

impl AuthState {
    pub fn new(initial: Option<Session>) -> Self {
        Self {
            session: RwSignal::new(initial),
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.with(Option::is_some)
    }

    /// Greeting name of the signed-in user
    pub fn display_name(&self) -> Option<String> {
        self.session
            .with(|s| s.as_ref().map(|s| s.user.display_name().to_string()))
    }

    pub fn role(&self) -> Option<Role> {
        self.session.with(|s| s.as_ref().map(|s| s.user.role))
    }

    pub fn set_session(&self, session: Session) {
        self.session.set(Some(session));
    }

    pub fn clear(&self) {
        self.session.set(None);
    }
}
