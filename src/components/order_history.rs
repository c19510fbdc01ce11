use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{OrderEntry, OrderHistory as History};
use crate::app::{ApiHandle, Navigator};
use crate::models::{format_price, format_timestamp, AuthState, LoadState, Route};

/// Shown when an order's product has no image
const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/150";

/// Placed orders joined with their product details.
#[component]
pub fn OrderHistory() -> impl IntoView {
    let api = use_context::<ApiHandle>().expect("ApiHandle context missing");
    let auth = use_context::<AuthState>().expect("AuthState context missing");
    let navigator = use_context::<Navigator>().expect("Navigator context missing");

    let history = RwSignal::new(LoadState::<History>::Loading);

    // Orders are per user; without a session there is nothing to ask for
    if auth.session.with_untracked(Option::is_some) {
        spawn_local(async move {
            let result = api.fetch_order_history().await;
            if let Err(e) = &result {
                tracing::error!("Error fetching orders: {}", e);
            }
            history.set(LoadState::from_result(result));
        });
    } else {
        navigator.go(Route::Login);
    }

    view! {
        <section class="order-history">
            <button class="btn btn-outline back-button" on:click=move |_| navigator.go(Route::Catalog)>
                "← Back"
            </button>
            <h2>"Order History"</h2>
            <p class="subtitle">"View your order history and track current orders."</p>
            {move || match history.get() {
                LoadState::Loading => view! { <div class="spinner"></div> }.into_any(),
                LoadState::Failed(message) => view! { <div class="error">{message}</div> }.into_any(),
                LoadState::Ready(loaded) if loaded.is_empty() => {
                    view! {
                        <div class="empty-state">
                            <h3>"No orders yet"</h3>
                            <p>"You haven't placed any orders yet. Start shopping to make your first order!"</p>
                            <button class="btn btn-primary" on:click=move |_| navigator.go(Route::Catalog)>
                                "Browse Products"
                            </button>
                        </div>
                    }
                        .into_any()
                }
                LoadState::Ready(loaded) => {
                    let entries = loaded.entries();
                    view! {
                        <div class="order-list">
                            {entries
                                .into_iter()
                                .map(|entry| view! { <OrderCard entry=entry /> })
                                .collect_view()}
                        </div>
                    }
                        .into_any()
                }
            }}
        </section>
    }
}

/// One order with its status badge.
#[component]
fn OrderCard(entry: OrderEntry) -> impl IntoView {
    let OrderEntry {
        order,
        product,
        product_resolved,
    } = entry;

    let name = product.name.clone();
    let style = order.status.style();
    let badge_class = style.badge_class;
    let image = product
        .image_url
        .clone()
        .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string());
    let order_label = format!("Order #{}", order.short_id());
    let quantity = format!("Quantity: {}", order.quantity);
    let total = format_price(order.total_amount);
    let status = order.status.label();
    let ordered_on = format!("Ordered on: {}", format_timestamp(order.created_at.as_deref()));
    let delivery = order
        .estimated_delivery_time
        .as_deref()
        .map(|eta| format!("Estimated delivery: {}", format_timestamp(Some(eta))));

    view! {
        <div class="card order-card">
            <div class="order-product">
                <img class="order-image" src=image alt=name.clone() />
                <div class="order-details">
                    <h3>{name}</h3>
                    <Show when=move || !product_resolved>
                        <p class="muted">"Product details unavailable"</p>
                    </Show>
                    <p class="muted">{order_label}</p>
                    <p class="muted">{quantity}</p>
                    <span class="order-total">{total}</span>
                </div>
            </div>
            <div class="order-status">
                <span class=badge_class>
                    <span class="status-icon">{style.icon}</span>
                    <span class="status-label">{status}</span>
                </span>
                <p class="muted">{ordered_on}</p>
                {delivery.map(|text| view! { <p class="muted">{text}</p> })}
            </div>
        </div>
    }
}
