use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::app::{ApiHandle, Navigator};
use crate::models::{format_price, AuthState, CartItem, Route, ShopState};

/// Cart contents, running total and checkout.
#[component]
pub fn CartPage() -> impl IntoView {
    let shop = use_context::<ShopState>().expect("ShopState context missing");
    let auth = use_context::<AuthState>().expect("AuthState context missing");
    let navigator = use_context::<Navigator>().expect("Navigator context missing");
    let api = use_context::<ApiHandle>().expect("ApiHandle context missing");

    let submitting = RwSignal::new(false);
    let checkout_message = RwSignal::new(None::<String>);

    let checkout = move |_: leptos::ev::MouseEvent| {
        if !auth.is_logged_in() {
            shop.show_notification("Please sign in to place orders");
            navigator.go(Route::Login);
            return;
        }

        let items = shop.cart.with(|cart| cart.items().to_vec());
        if items.is_empty() || submitting.get() {
            return;
        }

        submitting.set(true);
        checkout_message.set(None);

        let api = api.clone();
        spawn_local(async move {
            let report = api.submit_cart(&items).await;
            checkout_message.set(shop.apply_checkout(&report));
            submitting.set(false);
        });
    };

    view! {
        <section class="cart-page">
            <h2>"Your Cart"</h2>
            {move || {
                if shop.cart.with(|cart| cart.is_empty()) {
                    view! {
                        <div class="empty-state">
                            <p>"Your cart is empty."</p>
                            <button class="btn btn-primary" on:click=move |_| navigator.go(Route::Catalog)>
                                "Browse Products"
                            </button>
                        </div>
                    }
                        .into_any()
                } else {
                    view! {
                        <div class="cart-items">
                            <For
                                each=move || shop.cart.with(|cart| cart.items().to_vec())
                                key=|item| (item.product.id.clone(), item.quantity)
                                children=move |item| view! { <CartRow item=item /> }
                            />
                        </div>
                    }
                        .into_any()
                }
            }}
            <div class="cart-summary">
                <span class="cart-total-label">"Total"</span>
                <span class="cart-total">{move || format_price(shop.cart.with(|cart| cart.total()))}</span>
            </div>
            <Show when=move || checkout_message.with(Option::is_some)>
                <div class="error">{move || checkout_message.get().unwrap_or_default()}</div>
            </Show>
            <button
                class="btn btn-primary checkout-button"
                on:click=checkout
                prop:disabled=move || submitting.get() || shop.cart.with(|cart| cart.is_empty())
            >
                {move || if submitting.get() { "Placing orders..." } else { "Place Order" }}
            </button>
        </section>
    }
}

/// One cart line with quantity controls.
#[component]
fn CartRow(item: CartItem) -> impl IntoView {
    let shop = use_context::<ShopState>().expect("ShopState context missing");

    let product_id = item.product.id.clone();
    let quantity = item.quantity;
    let subtotal = format_price(item.subtotal());
    let unit = format!("{} / {}", format_price(item.product.unit_price), item.product.unit_type);

    let decrement = {
        let product_id = product_id.clone();
        move |_: leptos::ev::MouseEvent| shop.set_quantity(&product_id, quantity.saturating_sub(1))
    };
    let increment = {
        let product_id = product_id.clone();
        move |_: leptos::ev::MouseEvent| shop.set_quantity(&product_id, quantity.saturating_add(1))
    };
    let remove = move |_: leptos::ev::MouseEvent| shop.remove_from_cart(&product_id);

    view! {
        <div class="cart-row">
            <div class="cart-row-info">
                <span class="product-name">{item.product.name}</span>
                <span class="product-unit">{unit}</span>
            </div>
            <div class="quantity-controls">
                <button class="btn btn-outline btn-sm" on:click=decrement>"−"</button>
                <span class="quantity">{quantity}</span>
                <button class="btn btn-outline btn-sm" on:click=increment>"+"</button>
            </div>
            <span class="cart-row-subtotal">{subtotal}</span>
            <button class="btn btn-outline btn-sm" on:click=remove>"Remove"</button>
        </div>
    }
}
