use leptos::prelude::*;

use crate::app::{ApiHandle, Navigator};
use crate::models::{AuthState, Route, ShopState};

/// Header with page links, the cart badge and sign-in state.
#[component]
pub fn NavBar() -> impl IntoView {
    let shop = use_context::<ShopState>().expect("ShopState context missing");
    let auth = use_context::<AuthState>().expect("AuthState context missing");
    let navigator = use_context::<Navigator>().expect("Navigator context missing");
    let api = use_context::<ApiHandle>().expect("ApiHandle context missing");

    let logout = move |_: leptos::ev::MouseEvent| {
        api.session_store().clear();
        auth.clear();
        shop.show_notification("Signed out");
        navigator.go(Route::Catalog);
    };

    let link = move |route: Route, label: &'static str| {
        view! {
            <button
                class="nav-link"
                class:active=move || navigator.current() == route
                on:click=move |_| navigator.go(route)
            >
                {label}
            </button>
        }
    };

    view! {
        <nav class="nav-bar">
            <h1 class="brand" on:click=move |_| navigator.go(Route::Catalog)>"Vendor-Buddy"</h1>
            <div class="nav-links">
                {link(Route::Catalog, "Products")}
                <Show when=move || auth.is_logged_in()>
                    {link(Route::Products, "Browse")}
                    {link(Route::Orders, "My Orders")}
                </Show>
                <button class="nav-link cart-link" on:click=move |_| navigator.go(Route::Cart)>
                    "🛒 Cart"
                    <Show when=move || { shop.item_count() > 0 }>
                        <span class="cart-badge">{move || shop.item_count()}</span>
                    </Show>
                </button>
                {move || {
                    if let Some(name) = auth.display_name() {
                        view! {
                            <span class="user-name">{name}</span>
                            <span class="role-badge">{auth.role().map(|role| role.label())}</span>
                            <button class="btn btn-outline" on:click=logout.clone()>
                                "Logout"
                            </button>
                        }
                            .into_any()
                    } else {
                        view! {
                            <button class="btn btn-primary" on:click=move |_| navigator.go(Route::Login)>
                                "Login"
                            </button>
                        }
                            .into_any()
                    }
                }}
            </div>
        </nav>
    }
}
