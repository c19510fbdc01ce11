use std::rc::Rc;

use leptos::prelude::*;
use send_wrapper::SendWrapper;
use wasm_bindgen::JsValue;

use crate::api::{ApiClient, BrowserApiClient, FetchTransport, LocalStorageSessionStore, SessionStore};
use crate::components::{
    CartPage, CatalogView, LoginPage, NavBar, NotificationBar, OrderHistory, ProductsPage,
};
use crate::config::AppConfig;
use crate::models::{AuthState, Route, ShopState};

/// API client as provided through context. Leptos contexts must be `Send + Sync`,
/// the client is neither, and the browser only ever has one thread.
pub type ApiHandle = SendWrapper<BrowserApiClient>;

/// Current page, kept in sync with the address bar.
#[derive(Clone, Copy)]
pub struct Navigator {
    route: RwSignal<Route>,
}

impl Navigator {
    pub fn new(initial: Route) -> Self {
        Self {
            route: RwSignal::new(initial),
        }
    }

    pub fn current(&self) -> Route {
        self.route.get()
    }

    /// Current page without subscribing the caller to route changes
    pub fn current_untracked(&self) -> Route {
        self.route.get_untracked()
    }

    /// Switch page and record it in browser history
    pub fn go(&self, route: Route) {
        if let Some(window) = web_sys::window() {
            if let Ok(history) = window.history() {
                if let Err(e) = history.push_state_with_url(&JsValue::NULL, "", Some(route.path())) {
                    tracing::warn!("Failed to push history state: {:?}", e);
                }
            }
        }
        self.route.set(route);
    }

    /// Re-read the route from the address bar (back/forward buttons)
    pub fn sync_from_location(&self) {
        self.route.set(Route::from_path(&current_path()));
    }
}

/// Path of the current page, `/` when unavailable
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// Full page navigation; also drops all in-memory state such as the cart.
fn redirect_to(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.location().set_href(path) {
            tracing::error!("Failed to redirect to {}: {:?}", path, e);
        }
    }
}

/// Root application component: builds the API client, provides global context and
/// switches between pages.
#[component]
pub fn App() -> impl IntoView {
    let config = AppConfig::from_env();
    let store: Rc<dyn SessionStore> = Rc::new(LocalStorageSessionStore);

    let auth = AuthState::new(store.load());
    let shop = ShopState::new();
    let navigator = Navigator::new(Route::from_path(&current_path()));

    // Session teardown on 401: the client has already cleared storage.
    // A rejected sign-in stays on the form so its error and the cart survive.
    let login_path = config.login_path.clone();
    let api = ApiClient::new(
        config.api_base_url.clone(),
        FetchTransport,
        store,
        move || {
            let on_login_form = navigator
                .current_untracked()
                .shows_login(auth.session.with_untracked(Option::is_some));
            auth.clear();
            if on_login_form {
                tracing::debug!("Unauthorized on the login form, staying put");
            } else {
                redirect_to(&login_path);
            }
        },
    );

    tracing::info!("Using API at {}", api.base_url());

    let _ = window_event_listener(leptos::ev::popstate, move |_| {
        navigator.sync_from_location();
    });

    provide_context(config);
    provide_context(auth);
    provide_context(shop);
    provide_context(navigator);
    provide_context::<ApiHandle>(SendWrapper::new(api));

    view! {
        <main class="app">
            <NavBar />
            <NotificationBar />
            {move || match navigator.current().resolve(auth.is_logged_in()) {
                Route::Catalog => view! { <CatalogView /> }.into_any(),
                Route::Products => view! { <ProductsPage /> }.into_any(),
                Route::Cart => view! { <CartPage /> }.into_any(),
                Route::Orders => view! { <OrderHistory /> }.into_any(),
                Route::Login => view! { <LoginPage /> }.into_any(),
            }}
        </main>
    }
}
