use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{filter_products, CatalogPayload, ProductQuery};
use crate::app::ApiHandle;
use crate::config::AppConfig;
use crate::models::{format_price, LoadState, Product, ShopState};

/// Product grid with a client-side name filter.
#[component]
pub fn CatalogView() -> impl IntoView {
    let api = use_context::<ApiHandle>().expect("ApiHandle context missing");
    let page_size = use_context::<AppConfig>()
        .map_or_else(|| AppConfig::default().catalog_page_size, |c| c.catalog_page_size);

    let products = RwSignal::new(LoadState::<Vec<Product>>::Loading);
    let search = RwSignal::new(String::new());

    // Re-derived whenever the search text or the product list changes
    let filtered = Memo::new(move |_| {
        let term = search.get();
        products.with(|state| {
            state
                .ready()
                .map(|list| filter_products(list, &term))
                .unwrap_or_default()
        })
    });

    // Single fetch on mount
    spawn_local(async move {
        let result = api
            .list_products(&ProductQuery::first_page(page_size))
            .await
            .map(CatalogPayload::into_products);

        match &result {
            Ok(list) => tracing::debug!("Catalog loaded with {} products", list.len()),
            Err(e) => tracing::error!("Failed to load products: {}", e),
        }
        products.set(LoadState::from_result(result));
    });

    view! {
        <section class="catalog">
            <div class="section-header">
                <h2>"Popular Products"</h2>
                <p>"Browse and add to your cart instantly"</p>
            </div>
            <input
                type="text"
                class="search-input"
                placeholder="Search products..."
                prop:value=move || search.get()
                on:input=move |ev| search.set(event_target_value(&ev))
            />
            {move || match products.get() {
                LoadState::Loading => view! { <div class="loading">"Loading..."</div> }.into_any(),
                LoadState::Failed(message) => view! { <div class="error">{message}</div> }.into_any(),
                LoadState::Ready(_) => {
                    view! {
                        <div class="catalog-results">
                            <div class="product-grid">
                                <For
                                    each=move || filtered.get()
                                    key=|product| product.id.clone()
                                    children=move |product| view! { <ProductCard product=product /> }
                                />
                            </div>
                            <Show when=move || filtered.with(Vec::is_empty)>
                                <p class="empty-state">"No products found"</p>
                            </Show>
                        </div>
                    }
                        .into_any()
                }
            }}
        </section>
    }
}

/// One catalog entry with its add-to-cart button.
#[component]
pub fn ProductCard(product: Product) -> impl IntoView {
    let shop = use_context::<ShopState>().expect("ShopState context missing");

    let image = product.image_url.clone().map_or_else(
        || view! { <div class="no-image">"No Image"</div> }.into_any(),
        |src| view! { <img class="product-image" src=src alt=product.name.clone() /> }.into_any(),
    );
    let seller = format!("by {}", product.seller_label());
    let price = format_price(product.unit_price);
    let stock = format!("Stock: {} {}", product.stock, product.unit_type);
    let name = product.name.clone();
    let rating = product.rating.map(|r| format!("★ {r:.1}"));

    let on_add = move |_: leptos::ev::MouseEvent| shop.add_to_cart(product.clone());

    view! {
        <div class="card product-card">
            {image}
            <div class="product-name">{name}</div>
            <div class="product-seller">{seller}</div>
            <div class="product-stock">{stock}</div>
            {rating.map(|r| view! { <div class="product-rating">{r}</div> })}
            <div class="product-footer">
                <span class="product-price">{price}</span>
                <button class="btn btn-primary btn-sm" on:click=on_add>
                    "Add to Cart"
                </button>
            </div>
        </div>
    }
}
