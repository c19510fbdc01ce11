use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{CatalogPage, ProductFilters, CATEGORIES};
use crate::app::ApiHandle;
use crate::components::ProductCard;
use crate::config::AppConfig;
use crate::models::LoadState;

/// Server-side search with category and price filters, one page at a time.
#[component]
pub fn ProductsPage() -> impl IntoView {
    let api = use_context::<ApiHandle>().expect("ApiHandle context missing");
    let page_size = use_context::<AppConfig>()
        .map_or_else(|| AppConfig::default().browse_page_size, |c| c.browse_page_size);

    // `draft` follows the form; `applied` only changes on submit
    let draft = RwSignal::new(ProductFilters::default());
    let applied = RwSignal::new(ProductFilters::default());
    let page = RwSignal::new(0_u32);
    let results = RwSignal::new(LoadState::<CatalogPage>::Loading);
    let latest_request = StoredValue::new(0_u32);

    Effect::new(move |_| {
        let query = applied.with(|filters| filters.to_query(page.get(), page_size));
        latest_request.update_value(|n| *n = n.wrapping_add(1));
        let request_id = latest_request.get_value();

        results.set(LoadState::Loading);
        let api = api.clone();
        spawn_local(async move {
            let result = api
                .list_products(&query)
                .await
                .map(|payload| CatalogPage::from_payload(payload, &query));

            // A newer query was issued while this one was in flight
            if latest_request.get_value() != request_id {
                return;
            }
            match &result {
                Ok(found) => tracing::debug!(
                    "Products page {} loaded: {} of {}",
                    query.page,
                    found.products.len(),
                    found.info.total_elements
                ),
                Err(e) => tracing::error!("Failed to load products: {}", e),
            }
            results.set(LoadState::from_result(result));
        });
    });

    let on_search = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        applied.set(draft.get());
        page.set(0);
    };

    let clear_filters = move |_: leptos::ev::MouseEvent| {
        draft.set(ProductFilters::default());
        applied.set(ProductFilters::default());
        page.set(0);
    };

    view! {
        <section class="products-page">
            <div class="section-header">
                <h2>"Products"</h2>
                <p>"Browse and search for raw materials from verified suppliers"</p>
            </div>
            <form class="card filter-form" on:submit=on_search>
                <input
                    type="text"
                    class="input"
                    placeholder="Search products..."
                    prop:value=move || draft.with(|f| f.search.clone())
                    on:input=move |ev| draft.update(|f| f.search = event_target_value(&ev))
                />
                <select
                    class="input"
                    prop:value=move || draft.with(|f| f.category.clone())
                    on:change=move |ev| draft.update(|f| f.category = event_target_value(&ev))
                >
                    <option value="">"All Categories"</option>
                    {CATEGORIES
                        .iter()
                        .map(|category| view! { <option value=*category>{*category}</option> })
                        .collect_view()}
                </select>
                <input
                    type="number"
                    class="input"
                    placeholder="Min Price"
                    prop:value=move || draft.with(|f| f.min_price.clone())
                    on:input=move |ev| draft.update(|f| f.min_price = event_target_value(&ev))
                />
                <input
                    type="number"
                    class="input"
                    placeholder="Max Price"
                    prop:value=move || draft.with(|f| f.max_price.clone())
                    on:input=move |ev| draft.update(|f| f.max_price = event_target_value(&ev))
                />
                <div class="filter-actions">
                    <button type="submit" class="btn btn-primary">"Search"</button>
                    <button type="button" class="btn btn-outline" on:click=clear_filters>
                        "Clear Filters"
                    </button>
                </div>
            </form>
            {move || match results.get() {
                LoadState::Loading => view! { <div class="spinner"></div> }.into_any(),
                LoadState::Failed(message) => {
                    view! { <div class="error">{format!("Error loading products: {message}")}</div> }
                        .into_any()
                }
                LoadState::Ready(CatalogPage { products, info }) => {
                    let empty = products.is_empty().then(|| {
                        view! {
                            <div class="empty-state">
                                <h3>"No products found"</h3>
                                <p>"Try adjusting your search or filter criteria."</p>
                            </div>
                        }
                    });
                    view! {
                        <div class="product-grid">
                            {products
                                .into_iter()
                                .map(|product| view! { <ProductCard product=product /> })
                                .collect_view()}
                        </div>
                        {empty}
                        <Show when=move || info.is_paginated()>
                            <div class="pagination">
                                <span class="muted">{info.range_label()}</span>
                                <button
                                    class="btn btn-outline"
                                    prop:disabled=!info.has_previous()
                                    on:click=move |_| page.update(|p| *p = p.saturating_sub(1))
                                >
                                    "Previous"
                                </button>
                                <button
                                    class="btn btn-outline"
                                    prop:disabled=!info.has_next()
                                    on:click=move |_| page.update(|p| *p = p.saturating_add(1))
                                >
                                    "Next"
                                </button>
                            </div>
                        </Show>
                    }
                        .into_any()
                }
            }}
        </section>
    }
}
