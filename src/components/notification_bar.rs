use std::cell::Cell;
use std::rc::Rc;

use leptos::prelude::*;
use leptos::tachys::dom::window;
use wasm_bindgen::JsCast;

use crate::config::AppConfig;
use crate::models::ShopState;

/// Displays transient notifications such as "added to cart" (non-modal).
#[component]
pub fn NotificationBar() -> impl IntoView {
    let shop = use_context::<ShopState>().expect("ShopState context missing");
    let timeout_ms = use_context::<AppConfig>()
        .map_or_else(|| AppConfig::default().notification_timeout_ms, |c| c.notification_timeout_ms);

    let last_timeout_id = Rc::new(Cell::new(None::<i32>));

    // Auto-dismiss effect
    Effect::new({
        let last_timeout_id = Rc::clone(&last_timeout_id);
        move |_| {
            // A new message restarts the countdown
            if let Some(timeout_id) = last_timeout_id.take() {
                window().clear_timeout_with_handle(timeout_id);
            }

            if shop.notification.with(Option::is_some) {
                let callback: wasm_bindgen::prelude::Closure<dyn FnMut()> =
                    wasm_bindgen::closure::Closure::new(move || {
                        shop.clear_notification();
                    });

                if let Ok(handle) = window().set_timeout_with_callback_and_timeout_and_arguments_0(
                    callback.as_ref().unchecked_ref(),
                    timeout_ms,
                ) {
                    last_timeout_id.set(Some(handle));
                    // Keep the closure alive for the timeout duration
                    callback.forget();
                }
            }
        }
    });

    view! {
        <Show when=move || shop.notification.with(Option::is_some)>
            <div class="notification-bar">
                {move || shop.notification.get().unwrap_or_default()}
            </div>
        </Show>
    }
}
