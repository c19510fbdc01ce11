use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::app::{ApiHandle, Navigator};
use crate::models::{AuthState, Credentials, Route, ShopState};

/// Sign-in form. On success the session is persisted and the catalog is shown.
#[component]
pub fn LoginPage() -> impl IntoView {
    let api = use_context::<ApiHandle>().expect("ApiHandle context missing");
    let auth = use_context::<AuthState>().expect("AuthState context missing");
    let shop = use_context::<ShopState>().expect("ShopState context missing");
    let navigator = use_context::<Navigator>().expect("Navigator context missing");

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let submitting = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if submitting.get() {
            return;
        }

        let credentials = Credentials {
            email: email.get().trim().to_string(),
            password: password.get(),
        };
        if credentials.email.is_empty() || credentials.password.is_empty() {
            error.set(Some("Email and password are required".to_string()));
            return;
        }

        submitting.set(true);
        error.set(None);

        let api = api.clone();
        spawn_local(async move {
            match api.login(&credentials).await {
                Ok(session) => {
                    shop.show_notification(format!("Welcome, {}", session.user.display_name()));
                    auth.set_session(session);
                    navigator.go(Route::Catalog);
                }
                Err(e) => {
                    tracing::warn!("Login failed: {}", e);
                    error.set(Some(e.to_string()));
                }
            }
            submitting.set(false);
        });
    };

    view! {
        <section class="login-page">
            <h2>"Sign in to Vendor-Buddy"</h2>
            <form class="login-form" on:submit=on_submit>
                <input
                    type="email"
                    class="input"
                    placeholder="Email"
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
                <input
                    type="password"
                    class="input"
                    placeholder="Password"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                <Show when=move || error.with(Option::is_some)>
                    <div class="error">{move || error.get().unwrap_or_default()}</div>
                </Show>
                <button type="submit" class="btn btn-primary" prop:disabled=move || submitting.get()>
                    {move || if submitting.get() { "Signing in..." } else { "Sign In" }}
                </button>
            </form>
        </section>
    }
}
