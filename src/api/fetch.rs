use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use crate::api::transport::{HttpRequest, HttpResponse, Transport};

/// [`Transport`] backed by the browser `fetch` API.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

impl Transport for FetchTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, String> {
        let opts = web_sys::RequestInit::new();
        opts.set_method(request.method.as_str());
        opts.set_mode(web_sys::RequestMode::Cors);

        if let Some(body) = &request.body {
            opts.set_body(&JsValue::from_str(body));
        }

        let req = web_sys::Request::new_with_str_and_init(&request.url, &opts)
            .map_err(|e| format!("Failed to create request: {}", describe_js_error(&e)))?;

        for (name, value) in &request.headers {
            req.headers()
                .set(name, value)
                .map_err(|e| format!("Failed to set header {name}: {}", describe_js_error(&e)))?;
        }

        let window = web_sys::window().ok_or("No window")?;
        let resp_value = JsFuture::from(window.fetch_with_request(&req))
            .await
            .map_err(|e| format!("Fetch failed: {}", describe_js_error(&e)))?;

        let resp: web_sys::Response = resp_value
            .dyn_into()
            .map_err(|_| "Response is not a Response object".to_string())?;

        let text = JsFuture::from(
            resp.text()
                .map_err(|e| format!("Failed to get text: {}", describe_js_error(&e)))?,
        )
        .await
        .map_err(|e| format!("Failed to read body: {}", describe_js_error(&e)))?;

        Ok(HttpResponse {
            status: resp.status(),
            body: text.as_string().unwrap_or_default(),
        })
    }
}

/// Best-effort message from a thrown JS value
fn describe_js_error(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
