use std::rc::Rc;

use futures::future::join_all;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::api::catalog::{encode_component, normalize_catalog, CatalogPayload, ProductQuery};
use crate::api::orders::{distinct_product_ids, OrderHistory, ProductDirectory, ProductLookup};
use crate::api::session_store::SessionStore;
use crate::api::transport::{HttpRequest, Method, Transport};
use crate::api::ApiError;
use crate::models::{CartItem, Credentials, NewOrder, Order, OrderList, Product, Session};

/// Whether a request carries the bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Access {
    Public,
    Authenticated,
}

/// Shared client for the marketplace REST API.
///
/// Every response passes through the same policy: a 401 clears the injected
/// [`SessionStore`] and runs the `on_unauthorized` callback before the error is
/// returned to the caller. There is no retry.
pub struct ApiClient<T> {
    base_url: String,
    transport: Rc<T>,
    session: Rc<dyn SessionStore>,
    on_unauthorized: Rc<dyn Fn()>,
}

impl<T> Clone for ApiClient<T> {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            transport: Rc::clone(&self.transport),
            session: Rc::clone(&self.session),
            on_unauthorized: Rc::clone(&self.on_unauthorized),
        }
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn new(
        base_url: impl Into<String>,
        transport: T,
        session: Rc<dyn SessionStore>,
        on_unauthorized: impl Fn() + 'static,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            transport: Rc::new(transport),
            session,
            on_unauthorized: Rc::new(on_unauthorized),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The session store this client reads tokens from
    pub fn session_store(&self) -> &Rc<dyn SessionStore> {
        &self.session
    }

    /// Fetch one page of the catalog and classify its shape.
    ///
    /// The catalog is public, so no token is sent.
    pub async fn list_products(&self, query: &ProductQuery) -> Result<CatalogPayload, ApiError> {
        let path = format!("/products?{}", query.to_query_string());
        let body = self.execute(Method::Get, &path, None, Access::Public).await?;

        let value = if body.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&body)?
        };

        let payload = normalize_catalog(&value);
        if !payload.is_recognized() {
            tracing::warn!("Unrecognized catalog response shape, showing no products");
        }
        Ok(payload)
    }

    pub async fn get_product(&self, id: &str) -> Result<Product, ApiError> {
        let path = format!("/products/{}", encode_component(id));
        self.get_json(&path).await
    }

    pub async fn list_orders(&self) -> Result<Vec<Order>, ApiError> {
        let list: OrderList = self.get_json("/orders").await?;
        Ok(list.orders)
    }

    pub async fn place_order(&self, order: &NewOrder) -> Result<(), ApiError> {
        let body = serde_json::to_string(order)?;
        self.execute(Method::Post, "/orders", Some(body), Access::Authenticated)
            .await?;
        Ok(())
    }

    /// Exchange credentials for a session and persist it in the session store.
    pub async fn login(&self, credentials: &Credentials) -> Result<Session, ApiError> {
        let session: Session = self
            .send_json(Method::Post, "/auth/login", credentials, Access::Public)
            .await?;
        self.session.save(&session);
        tracing::info!("Signed in as {}", session.user.id);
        Ok(session)
    }

    /// Fetch the order list, then the details of every product it references.
    ///
    /// Product lookups run concurrently and fail independently; a failed lookup
    /// becomes a placeholder instead of failing the whole history.
    pub async fn fetch_order_history(&self) -> Result<OrderHistory, ApiError> {
        let orders = self.list_orders().await?;
        let ids = distinct_product_ids(&orders);
        tracing::debug!(
            "Loaded {} orders referencing {} products",
            orders.len(),
            ids.len()
        );

        let lookups = join_all(ids.into_iter().map(|product_id| async move {
            let outcome = self.get_product(&product_id).await;
            ProductLookup {
                product_id,
                outcome,
            }
        }))
        .await;

        Ok(OrderHistory {
            orders,
            products: ProductDirectory::from_lookups(lookups),
        })
    }

    /// Submit one order per cart line, concurrently.
    pub async fn submit_cart(&self, items: &[CartItem]) -> CheckoutReport {
        let results = join_all(items.iter().map(|item| async move {
            let order = NewOrder {
                product_id: item.product.id.clone(),
                quantity: item.quantity,
            };
            let result = self.place_order(&order).await;
            (order.product_id, result)
        }))
        .await;

        let mut report = CheckoutReport::default();
        for (product_id, result) in results {
            match result {
                Ok(()) => report.placed.push(product_id),
                Err(e) => {
                    tracing::error!("Order for product {} failed: {}", product_id, e);
                    report.failed.push((product_id, e));
                }
            }
        }
        report
    }

    async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        let body = self
            .execute(Method::Get, path, None, Access::Authenticated)
            .await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn send_json<B: Serialize, R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        payload: &B,
        access: Access,
    ) -> Result<R, ApiError> {
        let body = serde_json::to_string(payload)?;
        let response = self.execute(method, path, Some(body), access).await?;
        Ok(serde_json::from_str(&response)?)
    }

    /// Send a request and apply the shared response policy. Returns the body on 2xx.
    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
        access: Access,
    ) -> Result<String, ApiError> {
        let mut request = HttpRequest::new(method, format!("{}{path}", self.base_url));
        request
            .headers
            .push(("Accept".to_string(), "application/json".to_string()));
        if body.is_some() {
            request
                .headers
                .push(("Content-Type".to_string(), "application/json".to_string()));
        }
        if access == Access::Authenticated {
            if let Some(token) = self.session.token() {
                request
                    .headers
                    .push(("Authorization".to_string(), format!("Bearer {token}")));
            }
        }
        request.body = body;

        tracing::debug!("{} {}", method, request.url);

        let response = self.transport.send(request).await.map_err(|e| {
            tracing::error!("{} {} failed: {}", method, path, e);
            ApiError::Network(e)
        })?;

        if response.status == 401 {
            tracing::warn!("{} {} returned 401, ending session", method, path);
            self.session.clear();
            (self.on_unauthorized)();
            return Err(ApiError::Unauthorized);
        }

        if !response.is_success() {
            return Err(ApiError::Status {
                status: response.status,
                message: error_message(&response.body),
            });
        }

        Ok(response.body)
    }
}

/// Result of submitting a cart: product ids that became orders and those that did not.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckoutReport {
    pub placed: Vec<String>,
    pub failed: Vec<(String, ApiError)>,
}

impl CheckoutReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// Summary shown on the cart page
    pub fn summary(&self) -> String {
        let total = self.placed.len() + self.failed.len();
        if self.failed.is_empty() {
            format!("{total} order(s) placed")
        } else {
            format!("{} of {total} orders failed", self.failed.len())
        }
    }
}

/// Pull a readable message out of an error body.
fn error_message(body: &str) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        for key in ["message", "error"] {
            if let Some(Value::String(msg)) = map.get(key) {
                return msg.clone();
            }
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        "no details".to_string()
    } else {
        trimmed.chars().take(200).collect()
    }
}
