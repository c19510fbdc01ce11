//! Shared helpers for driving `ApiClient` against scripted responses.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use vendor_buddy::api::{
    ApiClient, HttpRequest, HttpResponse, MemorySessionStore, SessionStore, Transport,
};
use vendor_buddy::models::{Role, Session, User};

pub const BASE_URL: &str = "http://backend.test/api";

type Reply = Result<HttpResponse, String>;

/// Transport answering from a table keyed by `"<METHOD> <path>"`.
/// Replies scripted for a body fragment win over the route's plain reply.
/// Unscripted requests get a 404. Every request is recorded.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    routes: Rc<RefCell<HashMap<String, Reply>>>,
    by_body: Rc<RefCell<Vec<(String, String, Reply)>>>,
    pub requests: Rc<RefCell<Vec<HttpRequest>>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, route: &str, status: u16, body: &str) -> &Self {
        self.routes.borrow_mut().insert(
            route.to_string(),
            Ok(HttpResponse {
                status,
                body: body.to_string(),
            }),
        );
        self
    }

    /// Reply on `route` only to requests whose body contains `fragment`
    pub fn respond_when_body(&self, route: &str, fragment: &str, status: u16, body: &str) -> &Self {
        self.by_body.borrow_mut().push((
            route.to_string(),
            fragment.to_string(),
            Ok(HttpResponse {
                status,
                body: body.to_string(),
            }),
        ));
        self
    }

    pub fn fail(&self, route: &str, error: &str) -> &Self {
        self.routes
            .borrow_mut()
            .insert(route.to_string(), Err(error.to_string()));
        self
    }

    /// Requests whose URL ends with `path`
    pub fn requests_to(&self, path: &str) -> Vec<HttpRequest> {
        self.requests
            .borrow()
            .iter()
            .filter(|r| r.url.ends_with(path))
            .cloned()
            .collect()
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, String> {
        let path = request
            .url
            .strip_prefix(BASE_URL)
            .unwrap_or(&request.url)
            .to_string();
        let key = format!("{} {}", request.method, path);
        let body = request.body.clone().unwrap_or_default();
        self.requests.borrow_mut().push(request);

        let by_body = self
            .by_body
            .borrow()
            .iter()
            .find(|(route, fragment, _)| *route == key && body.contains(fragment.as_str()))
            .map(|(_, _, reply)| reply.clone());
        if let Some(reply) = by_body {
            return reply;
        }

        self.routes
            .borrow()
            .get(&key)
            .cloned()
            .unwrap_or_else(|| {
                Ok(HttpResponse {
                    status: 404,
                    body: format!(r#"{{"message": "no route for {key}"}}"#),
                })
            })
    }
}

pub fn vendor_session() -> Session {
    Session {
        token: "vendor-token".to_string(),
        user: User {
            id: "u1".to_string(),
            role: Role::Vendor,
            name: Some("Ravi".to_string()),
            email: None,
        },
    }
}

/// Client wired to a scripted transport, a signed-in memory session and a
/// counter of unauthorized-callback invocations.
pub struct Harness {
    pub client: ApiClient<ScriptedTransport>,
    pub transport: ScriptedTransport,
    pub store: Rc<MemorySessionStore>,
    pub unauthorized_calls: Rc<Cell<u32>>,
}

impl Harness {
    pub fn signed_in() -> Self {
        Self::with_store(MemorySessionStore::with_session(vendor_session()))
    }

    pub fn anonymous() -> Self {
        Self::with_store(MemorySessionStore::new())
    }

    fn with_store(store: MemorySessionStore) -> Self {
        let transport = ScriptedTransport::new();
        let store = Rc::new(store);
        let unauthorized_calls = Rc::new(Cell::new(0));

        let calls = Rc::clone(&unauthorized_calls);
        let client = ApiClient::new(
            BASE_URL,
            transport.clone(),
            Rc::clone(&store) as Rc<dyn SessionStore>,
            move || calls.set(calls.get() + 1),
        );

        Self {
            client,
            transport,
            store,
            unauthorized_calls,
        }
    }
}

pub fn product_json(id: &str, name: &str, price: f64) -> String {
    format!(
        r#"{{"id": "{id}", "name": "{name}", "unitPrice": {price}, "stock": 50, "unitType": "kg", "category": "Vegetables", "imageUrl": "https://cdn.test/{id}.png"}}"#
    )
}
