/// Progress of a fetch-and-render cycle. Exactly one state is shown at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Ready(T),
    /// Message shown inline in place of the content
    Failed(String),
}

impl<T> LoadState<T> {
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub const fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Convert a fetch result, keeping only the error's display text
    pub fn from_result<E: std::fmt::Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(e) => Self::Failed(e.to_string()),
        }
    }
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        Self::Loading
    }
}

/// In-app pages. Anything unknown lands on the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Catalog,
    /// Filtered, paginated product browser
    Products,
    Cart,
    Orders,
    Login,
}

impl Route {
    pub fn from_path(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "/products" => Self::Products,
            "/cart" => Self::Cart,
            "/orders" => Self::Orders,
            "/login" => Self::Login,
            _ => Self::Catalog,
        }
    }

    pub const fn path(self) -> &'static str {
        match self {
            Self::Catalog => "/",
            Self::Products => "/products",
            Self::Cart => "/cart",
            Self::Orders => "/orders",
            Self::Login => "/login",
        }
    }

    /// Pages that redirect to login without a session
    pub const fn requires_session(self) -> bool {
        matches!(self, Self::Products | Self::Orders)
    }

    /// Page to actually show for this route given the login state
    #[must_use]
    pub const fn resolve(self, logged_in: bool) -> Self {
        if self.requires_session() && !logged_in {
            Self::Login
        } else {
            self
        }
    }

    /// Whether this route currently renders the login form
    pub const fn shows_login(self, logged_in: bool) -> bool {
        matches!(self.resolve(logged_in), Self::Login)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;

    #[test]
    fn test_load_state_is_mutually_exclusive() {
        let loading: LoadState<u32> = LoadState::default();
        assert!(loading.is_loading());
        assert!(loading.ready().is_none());
        assert!(loading.error().is_none());

        let ready = LoadState::<u32>::from_result(Ok::<_, ApiError>(3));
        assert_eq!(ready.ready(), Some(&3));
        assert!(!ready.is_loading());

        let failed =
            LoadState::<u32>::from_result(Err(ApiError::Network("Fetch failed".to_string())));
        assert_eq!(failed.error(), Some("network error: Fetch failed"));
        assert!(failed.ready().is_none());
    }

    #[test]
    fn test_route_from_path() {
        assert_eq!(Route::from_path("/"), Route::Catalog);
        assert_eq!(Route::from_path(""), Route::Catalog);
        assert_eq!(Route::from_path("/cart"), Route::Cart);
        assert_eq!(Route::from_path("/products"), Route::Products);
        assert_eq!(Route::from_path("/orders/"), Route::Orders);
        assert_eq!(Route::from_path("/login"), Route::Login);
        assert_eq!(Route::from_path("/analytics"), Route::Catalog);
    }

    #[test]
    fn test_route_paths_roundtrip() {
        for route in [
            Route::Catalog,
            Route::Products,
            Route::Cart,
            Route::Orders,
            Route::Login,
        ] {
            assert_eq!(Route::from_path(route.path()), route);
        }
    }

    #[test]
    fn test_orders_require_session() {
        assert_eq!(Route::Orders.resolve(false), Route::Login);
        assert_eq!(Route::Orders.resolve(true), Route::Orders);
        assert_eq!(Route::Products.resolve(false), Route::Login);
        assert_eq!(Route::Cart.resolve(false), Route::Cart);
    }

    #[test]
    fn test_shows_login() {
        assert!(Route::Login.shows_login(true));
        assert!(Route::Login.shows_login(false));
        assert!(Route::Orders.shows_login(false));
        assert!(!Route::Orders.shows_login(true));
        assert!(!Route::Cart.shows_login(false));
    }
}
