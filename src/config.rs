/// Backend used when `VENDOR_BUDDY_API_BASE_URL` is not set at build time.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";

/// Log filter used when `VENDOR_BUDDY_LOG` is not set at build time.
pub const DEFAULT_LOG_DIRECTIVE: &str = "vendor_buddy=debug";

/// Build-time configuration of the web client.
///
/// Values come from environment variables captured by `option_env!` when the
/// WASM bundle is compiled; the browser has no process environment at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the REST API, without trailing slash
    pub api_base_url: String,
    /// Number of products requested by the catalog view
    pub catalog_page_size: u32,
    /// Page size of the filtered product browser
    pub browse_page_size: u32,
    /// How long transient notifications stay visible
    pub notification_timeout_ms: i32,
    /// Where the user is sent when their session ends
    pub login_path: String,
    /// `tracing` filter directive
    pub log_directive: String,
}

impl AppConfig {
    /// Read configuration captured at compile time
    pub fn from_env() -> Self {
        Self::from_values(
            option_env!("VENDOR_BUDDY_API_BASE_URL"),
            option_env!("VENDOR_BUDDY_LOG"),
        )
    }

    /// Build configuration from optional overrides; blank values use defaults.
    pub fn from_values(api_base_url: Option<&str>, log_directive: Option<&str>) -> Self {
        Self {
            api_base_url: non_blank(api_base_url)
                .unwrap_or(DEFAULT_API_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            log_directive: non_blank(log_directive)
                .unwrap_or(DEFAULT_LOG_DIRECTIVE)
                .to_string(),
            ..Self::default()
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            catalog_page_size: 100,
            browse_page_size: 12,
            notification_timeout_ms: 3000,
            login_path: "/login".to_string(),
            log_directive: DEFAULT_LOG_DIRECTIVE.to_string(),
        }
    }
}
