use vendor_buddy::app::App;
use vendor_buddy::config::AppConfig;
use vendor_buddy::logging::setup_logging;

fn main() {
    console_error_panic_hook::set_once();

    let config = AppConfig::from_env();
    if let Err(e) = setup_logging(&config.log_directive) {
        web_sys::console::warn_1(&format!("Warning: Failed to setup logging: {e}").into());
    }

    tracing::info!("Starting Vendor-Buddy web client");

    leptos::mount::mount_to_body(App);
}
