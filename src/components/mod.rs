pub mod cart_page;
pub mod catalog_view;
pub mod login_page;
pub mod nav_bar;
pub mod notification_bar;
pub mod order_history;
pub mod products_page;

pub use cart_page::CartPage;
pub use catalog_view::{CatalogView, ProductCard};
pub use login_page::LoginPage;
pub use nav_bar::NavBar;
pub use notification_bar::NotificationBar;
pub use order_history::OrderHistory;
pub use products_page::ProductsPage;
