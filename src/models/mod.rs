pub mod cart;
pub mod nullable;
pub mod order;
pub mod product;
pub mod session;
pub mod shop_state;
pub mod view_state;

pub use cart::{Cart, CartItem};
pub use order::{format_timestamp, NewOrder, Order, OrderList, OrderStatus, StatusStyle};
pub use product::{format_price, Product, UNKNOWN_PRODUCT_NAME};
pub use session::{Credentials, Role, Session, User};
pub use shop_state::{AuthState, ShopState};
pub use view_state::{LoadState, Route};
