//! Domain and view types for the marketplace.

pub mod cart;
pub mod order;
pub mod product;
pub mod session;
pub mod user;

pub use cart::{Cart, CartItem};
pub use order::{LineItem, Order, OrderView};
pub use product::Product;
pub use session::CurrentUser;
pub use user::{Profile, User, UserView};
