pub mod cart;
pub mod errors;
pub mod order;
pub mod product;
pub mod user;

pub use cart::{Cart, CartSnapshot, LineItem};
pub use errors::DomainError;
pub use order::Order;
pub use product::{Product, Review};
pub use user::{Role, User};
