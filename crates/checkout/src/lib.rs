pub mod command;
pub mod errors;
pub mod invoker;
pub mod place_order;

pub use command::Command;
pub use errors::CheckoutError;
pub use invoker::CommandInvoker;
pub use place_order::PlaceOrderCommand;
