//! Domain models for the cart.

mod cart;
mod id;

pub use cart::{Cart, LineItem};
pub use id::ProductId;
