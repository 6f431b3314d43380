//! # Receipt Data Records
//!
//! Plain records owned by a [`Receipt`](crate::receipt::Receipt):
//!
//! - [`Store`]: merchant identity printed in the header
//! - [`Item`]: one sold line, with the currency captured when it was added

mod item;
mod store;

pub use item::Item;
pub use store::Store;
