pub mod cart;
pub mod product;
pub mod receipt;

pub use cart::{Cart, CartError, CartState, GroupedLine};
pub use product::{LineItem, Product};
pub use receipt::{Receipt, ReceiptLine};
