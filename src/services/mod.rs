pub mod cart_service;
pub mod catalog_service;
pub mod storefront;

pub use cart_service::*;
pub use catalog_service::*;
pub use storefront::*;
