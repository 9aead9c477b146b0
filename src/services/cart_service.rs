use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::{
    cart::{Cart, CartError},
    product::{LineItem, Product},
    receipt::Receipt,
};

#[derive(Error, Debug)]
pub enum CartServiceError {
    #[error(transparent)]
    Cart(#[from] CartError),
}

/// Owns the session cart and logs every change made to it.
#[derive(Debug, Default)]
pub struct CartService {
    cart: Cart,
}

impl CartService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn add_item(&mut self, item: LineItem) -> Result<(), CartServiceError> {
        let name = item.name.clone();
        let price = item.price;

        self.cart.add_item(item).map_err(|e| {
            warn!("Rejected '{}' priced {}: {}", name, price, e);
            CartServiceError::Cart(e)
        })?;

        info!(
            "Added '{}' to cart ({} units, total {})",
            name,
            self.cart.len(),
            self.cart.total()
        );
        Ok(())
    }

    pub fn add_product(&mut self, product: &Product) -> Result<(), CartServiceError> {
        self.add_item(product.to_line_item())
    }

    pub fn remove_item(&mut self, item: &LineItem) -> bool {
        let removed = self.cart.remove_item(item);
        if removed {
            info!(
                "Removed one '{}' from cart ({} units, total {})",
                item.name,
                self.cart.len(),
                self.cart.total()
            );
        } else {
            debug!("'{}' is not in the cart, nothing removed", item.name);
        }
        removed
    }

    pub fn remove_product(&mut self, product: &Product) -> bool {
        self.remove_item(&product.to_line_item())
    }

    pub fn quantity_of(&self, product: &Product) -> usize {
        self.cart.quantity_of(&product.to_line_item())
    }

    pub fn reset(&mut self) {
        self.cart.reset();
        info!("Cart reset");
    }

    /// Pays for the cart: captures a receipt, then empties the cart.
    /// Paying an empty cart is a plain reset and yields no receipt.
    pub fn checkout(&mut self) -> Option<Receipt> {
        if self.cart.is_empty() {
            debug!("Checkout on an empty cart, nothing to pay");
            self.cart.reset();
            return None;
        }

        let receipt = Receipt::from_cart(&self.cart);
        self.cart.reset();

        info!(
            "Checkout {} completed: {} units, total {}",
            receipt.id,
            receipt.unit_count(),
            receipt.total
        );
        Some(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_remove_products() {
        let hat = Product::new("Hat", 270.0);
        let mut service = CartService::new();

        service.add_product(&hat).unwrap();
        service.add_product(&hat).unwrap();
        assert_eq!(service.quantity_of(&hat), 2);
        assert_eq!(service.cart().total(), 540.0);

        assert!(service.remove_product(&hat));
        assert_eq!(service.quantity_of(&hat), 1);
        assert_eq!(service.cart().total(), 270.0);
    }

    #[test]
    fn test_invalid_price_is_surfaced() {
        let mut service = CartService::new();
        let result = service.add_item(LineItem::new("Broken", -1.0));
        assert!(matches!(
            result,
            Err(CartServiceError::Cart(CartError::InvalidPrice { .. }))
        ));
        assert!(service.cart().is_empty());
    }

    #[test]
    fn test_checkout_builds_receipt_and_resets() {
        let mut service = CartService::new();
        service.add_product(&Product::new("Hat", 270.0)).unwrap();
        service.add_product(&Product::new("Hat", 270.0)).unwrap();
        service.add_product(&Product::new("Scarf", 150.0)).unwrap();

        let receipt = service.checkout().unwrap();
        assert_eq!(receipt.total, 690.0);
        assert_eq!(receipt.unit_count(), 3);
        assert_eq!(receipt.lines.len(), 2);
        assert_eq!(receipt.lines[0].name, "Hat");
        assert_eq!(receipt.lines[0].quantity, 2);
        assert_eq!(receipt.lines[0].subtotal, 540.0);

        assert!(service.cart().is_empty());
        assert_eq!(service.cart().total(), 0.0);
    }

    #[test]
    fn test_checkout_empty_cart_is_a_plain_reset() {
        let mut service = CartService::new();
        assert!(service.checkout().is_none());
        assert!(service.cart().is_empty());
        assert_eq!(service.cart().total(), 0.0);

        // paying twice in a row: the second one finds nothing
        service.add_product(&Product::new("Hat", 270.0)).unwrap();
        assert!(service.checkout().is_some());
        assert!(service.checkout().is_none());
        assert!(service.cart().is_empty());
    }
}
