use thiserror::Error;
use tracing::{debug, info};

use crate::{
    models::{cart::Cart, product::Product, receipt::Receipt},
    services::{CartService, CartServiceError, CatalogService, CatalogServiceError},
};

#[derive(Error, Debug)]
pub enum StorefrontError {
    #[error(transparent)]
    Catalog(#[from] CatalogServiceError),

    #[error(transparent)]
    Cart(#[from] CartServiceError),
}

/// Something the shopper did on the page.
#[derive(Debug, Clone, PartialEq)]
pub enum ShopEvent {
    /// Text typed in the search field.
    Search(String),
    ClearSearch,
    /// "+" on a product or on a cart line.
    Increase(String),
    /// "-" on a product or on a cart line.
    Decrease(String),
    Pay,
    Reset,
}

#[derive(Debug)]
pub enum EventOutcome {
    Updated,
    Paid(Receipt),
    /// The control was disabled, e.g. decreasing a product with
    /// nothing in the cart, or paying an empty cart.
    Ignored,
}

/// Catalog, cart and search text of one shopping session.
pub struct Storefront {
    catalog: CatalogService,
    cart: CartService,
    query: String,
}

impl Storefront {
    pub fn new(catalog: CatalogService) -> Self {
        Self {
            catalog,
            cart: CartService::new(),
            query: String::new(),
        }
    }

    pub fn handle(&mut self, event: ShopEvent) -> Result<EventOutcome, StorefrontError> {
        debug!("Handling {:?}", event);

        match event {
            ShopEvent::Search(query) => {
                self.query = query;
                Ok(EventOutcome::Updated)
            }
            ShopEvent::ClearSearch => {
                self.query.clear();
                Ok(EventOutcome::Updated)
            }
            ShopEvent::Increase(name) => {
                let product = self.catalog.find_by_name(&name)?;
                self.cart.add_product(product)?;
                Ok(EventOutcome::Updated)
            }
            ShopEvent::Decrease(name) => {
                let product = self.catalog.find_by_name(&name)?;
                if self.cart.remove_product(product) {
                    Ok(EventOutcome::Updated)
                } else {
                    Ok(EventOutcome::Ignored)
                }
            }
            ShopEvent::Pay => match self.cart.checkout() {
                Some(receipt) => {
                    info!("Paid {} for order {}", receipt.total, receipt.id);
                    Ok(EventOutcome::Paid(receipt))
                }
                None => Ok(EventOutcome::Ignored),
            },
            ShopEvent::Reset => {
                self.cart.reset();
                Ok(EventOutcome::Updated)
            }
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn visible_products(&self) -> Vec<&Product> {
        self.catalog.search(&self.query)
    }

    pub fn product_quantity(&self, name: &str) -> usize {
        self.catalog
            .find_by_name(name)
            .map(|product| self.cart.quantity_of(product))
            .unwrap_or(0)
    }

    pub fn can_decrease(&self, name: &str) -> bool {
        self.product_quantity(name) > 0
    }

    pub fn cart(&self) -> &Cart {
        self.cart.cart()
    }
}
