use thiserror::Error;
use tracing::debug;

use crate::{
    catalog::{CatalogRepository, CatalogRepositoryError},
    models::product::Product,
};

#[derive(Error, Debug)]
pub enum CatalogServiceError {
    #[error("Product not found: {name}")]
    ProductNotFound { name: String },

    #[error("Repository error: {0}")]
    RepositoryError(#[from] CatalogRepositoryError),
}

/// Products whose name contains `query`, ignoring case. An empty query
/// keeps the whole catalog.
pub fn filter_products<'a>(catalog: &'a [Product], query: &str) -> Vec<&'a Product> {
    let needle = query.to_lowercase();
    catalog
        .iter()
        .filter(|product| product.name.to_lowercase().contains(&needle))
        .collect()
}

pub struct CatalogService {
    products: Vec<Product>,
}

impl CatalogService {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn load(repository: &dyn CatalogRepository) -> Result<Self, CatalogServiceError> {
        let products = repository.load()?;
        debug!("Catalog service ready with {} products", products.len());
        Ok(Self::new(products))
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn search(&self, query: &str) -> Vec<&Product> {
        let matches = filter_products(&self.products, query);
        debug!("Search '{}' matched {} products", query, matches.len());
        matches
    }

    /// Exact name first, then a case-insensitive match.
    pub fn find_by_name(&self, name: &str) -> Result<&Product, CatalogServiceError> {
        self.products
            .iter()
            .find(|product| product.name == name)
            .or_else(|| {
                self.products
                    .iter()
                    .find(|product| product.name.eq_ignore_ascii_case(name))
            })
            .ok_or_else(|| CatalogServiceError::ProductNotFound {
                name: name.to_string(),
            })
    }
}
