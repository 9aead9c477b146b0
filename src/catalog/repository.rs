use std::collections::HashSet;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};
use validator::Validate;

use crate::models::product::Product;

const EMBEDDED_CATALOG: &str = include_str!("../../data/products.json");

#[derive(Error, Debug)]
pub enum CatalogRepositoryError {
    #[error("Failed to read catalog {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Catalog is not a valid product list: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid product '{name}': {source}")]
    Validation {
        name: String,
        #[source]
        source: validator::ValidationErrors,
    },
    #[error("Duplicate product name in catalog: {0}")]
    DuplicateName(String),
}

/// Source of the read-only product list.
pub trait CatalogRepository {
    fn load(&self) -> Result<Vec<Product>, CatalogRepositoryError>;
}

/// The product list bundled with the binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbeddedCatalogRepository;

impl EmbeddedCatalogRepository {
    pub fn new() -> Self {
        Self
    }
}

impl CatalogRepository for EmbeddedCatalogRepository {
    fn load(&self) -> Result<Vec<Product>, CatalogRepositoryError> {
        debug!("Loading embedded catalog");
        parse_catalog(EMBEDDED_CATALOG)
    }
}

/// A JSON array of products on disk.
#[derive(Debug, Clone)]
pub struct JsonFileCatalogRepository {
    path: PathBuf,
}

impl JsonFileCatalogRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogRepository for JsonFileCatalogRepository {
    fn load(&self) -> Result<Vec<Product>, CatalogRepositoryError> {
        info!("Loading catalog from {}", self.path.display());
        let raw = std::fs::read_to_string(&self.path).map_err(|source| CatalogRepositoryError::Io {
            path: self.path.clone(),
            source,
        })?;
        parse_catalog(&raw)
    }
}

/// Parses and validates a catalog document. Order is preserved.
pub fn parse_catalog(raw: &str) -> Result<Vec<Product>, CatalogRepositoryError> {
    let products: Vec<Product> = serde_json::from_str(raw)?;

    let mut seen = HashSet::with_capacity(products.len());
    for product in &products {
        product
            .validate()
            .map_err(|source| CatalogRepositoryError::Validation {
                name: product.name.clone(),
                source,
            })?;

        if !seen.insert(product.name.as_str()) {
            return Err(CatalogRepositoryError::DuplicateName(product.name.clone()));
        }
    }

    debug!("Parsed {} catalog products", products.len());
    Ok(products)
}
