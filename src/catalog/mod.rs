pub mod repository;

pub use repository::{
    CatalogRepository, CatalogRepositoryError, EmbeddedCatalogRepository, JsonFileCatalogRepository,
};
