//! Remote product and stock lookups consumed by the cart.

pub mod http;
pub mod memory;

use async_trait::async_trait;

use crate::domain::{Product, ProductId, Stock};
use crate::error::CatalogError;

pub use http::HttpCatalog;
pub use memory::CatalogService;

/// Source of product details (`GET products/{id}`).
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError>;
}

/// Source of live stock levels (`GET stock/{id}`).
#[async_trait]
pub trait StockService: Send + Sync {
    async fn get_stock(&self, id: ProductId) -> Result<Stock, CatalogError>;
}
