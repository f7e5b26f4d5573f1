use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::{debug, instrument};

use crate::catalog::{ProductCatalog, StockService};
use crate::domain::{Product, ProductId, Stock};
use crate::error::CatalogError;
use crate::messages::CatalogRequest;

/// Client for the in-memory catalog actor.
#[derive(Clone)]
pub struct CatalogClient {
    sender: mpsc::Sender<CatalogRequest>,
}

impl CatalogClient {
    pub fn new(sender: mpsc::Sender<CatalogRequest>) -> Self {
        Self { sender }
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), CatalogError> {
        debug!("Sending shutdown request");
        self.sender
            .send(CatalogRequest::Shutdown)
            .await
            .map_err(|e| CatalogError::ActorCommunicationError(e.to_string()))
    }
}

client_method!(CatalogClient => fn lookup_product(id: ProductId) -> Product as CatalogRequest::GetProduct, Error = CatalogError);
client_method!(CatalogClient => fn lookup_stock(id: ProductId) -> Stock as CatalogRequest::GetStock, Error = CatalogError);
client_method!(CatalogClient => fn insert_product(product: Product, stock: i64) -> () as CatalogRequest::InsertProduct, Error = CatalogError);
client_method!(CatalogClient => fn set_stock(id: ProductId, amount: i64) -> () as CatalogRequest::SetStock, Error = CatalogError);

#[async_trait]
impl ProductCatalog for CatalogClient {
    async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.lookup_product(id).await
    }
}

#[async_trait]
impl StockService for CatalogClient {
    async fn get_stock(&self, id: ProductId) -> Result<Stock, CatalogError> {
        self.lookup_stock(id).await
    }
}
