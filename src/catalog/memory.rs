use std::collections::HashMap;

use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument};

use crate::clients::CatalogClient;
use crate::domain::{Product, ProductId, Stock};
use crate::error::CatalogError;
use crate::messages::{CatalogRequest, ServiceResponse};

/// In-process catalog actor holding products and their stock levels.
///
/// Stands in for the storefront API in the demo binary and in tests. Reach it
/// through the [`CatalogClient`] returned by [`CatalogService::new`].
pub struct CatalogService {
    receiver: mpsc::Receiver<CatalogRequest>,
    products: HashMap<ProductId, Product>,
    stock: HashMap<ProductId, i64>,
}

impl CatalogService {
    pub fn new(buffer_size: usize) -> (Self, CatalogClient) {
        Self::with_products(buffer_size, Vec::new())
    }

    /// Creates the actor pre-seeded with `(product, stock)` pairs.
    pub fn with_products(
        buffer_size: usize,
        seed: impl IntoIterator<Item = (Product, i64)>,
    ) -> (Self, CatalogClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let mut products = HashMap::new();
        let mut stock = HashMap::new();
        for (product, amount) in seed {
            stock.insert(product.id, amount);
            products.insert(product.id, product);
        }
        let service = Self {
            receiver,
            products,
            stock,
        };
        (service, CatalogClient::new(sender))
    }

    #[instrument(name = "catalog_service", skip(self))]
    pub async fn run(mut self) {
        info!(products = self.products.len(), "CatalogService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CatalogRequest::GetProduct { id, respond_to } => {
                    self.handle_get_product(id, respond_to);
                }
                CatalogRequest::GetStock { id, respond_to } => {
                    self.handle_get_stock(id, respond_to);
                }
                CatalogRequest::InsertProduct {
                    product,
                    stock,
                    respond_to,
                } => {
                    self.handle_insert_product(product, stock, respond_to);
                }
                CatalogRequest::SetStock {
                    id,
                    amount,
                    respond_to,
                } => {
                    self.handle_set_stock(id, amount, respond_to);
                }
                CatalogRequest::Shutdown => {
                    info!("CatalogService shutting down");
                    break;
                }
            }
        }

        info!("CatalogService stopped");
    }

    #[instrument(fields(product_id = %id), skip(self, id, respond_to))]
    fn handle_get_product(&self, id: ProductId, respond_to: ServiceResponse<Product, CatalogError>) {
        debug!("Processing get_product request");

        let result = match self.products.get(&id) {
            Some(product) => {
                info!(title = %product.title, price = %product.price, "Product found");
                Ok(product.clone())
            }
            None => {
                debug!("Product not found");
                Err(CatalogError::NotFound(id))
            }
        };

        let _ = respond_to.send(result);
    }

    #[instrument(fields(product_id = %id), skip(self, id, respond_to))]
    fn handle_get_stock(&self, id: ProductId, respond_to: ServiceResponse<Stock, CatalogError>) {
        debug!("Processing get_stock request");

        let result = match self.stock.get(&id) {
            Some(&amount) => {
                info!(stock_level = amount, "Stock checked");
                Ok(Stock::new(amount))
            }
            None => {
                debug!("Stock not found");
                Err(CatalogError::NotFound(id))
            }
        };

        let _ = respond_to.send(result);
    }

    #[instrument(fields(product_id = %product.id, stock = stock), skip(self, product, stock, respond_to))]
    fn handle_insert_product(
        &mut self,
        product: Product,
        stock: i64,
        respond_to: ServiceResponse<(), CatalogError>,
    ) {
        debug!("Processing insert_product request");

        self.stock.insert(product.id, stock);
        self.products.insert(product.id, product);
        info!("Product stored");

        let _ = respond_to.send(Ok(()));
    }

    #[instrument(fields(product_id = %id, amount = amount), skip(self, id, amount, respond_to))]
    fn handle_set_stock(&mut self, id: ProductId, amount: i64, respond_to: ServiceResponse<(), CatalogError>) {
        debug!("Processing set_stock request");

        let result = match self.stock.get_mut(&id) {
            Some(current) => {
                *current = amount;
                info!("Stock updated");
                Ok(())
            }
            None => {
                error!("Product not found");
                Err(CatalogError::NotFound(id))
            }
        };

        let _ = respond_to.send(result);
    }
}
