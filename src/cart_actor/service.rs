use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, instrument, warn};

use crate::catalog::{ProductCatalog, StockService};
use crate::clients::CartClient;
use crate::domain::{Cart, ProductId, UpdateProductAmount};
use crate::error::{CartError, CartOperation};
use crate::messages::{CartRequest, ServiceResponse};
use crate::notifier::Notifier;
use crate::storage::KeyValueStorage;

/// Everything the cart consumes from the outside world.
#[derive(Clone)]
pub struct CartCollaborators {
    pub catalog: Arc<dyn ProductCatalog>,
    pub stock: Arc<dyn StockService>,
    pub storage: Arc<dyn KeyValueStorage>,
    pub notifier: Arc<dyn Notifier>,
}

/// Owner of the canonical cart.
///
/// Commands are processed one at a time, remote lookups included, so two
/// commands never work from the same stale snapshot. Every successful command
/// persists the whole cart before it becomes visible to readers.
pub struct CartService {
    receiver: mpsc::Receiver<CartRequest>,
    cart: Cart,
    storage_key: String,
    collaborators: CartCollaborators,
    snapshots: watch::Sender<Cart>,
}

impl CartService {
    /// Loads the persisted cart and builds the actor with its client.
    pub fn new(
        buffer_size: usize,
        storage_key: impl Into<String>,
        collaborators: CartCollaborators,
    ) -> (Self, CartClient) {
        let storage_key = storage_key.into();
        let cart = load_cart(collaborators.storage.as_ref(), &storage_key);

        let (sender, receiver) = mpsc::channel(buffer_size);
        let (snapshots, snapshot_rx) = watch::channel(cart.clone());
        let service = Self {
            receiver,
            cart,
            storage_key,
            collaborators,
            snapshots,
        };
        (service, CartClient::new(sender, snapshot_rx))
    }

    #[instrument(name = "cart_service", skip(self))]
    pub async fn run(mut self) {
        info!(items = self.cart.len(), "CartService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CartRequest::GetCart { respond_to } => {
                    let _ = respond_to.send(Ok(self.cart.clone()));
                }
                CartRequest::AddProduct { product_id, respond_to } => {
                    let result = self.handle_add_product(product_id).await;
                    self.respond(result, respond_to);
                }
                CartRequest::RemoveProduct { product_id, respond_to } => {
                    let result = self.handle_remove_product(product_id);
                    self.respond(result, respond_to);
                }
                CartRequest::UpdateProductAmount { update, respond_to } => {
                    let result = self.handle_update_product_amount(update).await;
                    self.respond(result, respond_to);
                }
                CartRequest::Shutdown => {
                    info!("CartService shutting down");
                    break;
                }
            }
        }

        info!("CartService stopped");
    }

    fn respond(&self, result: Result<Cart, CartError>, respond_to: ServiceResponse<Cart, CartError>) {
        if let Err(e) = &result {
            self.collaborators.notifier.report_error(e.user_message());
        }
        let _ = respond_to.send(result);
    }

    #[instrument(fields(product_id = %product_id), skip(self, product_id))]
    async fn handle_add_product(&mut self, product_id: ProductId) -> Result<Cart, CartError> {
        debug!("Processing add_product request");
        let op = CartOperation::AddProduct;

        let updated = match self.cart.get(product_id).map(|item| item.amount) {
            Some(current) => {
                let stock = self
                    .collaborators
                    .stock
                    .get_stock(product_id)
                    .await
                    .map_err(|e| {
                        error!(error = %e, "Stock lookup failed");
                        CartError::transport(op, e)
                    })?;

                let requested = i64::from(current) + 1;
                let out_of_stock = CartError::OutOfStock {
                    product_id,
                    requested,
                    available: stock.amount,
                };
                if !stock.allows(i64::from(current)) {
                    warn!(available = stock.amount, requested, "Insufficient stock");
                    return Err(out_of_stock);
                }
                self.cart.with_incremented(product_id).ok_or(out_of_stock)?
            }
            None => {
                let product = self
                    .collaborators
                    .catalog
                    .get_product(product_id)
                    .await
                    .map_err(|e| {
                        error!(error = %e, "Product lookup failed");
                        CartError::transport(op, e)
                    })?;

                if product.id != product_id {
                    error!(returned_id = product.id, "Catalog returned a different product");
                    return Err(CartError::transport(
                        op,
                        format!("catalog returned product {} for {}", product.id, product_id),
                    ));
                }
                info!(title = %product.title, "Adding new line-item");
                self.cart
                    .with_product(product)
                    .ok_or(CartError::NotFound { product_id, op })?
            }
        };

        self.commit(op, updated)
    }

    #[instrument(fields(product_id = %product_id), skip(self, product_id))]
    fn handle_remove_product(&mut self, product_id: ProductId) -> Result<Cart, CartError> {
        debug!("Processing remove_product request");
        let op = CartOperation::RemoveProduct;

        let Some(updated) = self.cart.without(product_id) else {
            warn!("Product not in cart");
            return Err(CartError::NotFound { product_id, op });
        };

        self.commit(op, updated)
    }

    #[instrument(fields(product_id = %update.product_id, amount = update.amount), skip(self, update))]
    async fn handle_update_product_amount(&mut self, update: UpdateProductAmount) -> Result<Cart, CartError> {
        debug!("Processing update_product_amount request");
        let op = CartOperation::UpdateProductAmount;
        let UpdateProductAmount { product_id, amount } = update;

        if amount <= 0 {
            debug!("Ignoring non-positive amount");
            return Ok(self.cart.clone());
        }

        let stock = self
            .collaborators
            .stock
            .get_stock(product_id)
            .await
            .map_err(|e| {
                error!(error = %e, "Stock lookup failed");
                CartError::transport(op, e)
            })?;

        let out_of_stock = CartError::OutOfStock {
            product_id,
            requested: amount,
            available: stock.amount,
        };
        if !stock.allows(amount) {
            warn!(available = stock.amount, "Insufficient stock");
            return Err(out_of_stock);
        }
        let amount = u32::try_from(amount).map_err(|_| out_of_stock)?;

        let Some(updated) = self.cart.with_amount(product_id, amount) else {
            warn!("Product not in cart");
            return Err(CartError::NotFound { product_id, op });
        };

        self.commit(op, updated)
    }

    /// Persists `updated`, then makes it the current cart and publishes it.
    ///
    /// A failed write leaves the in-memory cart as it was.
    fn commit(&mut self, op: CartOperation, updated: Cart) -> Result<Cart, CartError> {
        let serialized = updated.to_json().map_err(|e| CartError::storage(op, e))?;
        self.collaborators
            .storage
            .set(&self.storage_key, &serialized)
            .map_err(|e| {
                error!(error = %e, "Failed to persist cart");
                CartError::storage(op, e)
            })?;

        self.cart = updated;
        self.snapshots.send_replace(self.cart.clone());
        info!(
            items = self.cart.len(),
            quantity = self.cart.total_quantity(),
            "Cart committed"
        );
        Ok(self.cart.clone())
    }
}

/// Reads the persisted cart. Missing, unreadable or corrupt data yields an empty cart.
fn load_cart(storage: &dyn KeyValueStorage, key: &str) -> Cart {
    match storage.get(key) {
        Ok(Some(raw)) => match Cart::from_json(&raw) {
            Ok(cart) => {
                info!(items = cart.len(), "Loaded persisted cart");
                cart
            }
            Err(e) => {
                warn!(error = %e, "Discarding unreadable persisted cart");
                Cart::new()
            }
        },
        Ok(None) => {
            debug!("No persisted cart");
            Cart::new()
        }
        Err(e) => {
            warn!(error = %e, "Failed to read persisted cart");
            Cart::new()
        }
    }
}
