use tokio::sync::{mpsc, watch};
use tracing::{debug, instrument};

use crate::domain::{Cart, ProductId, UpdateProductAmount};
use crate::error::CartError;
use crate::messages::CartRequest;

/// Shared handle to the cart, handed to every UI consumer.
///
/// Commands are queued to the cart actor and answered in arrival order.
/// [`CartClient::subscribe`] gives a receiver that wakes on every commit.
#[derive(Clone)]
pub struct CartClient {
    sender: mpsc::Sender<CartRequest>,
    snapshots: watch::Receiver<Cart>,
}

impl CartClient {
    pub fn new(sender: mpsc::Sender<CartRequest>, snapshots: watch::Receiver<Cart>) -> Self {
        Self { sender, snapshots }
    }

    /// Latest committed cart, without a round trip to the actor.
    pub fn snapshot(&self) -> Cart {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.snapshots.clone()
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), CartError> {
        debug!("Sending shutdown request");
        self.sender
            .send(CartRequest::Shutdown)
            .await
            .map_err(|e| CartError::ActorCommunicationError(e.to_string()))
    }
}

client_method!(CartClient => fn get_cart() -> Cart as CartRequest::GetCart, Error = CartError);
client_method!(CartClient => fn add_product(product_id: ProductId) -> Cart as CartRequest::AddProduct, Error = CartError);
client_method!(CartClient => fn remove_product(product_id: ProductId) -> Cart as CartRequest::RemoveProduct, Error = CartError);
client_method!(CartClient => fn update_product_amount(update: UpdateProductAmount) -> Cart as CartRequest::UpdateProductAmount, Error = CartError);
