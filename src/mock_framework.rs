//! # Mock Framework
//!
//! Utilities for testing the cart against controlled collaborators.
//!
//! Use [`create_mock_catalog`] to get a catalog client whose requests land on a
//! receiver the test owns, then answer them with [`expect_get_stock`] and
//! [`expect_get_product`]. [`spawn_cart`] starts a cart actor on top.

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use crate::cart_actor::{CartCollaborators, CartService};
use crate::clients::{CartClient, CatalogClient};
use crate::domain::{Cart, Product, ProductId, Stock};
use crate::error::{CatalogError, StorageError};
use crate::messages::{CatalogRequest, ServiceResponse};
use crate::notifier::Notifier;
use crate::storage::{KeyValueStorage, MemoryStorage};

pub const TEST_KEY: &str = "@RocketShoes:cart";

/// Creates a catalog client and the receiver its requests arrive on.
pub fn create_mock_catalog(buffer_size: usize) -> (CatalogClient, mpsc::Receiver<CatalogRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (CatalogClient::new(sender), receiver)
}

/// Helper to verify that the next message is a stock lookup
pub async fn expect_get_stock(
    receiver: &mut mpsc::Receiver<CatalogRequest>,
) -> Option<(ProductId, ServiceResponse<Stock, CatalogError>)> {
    match receiver.recv().await {
        Some(CatalogRequest::GetStock { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a product lookup
pub async fn expect_get_product(
    receiver: &mut mpsc::Receiver<CatalogRequest>,
) -> Option<(ProductId, ServiceResponse<Product, CatalogError>)> {
    match receiver.recv().await {
        Some(CatalogRequest::GetProduct { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Collects every reported message.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn report_error(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

/// Storage that serves a fixed value and refuses every write.
#[derive(Debug, Default)]
pub struct FailingStorage {
    pub stored: Option<String>,
}

impl KeyValueStorage for FailingStorage {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.stored.clone())
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("disk full".to_string()))
    }
}

/// Storage holding `cart` under [`TEST_KEY`].
pub fn storage_with(cart: &Cart) -> Arc<MemoryStorage> {
    Arc::new(MemoryStorage::with_entry(TEST_KEY, cart.to_json().unwrap()))
}

/// Reads back the cart persisted under [`TEST_KEY`].
pub fn persisted(storage: &dyn KeyValueStorage) -> Option<Cart> {
    storage
        .get(TEST_KEY)
        .unwrap()
        .map(|raw| Cart::from_json(&raw).unwrap())
}

/// Starts a cart actor using `catalog` for both product and stock lookups.
pub fn spawn_cart(
    catalog: CatalogClient,
    storage: Arc<dyn KeyValueStorage>,
    notifier: Arc<dyn Notifier>,
) -> CartClient {
    let catalog = Arc::new(catalog);
    let collaborators = CartCollaborators {
        catalog: catalog.clone(),
        stock: catalog,
        storage,
        notifier,
    };
    let (service, client) = CartService::new(10, TEST_KEY, collaborators);
    tokio::spawn(service.run());
    client
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StockService;

    #[tokio::test]
    async fn test_mock_catalog() {
        let (client, mut receiver) = create_mock_catalog(10);

        let lookup = tokio::spawn(async move { client.get_stock(4).await });

        let (id, responder) = expect_get_stock(&mut receiver).await.expect("Expected GetStock request");
        assert_eq!(id, 4);
        responder.send(Ok(Stock::new(12))).unwrap();

        let result = lookup.await.unwrap();
        assert_eq!(result.unwrap(), Stock::new(12));
    }
}
