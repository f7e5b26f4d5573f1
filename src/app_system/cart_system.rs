use std::sync::Arc;

use anyhow::Context;
use tokio::task::JoinHandle;
use tracing::{error, info, instrument};

use super::CartSettings;
use crate::cart_actor::{CartCollaborators, CartService};
use crate::catalog::{CatalogService, HttpCatalog};
use crate::clients::{CartClient, CatalogClient};
use crate::domain::Product;
use crate::notifier::Notifier;
use crate::storage::FileStorage;

/// Starts the cart actor (and the in-memory catalog when one is used) and
/// hands out the shared [`CartClient`].
pub struct CartSystem {
    pub cart_client: CartClient,
    catalog_client: Option<CatalogClient>,
    handles: Vec<JoinHandle<()>>,
}

impl CartSystem {
    /// Start a cart on explicit collaborators. Must run inside a Tokio runtime.
    #[instrument(name = "cart_system", skip(storage_key, collaborators))]
    pub fn new(channel_capacity: usize, storage_key: &str, collaborators: CartCollaborators) -> Self {
        info!("Starting cart system");

        let (cart_service, cart_client) = CartService::new(channel_capacity, storage_key, collaborators);
        let handles = vec![tokio::spawn(cart_service.run())];

        info!("Cart system started successfully");
        Self {
            cart_client,
            catalog_client: None,
            handles,
        }
    }

    /// Wire the system from settings: file storage, and either the HTTP
    /// catalog or an in-memory catalog seeded with `seed`.
    #[instrument(name = "cart_system", skip_all)]
    pub fn from_settings(
        settings: &CartSettings,
        seed: Vec<(Product, i64)>,
        notifier: Arc<dyn Notifier>,
    ) -> anyhow::Result<Self> {
        let storage = Arc::new(FileStorage::new(&settings.storage_path));

        match &settings.api_base_url {
            Some(base_url) => {
                info!(base_url = %base_url, "Using storefront API catalog");
                let catalog = Arc::new(
                    HttpCatalog::new(base_url.as_str(), settings.request_timeout())
                        .context("failed to build HTTP catalog")?,
                );
                let collaborators = CartCollaborators {
                    catalog: catalog.clone(),
                    stock: catalog,
                    storage,
                    notifier,
                };
                Ok(Self::new(settings.channel_capacity, &settings.storage_key, collaborators))
            }
            None => {
                info!(products = seed.len(), "Using in-memory catalog");
                let (catalog_service, catalog_client) =
                    CatalogService::with_products(settings.channel_capacity, seed);
                let catalog_handle = tokio::spawn(catalog_service.run());

                let catalog = Arc::new(catalog_client.clone());
                let collaborators = CartCollaborators {
                    catalog: catalog.clone(),
                    stock: catalog,
                    storage,
                    notifier,
                };
                let mut system = Self::new(settings.channel_capacity, &settings.storage_key, collaborators);
                system.catalog_client = Some(catalog_client);
                system.handles.push(catalog_handle);
                Ok(system)
            }
        }
    }

    /// The in-memory catalog, when the system runs one.
    pub fn catalog_client(&self) -> Option<&CatalogClient> {
        self.catalog_client.as_ref()
    }

    /// Stop the cart first, then the catalog it depends on, and wait for both.
    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down cart system");

        let _ = self.cart_client.shutdown().await;
        if let Some(catalog_client) = &self.catalog_client {
            let _ = catalog_client.shutdown().await;
        }

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Service shutdown error");
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("Cart system shutdown complete");
        Ok(())
    }
}
