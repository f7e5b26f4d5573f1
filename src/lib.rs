//! # Storefront cart
//!
//! Client-side shopping-cart state for a storefront UI, built as a small actor system.
//!
//! - **Domain types** - [`Product`], [`Stock`], [`CartLineItem`] and the ordered [`Cart`]
//! - **Cart actor** - [`CartService`] owns the cart, checks stock before add/update and
//!   persists the whole cart on every commit
//! - **Client** - [`CartClient`] is the shared handle every UI consumer clones; it can also
//!   [`subscribe`](CartClient::subscribe) to commits
//! - **Collaborators** - [`ProductCatalog`] / [`StockService`] (HTTP or in-memory),
//!   [`KeyValueStorage`] (file or memory) and a [`Notifier`] for user-facing messages
//! - **System coordinator** - [`CartSystem`] wires everything from [`CartSettings`]
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! let system = CartSystem::from_settings(&load_settings()?, seed, Arc::new(TracingNotifier))?;
//!
//! let cart = system.cart_client.add_product(1).await?;
//! system.cart_client
//!     .update_product_amount(UpdateProductAmount::new(1, 3))
//!     .await?;
//!
//! system.shutdown().await?;
//! ```
//!
//! Every command returns the committed [`Cart`] or a [`CartError`]; on error the cart and
//! its persisted copy are unchanged and the notifier has been given
//! [`CartError::user_message`].

pub mod app_system;
pub mod cart_actor;
pub mod catalog;
pub mod clients;
pub mod domain;
pub mod error;
pub mod messages;
pub mod notifier;
pub mod storage;

#[cfg(test)]
mod mock_framework;

pub use app_system::{load_settings, setup_tracing, CartSettings, CartSystem};
pub use cart_actor::{CartCollaborators, CartService};
pub use catalog::{CatalogService, HttpCatalog, ProductCatalog, StockService};
pub use clients::{CartClient, CatalogClient};
pub use domain::{Cart, CartLineItem, Product, ProductId, Stock, UpdateProductAmount};
pub use error::{CartError, CartOperation, CatalogError, StorageError};
pub use notifier::{Notifier, NullNotifier, TracingNotifier};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
