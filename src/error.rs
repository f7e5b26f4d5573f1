use std::fmt;

use thiserror::Error;

use crate::domain::ProductId;

pub const OUT_OF_STOCK_MESSAGE: &str = "requested quantity out of stock";
pub const CART_UNAVAILABLE_MESSAGE: &str = "cart is unavailable";

/// The cart commands, used to pick the user-facing failure message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartOperation {
    AddProduct,
    RemoveProduct,
    UpdateProductAmount,
}

impl CartOperation {
    /// Generic message shown when the command fails for any reason other than stock.
    pub fn failure_message(self) -> &'static str {
        match self {
            CartOperation::AddProduct => "failed to add product",
            CartOperation::RemoveProduct => "failed to remove product",
            CartOperation::UpdateProductAmount => "failed to change product quantity",
        }
    }
}

impl fmt::Display for CartOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CartOperation::AddProduct => "add_product",
            CartOperation::RemoveProduct => "remove_product",
            CartOperation::UpdateProductAmount => "update_product_amount",
        };
        f.write_str(name)
    }
}

/// Errors returned by cart commands. The cart is unchanged whenever one is returned.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Insufficient stock for product {product_id}: requested {requested}, available {available}")]
    OutOfStock {
        product_id: ProductId,
        requested: i64,
        available: i64,
    },
    #[error("{op}: product {product_id} is not in the cart")]
    NotFound { product_id: ProductId, op: CartOperation },
    #[error("{op}: catalog lookup failed: {reason}")]
    Transport { op: CartOperation, reason: String },
    #[error("{op}: cart storage failed: {reason}")]
    Storage { op: CartOperation, reason: String },
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl CartError {
    pub fn transport(op: CartOperation, err: impl fmt::Display) -> Self {
        CartError::Transport {
            op,
            reason: err.to_string(),
        }
    }

    pub fn storage(op: CartOperation, err: impl fmt::Display) -> Self {
        CartError::Storage {
            op,
            reason: err.to_string(),
        }
    }

    /// Text to surface to the shopper.
    pub fn user_message(&self) -> &'static str {
        match self {
            CartError::OutOfStock { .. } => OUT_OF_STOCK_MESSAGE,
            CartError::NotFound { op, .. }
            | CartError::Transport { op, .. }
            | CartError::Storage { op, .. } => op.failure_message(),
            CartError::ActorCommunicationError(_) => CART_UNAVAILABLE_MESSAGE,
        }
    }
}

/// Errors from the product and stock lookups.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Product not found: {0}")]
    NotFound(ProductId),
    #[error("Catalog request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

/// Errors from the key-value storage holding the cart blob.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Corrupt cart data: {0}")]
    Corrupt(String),
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_messages_follow_the_operation() {
        let out_of_stock = CartError::OutOfStock {
            product_id: 1,
            requested: 2,
            available: 1,
        };
        assert_eq!(out_of_stock.user_message(), "requested quantity out of stock");

        let transport = CartError::transport(CartOperation::AddProduct, "connection reset");
        assert_eq!(transport.user_message(), "failed to add product");

        let missing = CartError::NotFound {
            product_id: 9,
            op: CartOperation::RemoveProduct,
        };
        assert_eq!(missing.user_message(), "failed to remove product");

        let storage = CartError::storage(CartOperation::UpdateProductAmount, "disk full");
        assert_eq!(storage.user_message(), "failed to change product quantity");
    }

    #[test]
    fn display_names_the_operation() {
        let err = CartError::transport(CartOperation::UpdateProductAmount, "timeout");
        assert_eq!(err.to_string(), "update_product_amount: catalog lookup failed: timeout");
    }
}
