use tokio::sync::oneshot;

use crate::domain::{Cart, Product, ProductId, Stock, UpdateProductAmount};
use crate::error::{CartError, CatalogError};

/// Generic type aliases for service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// Commands handled by the cart actor. Mutating commands answer with the
/// committed cart.
#[derive(Debug)]
pub enum CartRequest {
    GetCart {
        respond_to: ServiceResponse<Cart, CartError>,
    },
    AddProduct {
        product_id: ProductId,
        respond_to: ServiceResponse<Cart, CartError>,
    },
    RemoveProduct {
        product_id: ProductId,
        respond_to: ServiceResponse<Cart, CartError>,
    },
    UpdateProductAmount {
        update: UpdateProductAmount,
        respond_to: ServiceResponse<Cart, CartError>,
    },
    Shutdown,
}

/// Requests served by the in-memory catalog actor.
#[derive(Debug)]
pub enum CatalogRequest {
    GetProduct {
        id: ProductId,
        respond_to: ServiceResponse<Product, CatalogError>,
    },
    GetStock {
        id: ProductId,
        respond_to: ServiceResponse<Stock, CatalogError>,
    },
    InsertProduct {
        product: Product,
        stock: i64,
        respond_to: ServiceResponse<(), CatalogError>,
    },
    SetStock {
        id: ProductId,
        amount: i64,
        respond_to: ServiceResponse<(), CatalogError>,
    },
    Shutdown,
}
