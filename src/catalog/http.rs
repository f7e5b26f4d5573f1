use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use super::{ProductCatalog, StockService};
use crate::domain::{Product, ProductId, Stock};
use crate::error::CatalogError;

/// Catalog backed by the storefront HTTP API.
#[derive(Clone)]
pub struct HttpCatalog {
    http: Client,
    base_url: String,
}

impl HttpCatalog {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, CatalogError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    fn endpoint(&self, resource: &str, id: ProductId) -> String {
        format!("{}/{resource}/{id}", self.base_url.trim_end_matches('/'))
    }

    async fn fetch<T: DeserializeOwned>(&self, resource: &str, id: ProductId) -> Result<T, CatalogError> {
        let url = self.endpoint(resource, id);
        debug!(url = %url, "Sending request");
        let response = self.http.get(url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(id));
        }

        Ok(response.error_for_status()?.json().await?)
    }
}

#[async_trait]
impl ProductCatalog for HttpCatalog {
    #[instrument(skip(self))]
    async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.fetch("products", id).await
    }
}

#[async_trait]
impl StockService for HttpCatalog {
    #[instrument(skip(self))]
    async fn get_stock(&self, id: ProductId) -> Result<Stock, CatalogError> {
        self.fetch("stock", id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode as ServerStatus, routing::get, Json, Router};
    use serde_json::json;
    use tokio::net::TcpListener;

    async fn spawn_catalog_server() -> String {
        std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let app = Router::new()
            .route(
                "/products/1",
                get(|| async { Json(json!({"id": 1, "title": "Shoe", "price": 100.0, "image": "shoe.png"})) }),
            )
            .route("/stock/1", get(|| async { Json(json!({"id": 1, "amount": 3})) }))
            .route("/stock/2", get(|| async { ServerStatus::INTERNAL_SERVER_ERROR }));
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        format!("http://{addr}")
    }

    #[test]
    fn endpoints_use_fixed_resource_paths() {
        let catalog = HttpCatalog::new("http://localhost:3333/", Duration::from_secs(1)).unwrap();
        assert_eq!(catalog.endpoint("products", 7), "http://localhost:3333/products/7");
        assert_eq!(catalog.endpoint("stock", 7), "http://localhost:3333/stock/7");
    }

    #[tokio::test]
    async fn unreachable_server_is_a_catalog_error() {
        let catalog = HttpCatalog::new("http://127.0.0.1:9", Duration::from_millis(200)).unwrap();
        let result = catalog.get_stock(1).await;
        assert!(matches!(result, Err(CatalogError::Http(_))));
    }

    #[tokio::test]
    async fn decodes_product_and_stock_bodies() {
        let catalog = HttpCatalog::new(spawn_catalog_server().await, Duration::from_secs(2)).unwrap();

        let product = catalog.get_product(1).await.unwrap();
        assert_eq!(product, Product::new(1, "Shoe", 100.0, "shoe.png"));

        let stock = catalog.get_stock(1).await.unwrap();
        assert_eq!(stock, Stock::new(3));
    }

    #[tokio::test]
    async fn missing_resource_is_not_found() {
        let catalog = HttpCatalog::new(spawn_catalog_server().await, Duration::from_secs(2)).unwrap();

        assert!(matches!(catalog.get_product(9).await, Err(CatalogError::NotFound(9))));
        assert!(matches!(catalog.get_stock(9).await, Err(CatalogError::NotFound(9))));
    }

    #[tokio::test]
    async fn server_error_status_is_an_http_error() {
        let catalog = HttpCatalog::new(spawn_catalog_server().await, Duration::from_secs(2)).unwrap();

        match catalog.get_stock(2).await {
            Err(CatalogError::Http(e)) => assert_eq!(e.status(), Some(StatusCode::INTERNAL_SERVER_ERROR)),
            other => panic!("expected an HTTP error, got {other:?}"),
        }
    }
}
