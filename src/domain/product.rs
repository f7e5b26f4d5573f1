use serde::{Deserialize, Serialize};

/// Catalog identifier of a product. Also the key of its cart line-item.
pub type ProductId = u64;

/// Represents a product as served by the remote catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub image: String,
}

impl Product {
    pub fn new(id: ProductId, title: impl Into<String>, price: f64, image: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            price,
            image: image.into(),
        }
    }
}

/// Remaining quantity of a product, authoritative only at query time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    pub amount: i64,
}

impl Stock {
    pub fn new(amount: i64) -> Self {
        Self { amount }
    }

    /// Whether the product can be held at `requested` units.
    ///
    /// The comparison is strict: a request equal to the remaining stock is refused.
    pub fn allows(&self, requested: i64) -> bool {
        self.amount > requested
    }
}
