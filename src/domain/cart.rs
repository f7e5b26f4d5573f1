use serde::{Deserialize, Deserializer, Serialize};

use super::product::{Product, ProductId};
use crate::error::StorageError;

/// A product held in the cart together with its quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineItem {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub image: String,
    pub amount: u32,
}

impl CartLineItem {
    /// Creates a line-item for a product first added to the cart.
    pub fn from_product(product: Product) -> Self {
        Self {
            id: product.id,
            title: product.title,
            price: product.price,
            image: product.image,
            amount: 1,
        }
    }

    pub fn subtotal(&self) -> f64 {
        self.price * f64::from(self.amount)
    }
}

/// Payload for changing the quantity of a line-item.
///
/// `amount` is signed because callers may ask for zero or negative quantities,
/// which the cart ignores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateProductAmount {
    pub product_id: ProductId,
    pub amount: i64,
}

impl UpdateProductAmount {
    pub fn new(product_id: ProductId, amount: i64) -> Self {
        Self { product_id, amount }
    }
}

/// Ordered line-items, at most one per product id, in order of first add.
///
/// Every transition (`with_*`, `without`) returns a new cart and leaves `self`
/// untouched, so a failed operation never has anything to roll back.
/// Deserializing goes through the same checks as [`Cart::from_json`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CartLineItem> {
        self.items.iter()
    }

    /// Number of distinct products in the cart.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.amount)).sum()
    }

    pub fn total(&self) -> f64 {
        self.items.iter().map(CartLineItem::subtotal).sum()
    }

    fn position(&self, id: ProductId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// Appends `product` with a quantity of one. `None` if it is already in the cart.
    pub fn with_product(&self, product: Product) -> Option<Cart> {
        if self.contains(product.id) {
            return None;
        }
        let mut updated = self.clone();
        updated.items.push(CartLineItem::from_product(product));
        Some(updated)
    }

    /// Adds one unit to an existing line-item.
    pub fn with_incremented(&self, id: ProductId) -> Option<Cart> {
        let index = self.position(id)?;
        let mut updated = self.clone();
        let item = &mut updated.items[index];
        item.amount = item.amount.checked_add(1)?;
        Some(updated)
    }

    /// Sets the quantity of an existing line-item. Zero is refused.
    pub fn with_amount(&self, id: ProductId, amount: u32) -> Option<Cart> {
        if amount == 0 {
            return None;
        }
        let index = self.position(id)?;
        let mut updated = self.clone();
        updated.items[index].amount = amount;
        Some(updated)
    }

    pub fn without(&self, id: ProductId) -> Option<Cart> {
        let index = self.position(id)?;
        let mut updated = self.clone();
        updated.items.remove(index);
        Some(updated)
    }

    pub fn to_json(&self) -> Result<String, StorageError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decodes a persisted cart, rejecting blobs that break the cart invariants.
    pub fn from_json(raw: &str) -> Result<Cart, StorageError> {
        let items: Vec<CartLineItem> = serde_json::from_str(raw)?;
        Cart::try_from(items)
    }
}

impl TryFrom<Vec<CartLineItem>> for Cart {
    type Error = StorageError;

    fn try_from(items: Vec<CartLineItem>) -> Result<Self, Self::Error> {
        for (index, item) in items.iter().enumerate() {
            if item.amount == 0 {
                return Err(StorageError::Corrupt(format!("product {} has a zero amount", item.id)));
            }
            if items[..index].iter().any(|earlier| earlier.id == item.id) {
                return Err(StorageError::Corrupt(format!("product {} appears twice", item.id)));
            }
        }
        Ok(Cart { items })
    }
}

impl<'de> Deserialize<'de> for Cart {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let items = Vec::<CartLineItem>::deserialize(deserializer)?;
        Cart::try_from(items).map_err(serde::de::Error::custom)
    }
}

impl FromIterator<CartLineItem> for Cart {
    fn from_iter<I: IntoIterator<Item = CartLineItem>>(iter: I) -> Self {
        let mut cart = Cart::new();
        for item in iter {
            if !cart.contains(item.id) {
                cart.items.push(item);
            }
        }
        cart
    }
}
