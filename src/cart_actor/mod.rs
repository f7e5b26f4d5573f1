//! The cart actor: owns the cart, validates against stock and persists on commit.

mod service;

pub use service::*;
