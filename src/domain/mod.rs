pub mod product;
pub mod cart;

pub use product::*;
pub use cart::*;
