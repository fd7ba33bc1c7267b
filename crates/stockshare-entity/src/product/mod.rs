//! Product catalog entities.

pub mod model;
pub mod patch;

pub use model::{NewProduct, Product, ProductOrder};
pub use patch::ProductPatch;
