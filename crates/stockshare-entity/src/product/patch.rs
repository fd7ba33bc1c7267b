//! Sparse product updates.

/// Fields to change on an existing product. `None` leaves a field as is.
///
/// `image_url` is doubly optional: `Some(None)` clears the image.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub stock: Option<i32>,
    pub unit: Option<String>,
    pub reorder_point: Option<i32>,
    pub price: Option<f64>,
    pub image_url: Option<Option<String>>,
}

impl ProductPatch {
    /// True when the patch would not change anything.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.stock.is_none()
            && self.unit.is_none()
            && self.reorder_point.is_none()
            && self.price.is_none()
            && self.image_url.is_none()
    }
}
