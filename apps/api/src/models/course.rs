use serde::{Deserialize, Serialize};

/// A catalog course as stored and served. `id` is assigned by the store and
/// is unique and monotonically increasing within the catalog file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub price: f64,
    #[serde(rename = "inStock")]
    pub in_stock: bool,
}

/// A course submission. Carries no `id`; any id a caller supplies is
/// dropped at deserialization so the store's assignment always wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseDraft {
    pub name: String,
    pub description: String,
    pub price: f64,
    #[serde(rename = "inStock")]
    pub in_stock: bool,
}

impl CourseDraft {
    /// Promotes the draft to a stored course with the given id.
    pub fn into_course(self, id: u64) -> Course {
        Course {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            in_stock: self.in_stock,
        }
    }
}
