use super::ProductId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Image reference used until an administrator uploads a real one.
pub const PLACEHOLDER_IMAGE: &str = "/images/sample.jpg";

/// A catalog entry with its stock count.
///
/// A price of zero marks an unpriced draft that cannot be bought.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Minor currency units.
    pub price: u64,
    pub count_in_stock: u32,
    pub category: String,
    pub brand: String,
    pub description: String,
    pub image: String,
    pub created_at: DateTime<Utc>,
}

impl Product {
    pub fn is_for_sale(&self) -> bool {
        self.price > 0
    }
}

/// Creation payload. Omitted fields fall back to placeholder values.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductCreate {
    pub name: String,
    pub price: u64,
    pub count_in_stock: u32,
    pub category: String,
    pub brand: String,
    pub description: String,
    pub image: String,
}

impl Default for ProductCreate {
    fn default() -> Self {
        Self {
            name: "New product".to_string(),
            price: 0,
            count_in_stock: 0,
            category: "Category".to_string(),
            brand: "Brand".to_string(),
            description: "Product description...".to_string(),
            image: PLACEHOLDER_IMAGE.to_string(),
        }
    }
}

/// Partial update. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub price: Option<u64>,
    pub count_in_stock: Option<u32>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}
