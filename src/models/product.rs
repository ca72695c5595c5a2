use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents an inventory record.
#[derive(FromRow, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Product {
    /// The unique identifier for the product.
    pub id: i64,
    /// The product's name.
    pub name: String,
    /// The number of units in stock.
    pub quantity: i64,
}
