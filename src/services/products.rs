use sqlx::SqlitePool;
use crate::{
    error::Result,
    models::product::Product,
    repositories::product as product_repo,
};

/// Lists all products. No ordering is promised to callers.
pub async fn list_products(db: &SqlitePool) -> Result<Vec<Product>> {
    product_repo::list_products(db).await
}

/// Creates a new product.
///
/// Quantity is stored as given; range checks belong to the caller.
///
/// # Arguments
///
/// * `db` - The database connection pool.
/// * `name` - The product's name.
/// * `quantity` - The initial stock level.
///
/// # Returns
///
/// A `Result` containing the created `Product`.
pub async fn create_product(db: &SqlitePool, name: &str, quantity: i64) -> Result<Product> {
    let product = product_repo::create_product(db, name, quantity).await?;
    tracing::info!("✅ Product created with ID: {}", product.id);
    Ok(product)
}
