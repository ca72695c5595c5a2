use sqlx::SqlitePool;
use crate::{error::Result, models::product::Product};

/// Lists every product.
pub async fn list_products(pool: &SqlitePool) -> Result<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>(
        r#"
        SELECT id, name, quantity
        FROM products
        ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(products)
}

/// Inserts a product and returns the stored row.
pub async fn create_product(pool: &SqlitePool, name: &str, quantity: i64) -> Result<Product> {
    let product = sqlx::query_as::<_, Product>(
        r#"
        INSERT INTO products (name, quantity)
        VALUES (?, ?)
        RETURNING id, name, quantity
        "#,
    )
    .bind(name)
    .bind(quantity)
    .fetch_one(pool)
    .await?;

    Ok(product)
}
