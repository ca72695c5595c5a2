use axum::{extract::State, http::StatusCode, response::Response, Json};
use garde::Validate;
use serde::Deserialize;

use crate::{
    error::Result,
    response,
    services::products as product_service,
    state::AppState,
};

/// The request payload for creating a product.
#[derive(Deserialize, Validate)]
pub struct CreateProductRequest {
    #[garde(length(min = 1, max = 255))]
    pub name: String,
    #[serde(default)]
    #[garde(range(min = 0))]
    pub quantity: i64,
}

/// Lists every product as `[{id, name, quantity}]`.
#[axum::debug_handler]
pub async fn list_products(State(state): State<AppState>) -> Result<Response> {
    let products = product_service::list_products(&state.db).await?;
    tracing::debug!("Listing {} products", products.len());
    response::json(StatusCode::OK, &products)
}

/// Creates a product and returns it with `201 Created`.
#[axum::debug_handler]
pub async fn create_product(
    State(state): State<AppState>,
    Json(req): Json<CreateProductRequest>,
) -> Result<Response> {
    req.validate()?;

    let product = product_service::create_product(&state.db, &req.name, req.quantity).await?;

    response::json(StatusCode::CREATED, &product)
}
