use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::core::AppError;
use crate::middleware::CurrentUser;
use crate::modules::carts::services::CartService;
use crate::modules::transactions::models::{CheckoutRequest, QuoteRequest};
use crate::modules::transactions::services::CheckoutService;

fn default_quantity() -> i32 {
    1
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    pub product_id: i64,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    pub quantity: i32,
}

/// POST /api/carts
pub async fn create_cart(
    carts: web::Data<CartService>,
    _user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    let cart = carts.create().await?;
    Ok(HttpResponse::Created().json(cart))
}

/// GET /api/carts/{id}
pub async fn get_cart(
    carts: web::Data<CartService>,
    id: web::Path<Uuid>,
    _user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(carts.get(id.into_inner()).await?))
}

/// DELETE /api/carts/{id} - cancel the checkout
pub async fn delete_cart(
    carts: web::Data<CartService>,
    id: web::Path<Uuid>,
    _user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    carts.delete(id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// POST /api/carts/{id}/items
pub async fn add_item(
    carts: web::Data<CartService>,
    id: web::Path<Uuid>,
    body: web::Json<AddItemRequest>,
    _user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    let cart = carts
        .add_item(id.into_inner(), body.product_id, body.quantity)
        .await?;
    Ok(HttpResponse::Ok().json(cart))
}

/// PUT /api/carts/{id}/items/{productId}
pub async fn update_item(
    carts: web::Data<CartService>,
    path: web::Path<(Uuid, i64)>,
    body: web::Json<UpdateItemRequest>,
    _user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    let (id, product_id) = path.into_inner();
    let cart = carts.update_item(id, product_id, body.quantity).await?;
    Ok(HttpResponse::Ok().json(cart))
}

/// DELETE /api/carts/{id}/items/{productId}
pub async fn remove_item(
    carts: web::Data<CartService>,
    path: web::Path<(Uuid, i64)>,
    _user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    let (id, product_id) = path.into_inner();
    Ok(HttpResponse::Ok().json(carts.remove_item(id, product_id).await?))
}

/// DELETE /api/carts/{id}/items
pub async fn clear_cart(
    carts: web::Data<CartService>,
    id: web::Path<Uuid>,
    _user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(carts.clear(id.into_inner()).await?))
}

/// POST /api/carts/{id}/quote
pub async fn quote(
    checkout: web::Data<CheckoutService>,
    id: web::Path<Uuid>,
    body: Option<web::Json<QuoteRequest>>,
    _user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    let request = body.map(web::Json::into_inner).unwrap_or_default();
    let quote = checkout.quote(id.into_inner(), &request).await?;
    Ok(HttpResponse::Ok().json(quote))
}

/// POST /api/carts/{id}/checkout
pub async fn checkout(
    checkout: web::Data<CheckoutService>,
    id: web::Path<Uuid>,
    body: web::Json<CheckoutRequest>,
    user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    let cart_id = id.into_inner();
    tracing::debug!(cart_id = %cart_id, cashier = %user.username(), "Checkout requested");

    let transaction = checkout.checkout(cart_id, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(transaction))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/carts")
            .route("", web::post().to(create_cart))
            .route("/{id}", web::get().to(get_cart))
            .route("/{id}", web::delete().to(delete_cart))
            .route("/{id}/items", web::post().to(add_item))
            .route("/{id}/items", web::delete().to(clear_cart))
            .route("/{id}/items/{product_id}", web::put().to(update_item))
            .route("/{id}/items/{product_id}", web::delete().to(remove_item))
            .route("/{id}/quote", web::post().to(quote))
            .route("/{id}/checkout", web::post().to(checkout)),
    );
}
