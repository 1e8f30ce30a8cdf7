use actix_web::{web, HttpResponse};

use crate::core::AppError;
use crate::middleware::CurrentUser;
use crate::modules::products::models::ProductInput;
use crate::modules::products::services::{ProductFilter, ProductQuery, ProductService};

/// GET /api/products?search=&category=
pub async fn list_products(
    service: web::Data<ProductService>,
    query: web::Query<ProductQuery>,
    _user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    let filter = ProductFilter::from_query(&query)?;
    let products = service.list(&filter).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "products": products,
        "total": products.len(),
    })))
}

/// GET /api/products/{id}
pub async fn get_product(
    service: web::Data<ProductService>,
    id: web::Path<i64>,
    _user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    let product = service.get(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(product))
}

/// POST /api/products
pub async fn create_product(
    service: web::Data<ProductService>,
    body: web::Json<ProductInput>,
    _user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    let product = service.create(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(product))
}

/// PUT /api/products/{id}
pub async fn update_product(
    service: web::Data<ProductService>,
    id: web::Path<i64>,
    body: web::Json<ProductInput>,
    _user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    let product = service.update(id.into_inner(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(product))
}

/// DELETE /api/products/{id}
pub async fn delete_product(
    service: web::Data<ProductService>,
    id: web::Path<i64>,
    _user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    service.delete(id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/products")
            .route("", web::get().to(list_products))
            .route("", web::post().to(create_product))
            .route("/{id}", web::get().to(get_product))
            .route("/{id}", web::put().to(update_product))
            .route("/{id}", web::delete().to(delete_product)),
    );
}
