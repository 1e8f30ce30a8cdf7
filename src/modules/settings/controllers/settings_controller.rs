use actix_web::{web, HttpResponse};

use crate::core::AppError;
use crate::middleware::CurrentUser;
use crate::modules::settings::models::{AppSettings, ReceiptSettings, StoreSettings};
use crate::modules::settings::services::SettingsService;

pub async fn get_settings(
    service: web::Data<SettingsService>,
    _user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(service.get().await?))
}

pub async fn update_store(
    service: web::Data<SettingsService>,
    body: web::Json<StoreSettings>,
    _user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(service.update_store(body.into_inner()).await?))
}

pub async fn update_receipt(
    service: web::Data<SettingsService>,
    body: web::Json<ReceiptSettings>,
    _user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(service.update_receipt(body.into_inner()).await?))
}

pub async fn update_app(
    service: web::Data<SettingsService>,
    body: web::Json<AppSettings>,
    _user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(service.update_app(body.into_inner()).await?))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/settings")
            .route("", web::get().to(get_settings))
            .route("/store", web::put().to(update_store))
            .route("/receipt", web::put().to(update_receipt))
            .route("/app", web::put().to(update_app)),
    );
}
