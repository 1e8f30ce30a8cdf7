use actix_web::{http::header::ContentType, web, HttpResponse};

use crate::core::AppError;
use crate::middleware::CurrentUser;
use crate::modules::transactions::services::{HistoryQuery, HistoryService, TransactionFilter};

/// GET /api/transactions?search=&date=YYYY-MM-DD&range=all|today|week|month&page=
pub async fn list_transactions(
    history: web::Data<HistoryService>,
    query: web::Query<HistoryQuery>,
    _user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    let filter = TransactionFilter::from_query(&query);
    let page = history.list(&filter, query.page.unwrap_or(1)).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// GET /api/transactions/{id}
pub async fn get_transaction(
    history: web::Data<HistoryService>,
    id: web::Path<i64>,
    _user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(history.get(id.into_inner()).await?))
}

/// GET /api/transactions/{id}/receipt
pub async fn get_receipt(
    history: web::Data<HistoryService>,
    id: web::Path<i64>,
    _user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    let receipt = history.receipt(id.into_inner()).await?;
    Ok(HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body(receipt))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/transactions")
            .route("", web::get().to(list_transactions))
            .route("/{id}", web::get().to(get_transaction))
            .route("/{id}/receipt", web::get().to(get_receipt)),
    );
}
