use actix_web::{web, HttpResponse};

use crate::core::AppError;
use crate::middleware::CurrentUser;
use crate::modules::reports::models::ReportQuery;
use crate::modules::reports::services::ReportService;

/// GET /api/reports/sales?period=day|week|month
/// GET /api/reports/sales?startDate=YYYY-MM-DD&endDate=YYYY-MM-DD
///
/// Totals, average ticket, per-day sales and best sellers for the window.
pub async fn get_sales_report(
    service: web::Data<ReportService>,
    query: web::Query<ReportQuery>,
    _user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    let report = service.sales_report(&query).await?;
    Ok(HttpResponse::Ok().json(report))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/reports").route("/sales", web::get().to(get_sales_report)));
}
