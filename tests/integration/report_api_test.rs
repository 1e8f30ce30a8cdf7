// Integration tests for the sales report endpoint

#[path = "../helpers/mod.rs"]
mod helpers;

use actix_web::{http::StatusCode, test, App};
use chrono::{Duration, Utc};
use rust_decimal_macros::dec;
use serde_json::Value;

use helpers::*;
use umkm_pos::core::StoreTimezone;
use umkm_pos::modules::reports::{ReportPeriod, SalesReport};
use umkm_pos::AppState;

async fn sell(state: &AppState, lines: &[(i64, i32)], cash: i64) {
    let cart = state.carts.create().await.unwrap();
    for (product_id, quantity) in lines {
        state.carts.add_item(cart.id, *product_id, *quantity).await.unwrap();
    }
    state
        .checkout
        .checkout(
            cart.id,
            serde_json::from_value(TestDataFactory::checkout_payload(None, cash)).unwrap(),
        )
        .await
        .unwrap();
}

#[actix_web::test]
async fn test_weekly_report_aggregates_sales() {
    let state = test_state().await;
    let token = login_token(&state).await;
    let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

    // 33.000 and 44.000
    sell(&state, &[(KOPI_HITAM, 2)], 50_000).await;
    sell(&state, &[(NASI_GORENG, 1), (KOPI_HITAM, 1)], 50_000).await;

    let req = test::TestRequest::get()
        .uri("/api/reports/sales")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_status(&resp, StatusCode::OK);
    let report: SalesReport = test::read_body_json(resp).await;

    assert_eq!(report.period, ReportPeriod::Week);
    assert_eq!(report.transaction_count, 2);
    assert_eq!(report.total_sales, dec!(77000));
    assert_eq!(report.average_transaction, dec!(38500));

    assert_eq!(report.sales_by_day.len(), 1);
    assert_eq!(report.sales_by_day[0].total, dec!(77000));
    assert_eq!(report.sales_by_day[0].transaction_count, 2);

    assert_eq!(report.top_products[0].name, "Kopi Hitam");
    assert_eq!(report.top_products[0].quantity, 3);
    assert_eq!(report.top_products[0].total, dec!(45000));
    assert_eq!(report.top_products[1].name, "Nasi Goreng");
}

#[actix_web::test]
async fn test_empty_report() {
    let state = test_state().await;
    let token = login_token(&state).await;
    let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

    let req = test::TestRequest::get()
        .uri("/api/reports/sales?period=month")
        .insert_header(bearer(&token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["period"], "month");
    assert_eq!(body["transactionCount"], 0);
    assert_eq!(money(&body["totalSales"]), dec!(0));
    assert_eq!(money(&body["averageTransaction"]), dec!(0));
    assert_eq!(body["topProducts"].as_array().map(Vec::len), Some(0));
}

#[actix_web::test]
async fn test_custom_range_includes_today() {
    let state = test_state().await;
    let token = login_token(&state).await;
    let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

    sell(&state, &[(TEH_TARIK, 1)], 20_000).await;

    let today = StoreTimezone::wib().local_date(Utc::now());
    let req = test::TestRequest::get()
        .uri(&format!(
            "/api/reports/sales?startDate={}&endDate={}",
            today - Duration::days(2),
            today
        ))
        .insert_header(bearer(&token))
        .to_request();
    let report: SalesReport = test::call_and_read_body_json(&app, req).await;

    assert_eq!(report.period, ReportPeriod::Custom);
    assert_eq!(report.transaction_count, 1);
    assert_eq!(report.total_sales, dec!(16500));
}

#[actix_web::test]
async fn test_invalid_custom_ranges() {
    let state = test_state().await;
    let token = login_token(&state).await;
    let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;
    let today = StoreTimezone::wib().local_date(Utc::now());

    let cases = [
        // End before start
        format!(
            "/api/reports/sales?startDate={}&endDate={}",
            today,
            today - Duration::days(1)
        ),
        // End in the future
        format!(
            "/api/reports/sales?startDate={}&endDate={}",
            today,
            today + Duration::days(1)
        ),
        // Custom period without dates
        "/api/reports/sales?period=custom".to_string(),
        // Unparseable date goes through the query error handler
        "/api/reports/sales?startDate=kemarin&endDate=hari-ini".to_string(),
    ];

    for uri in cases {
        let req = test::TestRequest::get()
            .uri(&uri)
            .insert_header(bearer(&token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_status(&resp, StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_error_body(&body, 400);
    }
}
