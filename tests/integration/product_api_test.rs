// Integration tests for the catalog API
//
// Covers listing with search and category filters, and the create,
// update and delete lifecycle of a product.

#[path = "../helpers/mod.rs"]
mod helpers;

use actix_web::{http::StatusCode, test, App};
use rust_decimal_macros::dec;
use serde_json::Value;

use helpers::*;
use umkm_pos::modules::products::{Product, ProductCategory};

fn names(body: &Value) -> Vec<String> {
    body["products"]
        .as_array()
        .expect("products array")
        .iter()
        .map(|p| p["name"].as_str().unwrap_or_default().to_string())
        .collect()
}

#[actix_web::test]
async fn test_list_seeded_catalog() {
    let state = test_state().await;
    let token = login_token(&state).await;
    let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

    let req = test::TestRequest::get()
        .uri("/api/products")
        .insert_header(bearer(&token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["total"], 6);
    assert_eq!(
        names(&body),
        vec!["Kopi Hitam", "Kopi Latte", "Teh Tarik", "Roti Bakar", "Nasi Goreng", "Mie Goreng"]
    );
    assert_eq!(money(&body["products"][0]["price"]), dec!(15000));
}

#[actix_web::test]
async fn test_search_and_category_filters() {
    let state = test_state().await;
    let token = login_token(&state).await;
    let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

    let req = test::TestRequest::get()
        .uri("/api/products?search=goreng")
        .insert_header(bearer(&token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(names(&body), vec!["Nasi Goreng", "Mie Goreng"]);

    let req = test::TestRequest::get()
        .uri("/api/products?category=Minuman&search=kopi")
        .insert_header(bearer(&token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(names(&body), vec!["Kopi Hitam", "Kopi Latte"]);

    let req = test::TestRequest::get()
        .uri("/api/products?category=Semua")
        .insert_header(bearer(&token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["total"], 6);

    let req = test::TestRequest::get()
        .uri("/api/products?category=Minuman")
        .insert_header(bearer(&token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["total"], 3);
}

#[actix_web::test]
async fn test_unknown_category_is_rejected() {
    let state = test_state().await;
    let token = login_token(&state).await;
    let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

    let req = test::TestRequest::get()
        .uri("/api/products?category=Elektronik")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_status(&resp, StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_error_body(&body, 400);
}

#[actix_web::test]
async fn test_product_lifecycle() {
    let state = test_state().await;
    let token = login_token(&state).await;
    let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/api/products")
        .insert_header(bearer(&token))
        .set_json(TestDataFactory::product_payload("Keripik Singkong", 8000, 30, "Snack"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_status(&resp, StatusCode::CREATED);
    let created: Product = test::read_body_json(resp).await;
    assert!(created.id > 6);
    assert_eq!(created.category, ProductCategory::Snack);
    assert_eq!(created.price, dec!(8000));

    let req = test::TestRequest::put()
        .uri(&format!("/api/products/{}", created.id))
        .insert_header(bearer(&token))
        .set_json(TestDataFactory::product_payload("Keripik Singkong", 9000, 25, "Snack"))
        .to_request();
    let updated: Product = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.price, dec!(9000));
    assert_eq!(updated.stock, 25);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/products/{}", created.id))
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_status(&resp, StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri(&format!("/api/products/{}", created.id))
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_status(&resp, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_invalid_product_payloads() {
    let state = test_state().await;
    let token = login_token(&state).await;
    let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

    // Zero price
    let req = test::TestRequest::post()
        .uri("/api/products")
        .insert_header(bearer(&token))
        .set_json(TestDataFactory::product_payload("Es Teh", 0, 10, "Minuman"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_status(&resp, StatusCode::BAD_REQUEST);

    // Malformed JSON body goes through the JSON error handler
    let req = test::TestRequest::post()
        .uri("/api/products")
        .insert_header(bearer(&token))
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"name\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_status(&resp, StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_error_body(&body, 400);

    // Non-numeric id goes through the path error handler
    let req = test::TestRequest::get()
        .uri("/api/products/abc")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_status(&resp, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_update_missing_product_is_not_found() {
    let state = test_state().await;
    let token = login_token(&state).await;
    let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

    let req = test::TestRequest::put()
        .uri("/api/products/999")
        .insert_header(bearer(&token))
        .set_json(TestDataFactory::product_payload("Es Teh", 5000, 10, "Minuman"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_status(&resp, StatusCode::NOT_FOUND);
}
