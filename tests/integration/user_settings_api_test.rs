// Integration tests for user management and store settings

#[path = "../helpers/mod.rs"]
mod helpers;

use actix_web::{http::StatusCode, test, App};
use rust_decimal_macros::dec;
use serde_json::{json, Value};

use helpers::*;
use umkm_pos::core::Currency;
use umkm_pos::modules::settings::{Settings, Theme};
use umkm_pos::modules::users::{UserResponse, UserRole};

#[actix_web::test]
async fn test_list_and_search_users() {
    let state = test_state().await;
    let token = login_token(&state).await;
    let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

    let req = test::TestRequest::get()
        .uri("/api/users")
        .insert_header(bearer(&token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let users = body["users"].as_array().expect("users array");
    assert_eq!(users.len(), 3);
    assert!(users.iter().all(|u| u.get("passwordHash").is_none()));

    let req = test::TestRequest::get()
        .uri("/api/users?search=kasir")
        .insert_header(bearer(&token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["users"].as_array().map(Vec::len), Some(2));
}

#[actix_web::test]
async fn test_user_lifecycle() {
    let state = test_state().await;
    let token = login_token(&state).await;
    let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;
    let username = TestDataFactory::random_username();

    let req = test::TestRequest::post()
        .uri("/api/users")
        .insert_header(bearer(&token))
        .set_json(TestDataFactory::user_payload("Rina", &username, "kasir", Some("rahasia1")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_status(&resp, StatusCode::CREATED);
    let created: UserResponse = test::read_body_json(resp).await;
    assert_eq!(created.username, username);
    assert_eq!(created.role, UserRole::Kasir);

    let hash = state.users.password_hash(created.id).await.unwrap();
    assert!(hash.as_deref().is_some_and(|h| h.starts_with("$argon2")));

    // Blank password keeps the stored hash
    let req = test::TestRequest::put()
        .uri(&format!("/api/users/{}", created.id))
        .insert_header(bearer(&token))
        .set_json(TestDataFactory::user_payload("Rina Wati", &username, "admin", Some("")))
        .to_request();
    let updated: UserResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated.name, "Rina Wati");
    assert_eq!(updated.role, UserRole::Admin);
    assert_eq!(state.users.password_hash(created.id).await.unwrap(), hash);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/users/{}", created.id))
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_status(&resp, StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri(&format!("/api/users/{}", created.id))
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_status(&resp, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_user_validation_and_conflicts() {
    let state = test_state().await;
    let token = login_token(&state).await;
    let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

    // Duplicate username
    let req = test::TestRequest::post()
        .uri("/api/users")
        .insert_header(bearer(&token))
        .set_json(TestDataFactory::user_payload("Budi Lain", "budi", "kasir", Some("rahasia1")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_status(&resp, StatusCode::CONFLICT);

    // Password required on create
    let req = test::TestRequest::post()
        .uri("/api/users")
        .insert_header(bearer(&token))
        .set_json(TestDataFactory::user_payload("Dewi", "dewi", "kasir", None))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_status(&resp, StatusCode::BAD_REQUEST);

    // Unknown role
    let req = test::TestRequest::post()
        .uri("/api/users")
        .insert_header(bearer(&token))
        .set_json(TestDataFactory::user_payload("Dewi", "dewi", "manager", Some("rahasia1")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_status(&resp, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_main_admin_is_protected() {
    let state = test_state().await;
    let token = login_token(&state).await;
    let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

    let req = test::TestRequest::delete()
        .uri("/api/users/1")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_status(&resp, StatusCode::BAD_REQUEST);

    let req = test::TestRequest::put()
        .uri("/api/users/1")
        .insert_header(bearer(&token))
        .set_json(TestDataFactory::user_payload("Admin", "admin", "kasir", None))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_status(&resp, StatusCode::BAD_REQUEST);

    // Renaming the display name is allowed
    let req = test::TestRequest::put()
        .uri("/api/users/1")
        .insert_header(bearer(&token))
        .set_json(TestDataFactory::user_payload("Pemilik Toko", "admin", "admin", None))
        .to_request();
    let updated: UserResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated.name, "Pemilik Toko");
}

#[actix_web::test]
async fn test_settings_defaults_and_updates() {
    let state = test_state().await;
    let token = login_token(&state).await;
    let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

    let req = test::TestRequest::get()
        .uri("/api/settings")
        .insert_header(bearer(&token))
        .to_request();
    let settings: Settings = test::call_and_read_body_json(&app, req).await;
    assert_eq!(settings, Settings::default());

    let req = test::TestRequest::put()
        .uri("/api/settings/store")
        .insert_header(bearer(&token))
        .set_json(json!({
            "name": "Warung Bu Sri",
            "address": "Jl. Melati 5, Bandung",
            "phone": "022-123456",
            "email": "sri@warung.id",
        }))
        .to_request();
    let settings: Settings = test::call_and_read_body_json(&app, req).await;
    assert_eq!(settings.store.name, "Warung Bu Sri");

    let req = test::TestRequest::put()
        .uri("/api/settings/receipt")
        .insert_header(bearer(&token))
        .set_json(json!({
            "header": "Selamat Datang",
            "footer": "Sampai jumpa",
            "showLogo": false,
        }))
        .to_request();
    let settings: Settings = test::call_and_read_body_json(&app, req).await;
    assert!(!settings.receipt.show_logo);
    assert!(settings.receipt.show_tax_details);

    let req = test::TestRequest::put()
        .uri("/api/settings/app")
        .insert_header(bearer(&token))
        .set_json(json!({ "defaultTax": 11, "currency": "IDR", "theme": "dark" }))
        .to_request();
    let settings: Settings = test::call_and_read_body_json(&app, req).await;
    assert_eq!(settings.app.default_tax, dec!(11));
    assert_eq!(settings.app.currency, Currency::IDR);
    assert_eq!(settings.app.theme, Theme::Dark);

    // Store section survived the later updates
    let stored = state.settings.get().await.unwrap();
    assert_eq!(stored.store.name, "Warung Bu Sri");
    assert_eq!(stored.receipt.header, "Selamat Datang");
}

#[actix_web::test]
async fn test_invalid_settings_are_rejected() {
    let state = test_state().await;
    let token = login_token(&state).await;
    let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

    let req = test::TestRequest::put()
        .uri("/api/settings/store")
        .insert_header(bearer(&token))
        .set_json(json!({
            "name": "Warung",
            "address": "Jl. Melati 5",
            "phone": "022-123456",
            "email": "bukan-email",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_status(&resp, StatusCode::BAD_REQUEST);

    let req = test::TestRequest::put()
        .uri("/api/settings/app")
        .insert_header(bearer(&token))
        .set_json(json!({ "defaultTax": 150, "currency": "IDR", "theme": "light" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_status(&resp, StatusCode::BAD_REQUEST);

    assert_eq!(state.settings.get().await.unwrap(), Settings::default());
}
