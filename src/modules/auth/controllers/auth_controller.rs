use actix_web::{web, HttpResponse};

use crate::core::AppError;
use crate::middleware::{CurrentUser, RateLimiter};
use crate::modules::auth::models::{LoginRequest, SessionUser};
use crate::modules::auth::services::AuthService;

/// POST /api/auth/login
pub async fn login(
    service: web::Data<AuthService>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let response = service.login(body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// POST /api/auth/logout
pub async fn logout(
    service: web::Data<AuthService>,
    user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    service.logout(user.session()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// GET /api/auth/me
pub async fn me(user: CurrentUser) -> Result<HttpResponse, AppError> {
    let session = user.session();
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "user": SessionUser {
            username: session.username.clone(),
            role: session.role,
        },
        "expiresAt": session.expires_at,
    })))
}

/// Auth routes; only login is rate limited
pub fn configure(cfg: &mut web::ServiceConfig, limiter: RateLimiter) {
    cfg.service(
        web::scope("/auth")
            .service(
                web::resource("/login")
                    .wrap(limiter)
                    .route(web::post().to(login)),
            )
            .route("/logout", web::post().to(logout))
            .route("/me", web::get().to(me)),
    );
}
