use actix_web::{web, HttpResponse};

use crate::core::AppError;
use crate::middleware::CurrentUser;
use crate::modules::users::models::{UserInput, UserQuery};
use crate::modules::users::services::UserService;

/// GET /api/users?search=
pub async fn list_users(
    service: web::Data<UserService>,
    query: web::Query<UserQuery>,
    _user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    let users = service.list(&query).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "users": users })))
}

pub async fn get_user(
    service: web::Data<UserService>,
    id: web::Path<i64>,
    _user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(service.get(id.into_inner()).await?))
}

pub async fn create_user(
    service: web::Data<UserService>,
    body: web::Json<UserInput>,
    _user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    let user = service.create(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(user))
}

pub async fn update_user(
    service: web::Data<UserService>,
    id: web::Path<i64>,
    body: web::Json<UserInput>,
    _user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    let user = service.update(id.into_inner(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(user))
}

pub async fn delete_user(
    service: web::Data<UserService>,
    id: web::Path<i64>,
    _user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    service.delete(id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .route("", web::get().to(list_users))
            .route("", web::post().to(create_user))
            .route("/{id}", web::get().to(get_user))
            .route("/{id}", web::put().to(update_user))
            .route("/{id}", web::delete().to(delete_user)),
    );
}
