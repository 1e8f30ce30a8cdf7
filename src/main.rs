use actix_cors::Cors;
use actix_web::{http::header, App, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use umkm_pos::config::{Config, LogFormat, ServerConfig};
use umkm_pos::middleware::{RateLimiter, RequestId};
use umkm_pos::AppState;

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("umkm_pos={},actix_web=info", config.app.log_level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    match config.app.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

fn cors(server: &ServerConfig, development: bool) -> Cors {
    match &server.cors_allowed_origin {
        Some(origin) => Cors::default()
            .allowed_origin(origin)
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
            .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE])
            .max_age(3600),
        None if development => Cors::permissive(),
        None => Cors::default(),
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Configuration validation failed")?;

    init_tracing(&config);

    tracing::info!("Starting UMKM POS");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Storage backend: {:?}", config.storage.backend);

    let timezone = config.app.timezone()?;
    let storage = config
        .storage
        .connect()
        .await
        .context("Failed to open storage")?;

    let limiter = RateLimiter::new(config.security.login_rate_limit_per_minute)?;
    let state = AppState::new(
        storage,
        timezone,
        config.security.session_ttl_hours,
        config.app.cart_ttl_minutes,
        limiter,
    );
    state.initialize().await.context("Failed to seed storage")?;

    let bind_address = config.server.bind_address();
    let server_config = config.server.clone();
    let development = config.app.env == "development";

    let server = HttpServer::new(move || {
        let state = state.clone();
        App::new()
            .wrap(cors(&server_config, development))
            .wrap(RequestId)
            .wrap(TracingLogger::default())
            .configure(move |cfg| state.configure(cfg))
    })
    .workers(config.server.workers)
    .bind(&bind_address)?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await?;
    Ok(())
}
