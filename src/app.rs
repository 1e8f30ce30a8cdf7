use actix_web::web;
use chrono::Duration;
use std::sync::Arc;

use crate::core::traits::Service;
use crate::core::{Result, StoreTimezone};
use crate::middleware::{json_config, path_config, query_config, RateLimiter};
use crate::modules::auth::{AuthService, SessionRepository};
use crate::modules::carts::CartService;
use crate::modules::health::controllers::health_controller::StorageProbe;
use crate::modules::products::{ProductRepository, ProductService};
use crate::modules::reports::ReportService;
use crate::modules::settings::{SettingsRepository, SettingsService};
use crate::modules::transactions::{
    CheckoutCalculator, CheckoutService, HistoryService, TransactionRepository,
};
use crate::modules::users::{UserRepository, UserService};
use crate::modules::{
    auth, carts, health, products, reports, settings, transactions, users,
};
use crate::storage::Storage;

/// Shared services handed to every worker
#[derive(Clone)]
pub struct AppState {
    pub products: web::Data<ProductService>,
    pub carts: web::Data<CartService>,
    pub checkout: web::Data<CheckoutService>,
    pub history: web::Data<HistoryService>,
    pub reports: web::Data<ReportService>,
    pub users: web::Data<UserService>,
    pub settings: web::Data<SettingsService>,
    pub auth: web::Data<AuthService>,
    pub probe: web::Data<StorageProbe>,
    pub login_limiter: RateLimiter,
}

impl AppState {
    pub fn new(
        storage: Arc<dyn Storage>,
        timezone: StoreTimezone,
        session_ttl_hours: u32,
        cart_ttl_minutes: u32,
        login_limiter: RateLimiter,
    ) -> Self {
        let product_repository = ProductRepository::new(storage.clone());
        let transaction_repository = TransactionRepository::new(storage.clone());
        let calculator = CheckoutCalculator::default();

        let carts = Arc::new(CartService::new(
            product_repository.clone(),
            calculator,
            Duration::minutes(i64::from(cart_ttl_minutes)),
        ));
        let settings = Arc::new(SettingsService::new(SettingsRepository::new(storage.clone())));

        let checkout = CheckoutService::new(
            storage.clone(),
            product_repository.clone(),
            transaction_repository.clone(),
            carts.clone(),
            calculator,
        );
        let history = HistoryService::new(transaction_repository.clone(), settings.clone(), timezone);

        Self {
            products: web::Data::new(ProductService::new(product_repository)),
            carts: web::Data::from(carts),
            checkout: web::Data::new(checkout),
            history: web::Data::new(history),
            reports: web::Data::new(ReportService::new(transaction_repository, timezone)),
            users: web::Data::new(UserService::new(UserRepository::new(storage.clone()))),
            settings: web::Data::from(settings),
            auth: web::Data::new(AuthService::new(
                SessionRepository::new(storage.clone()),
                session_ttl_hours,
            )),
            probe: web::Data::new(StorageProbe(storage)),
            login_limiter,
        }
    }

    /// Seed catalog, users and settings on an empty store
    pub async fn initialize(&self) -> Result<()> {
        self.products.initialize().await?;
        self.users.initialize().await?;
        self.settings.initialize().await?;
        Ok(())
    }

    /// Probes at the root, everything else under `/api`
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        let limiter = self.login_limiter.clone();

        cfg.app_data(json_config())
            .app_data(query_config())
            .app_data(path_config())
            .app_data(self.products.clone())
            .app_data(self.carts.clone())
            .app_data(self.checkout.clone())
            .app_data(self.history.clone())
            .app_data(self.reports.clone())
            .app_data(self.users.clone())
            .app_data(self.settings.clone())
            .app_data(self.auth.clone())
            .app_data(self.probe.clone())
            .configure(health::controllers::configure)
            .service(
                web::scope("/api")
                    .configure(move |cfg| auth::controllers::configure(cfg, limiter))
                    .configure(products::controllers::configure)
                    .configure(carts::controllers::configure)
                    .configure(transactions::controllers::configure)
                    .configure(reports::controllers::configure)
                    .configure(users::controllers::configure)
                    .configure(settings::controllers::configure),
            );
    }
}
