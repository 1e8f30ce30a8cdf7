use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, ResponseError,
};
use futures_util::future::LocalBoxFuture;
use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter as GovernorRateLimiter,
};
use std::future::{ready, Ready};
use std::num::NonZeroU32;
use std::rc::Rc;
use std::sync::Arc;

use crate::core::AppError;

type DirectLimiter = GovernorRateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Process-wide request budget for the wrapped resource.
///
/// Clones share one limiter, so every worker draws from the same quota.
#[derive(Clone)]
pub struct RateLimiter {
    limiter: Arc<DirectLimiter>,
    requests_per_minute: u32,
}

impl RateLimiter {
    /// Create a new rate limiter with specified requests per minute
    pub fn new(requests_per_minute: u32) -> crate::core::Result<Self> {
        let per_minute = NonZeroU32::new(requests_per_minute).ok_or_else(|| {
            AppError::Configuration("Rate limit must be greater than 0".to_string())
        })?;

        Ok(Self {
            limiter: Arc::new(GovernorRateLimiter::direct(Quota::per_minute(per_minute))),
            requests_per_minute,
        })
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimiter
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<actix_web::body::EitherBody<actix_web::body::BoxBody, B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimiterMiddleware<S>;
    type Future = Ready<std::result::Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimiterMiddleware {
            service: Rc::new(service),
            limiter: self.limiter.clone(),
            requests_per_minute: self.requests_per_minute,
        }))
    }
}

pub struct RateLimiterMiddleware<S> {
    service: Rc<S>,
    limiter: Arc<DirectLimiter>,
    requests_per_minute: u32,
}

impl<S, B> Service<ServiceRequest> for RateLimiterMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<actix_web::body::EitherBody<actix_web::body::BoxBody, B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, std::result::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let svc = self.service.clone();

        if self.limiter.check().is_err() {
            tracing::warn!(path = %req.path(), "Rate limit exceeded");

            let error = AppError::RateLimitExceeded(format!(
                "Maximum {} requests per minute",
                self.requests_per_minute
            ));
            let response = req.into_response(error.error_response()).map_into_left_body();
            return Box::pin(async move { Ok(response) });
        }

        Box::pin(async move { svc.call(req).await.map(|res| res.map_into_right_body()) })
    }
}
