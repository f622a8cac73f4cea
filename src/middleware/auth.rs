use crate::core::{AppError, Result as AppResult};
use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, ResponseError,
};
use argon2::{Argon2, PasswordHash, PasswordVerifier};
use futures_util::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;
use tracing::warn;

pub const API_KEY_HEADER: &str = "X-API-Key";

/// API key authentication for operator routes.
///
/// Requests must carry an `X-API-Key` header matching the configured Argon2 hash.
#[derive(Clone)]
pub struct ApiKeyAuth {
    key_hash: Arc<str>,
}

impl ApiKeyAuth {
    /// Fails when the hash is not a PHC string
    pub fn new(key_hash: &str) -> AppResult<Self> {
        PasswordHash::new(key_hash)
            .map_err(|e| AppError::configuration(format!("Invalid API key hash: {}", e)))?;
        Ok(Self {
            key_hash: Arc::from(key_hash),
        })
    }
}

impl<S, B> Transform<S, ServiceRequest> for ApiKeyAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = ApiKeyAuthMiddleware<S>;
    type Future = Ready<std::result::Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ApiKeyAuthMiddleware {
            service: Rc::new(service),
            key_hash: self.key_hash.clone(),
        }))
    }
}

pub struct ApiKeyAuthMiddleware<S> {
    service: Rc<S>,
    key_hash: Arc<str>,
}

impl<S, B> Service<ServiceRequest> for ApiKeyAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, std::result::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let svc = self.service.clone();
        let key_hash = self.key_hash.clone();

        Box::pin(async move {
            if let Err(e) = check_api_key(&req, &key_hash) {
                warn!(path = %req.path(), error = %e, "Rejected unauthenticated request");
                let response = e.error_response();
                return Ok(req.into_response(response).map_into_right_body());
            }

            svc.call(req).await.map(ServiceResponse::map_into_left_body)
        })
    }
}

fn check_api_key(req: &ServiceRequest, key_hash: &str) -> AppResult<()> {
    let api_key = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::unauthorized("Missing X-API-Key header"))?;

    if !verify_api_key(api_key, key_hash)? {
        return Err(AppError::unauthorized("Invalid API key"));
    }
    Ok(())
}

/// Argon2 PHC hash of an API key, for `API_KEY_HASH`
pub fn hash_api_key(api_key: &str) -> AppResult<String> {
    use argon2::password_hash::{rand_core::OsRng, PasswordHasher, SaltString};

    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(api_key.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::internal(format!("Failed to hash API key: {}", e)))
}

pub fn verify_api_key(api_key: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::internal(format!("Invalid hash format: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(api_key.as_bytes(), &parsed_hash)
        .is_ok())
}
