use actix_web::dev::Payload;
use actix_web::{http::header, web, FromRequest, HttpRequest};

use crate::auth::jwt::verify_access_token;
use crate::auth::{Claims, TokenClass};
use crate::error::AppError;
use crate::logging::security;
use crate::state::app_state::AppState;

/// Raw token taken from an `Authorization: Bearer <token>` header
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

impl BearerToken {
    fn parse(req: &HttpRequest) -> Result<Self, AppError> {
        let auth_value = req
            .headers()
            .get(header::AUTHORIZATION)
            .ok_or_else(AppError::unauthorized_missing_bearer)?
            .to_str()
            .map_err(|_| AppError::unauthorized_missing_bearer())?;

        // Parse "Bearer <token>" format
        let parts: Vec<&str> = auth_value.split_whitespace().collect();
        if parts.len() != 2 || parts[0] != "Bearer" || parts[1].is_empty() {
            return Err(AppError::unauthorized_missing_bearer());
        }

        Ok(BearerToken(parts[1].to_string()))
    }
}

impl FromRequest for BearerToken {
    type Error = AppError;
    type Future = std::future::Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        std::future::ready(BearerToken::parse(req))
    }
}

/// Verified claims of the access token presented with the request
#[derive(Debug, Clone)]
pub struct AccessClaims(pub Claims);

impl AccessClaims {
    pub fn subject(&self) -> &str {
        self.0.subject()
    }

    pub fn role(&self) -> Option<&str> {
        self.0.role()
    }

    fn extract(req: &HttpRequest) -> Result<Self, AppError> {
        let token = BearerToken::parse(req)?;

        let app_state = req
            .app_data::<web::Data<AppState>>()
            .ok_or_else(|| AppError::internal("AppState not found"))?;

        verify_access_token(&token.0, app_state.clock.now(), &app_state.signer)
            .map(AccessClaims)
            .map_err(|e| {
                security::token_rejected(TokenClass::Access, e.reason());
                AppError::from(e)
            })
    }
}

impl FromRequest for AccessClaims {
    type Error = AppError;
    type Future = std::future::Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        std::future::ready(AccessClaims::extract(req))
    }
}
