use crate::utils::config::AppConfig;
use crate::utils::error::ApiError;
use actix_web::dev::{Payload, ServiceRequest};
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use futures_util::future::{Ready, ready};
use jsonwebtoken::{DecodingKey, Validation, decode};
use log::debug;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub id: String,
    pub exp: usize,
}

/// Identity of the caller, established by [`verify_token`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AuthenticatedUser {
    pub id: ObjectId,
}

fn jwt_secret(req: &ServiceRequest) -> String {
    match req.app_data::<web::Data<AppConfig>>() {
        Some(config) => config.jwt_secret.clone(),
        None => std::env::var("JWT_SECRET").unwrap_or_else(|_| "secret".to_string()),
    }
}

fn authenticate(token: &str, secret: &str) -> Result<AuthenticatedUser, ApiError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| {
        debug!("rejected bearer token: {}", e);
        ApiError::UnauthorizedError("Token inválido".to_string())
    })?;

    let id = ObjectId::parse_str(&token_data.claims.id)
        .map_err(|_| ApiError::UnauthorizedError("Token inválido".to_string()))?;

    Ok(AuthenticatedUser { id })
}

/// Validator for `HttpAuthentication::with_fn`. A missing or malformed
/// `Authorization` header arrives as `None` so the rejection keeps the API's
/// JSON envelope.
pub async fn verify_token(
    req: ServiceRequest,
    credentials: Option<BearerAuth>,
) -> Result<ServiceRequest, (Error, ServiceRequest)> {
    let Some(credentials) = credentials else {
        let err = ApiError::UnauthorizedError("No autenticado".to_string());
        return Err((err.into(), req));
    };

    let secret = jwt_secret(&req);

    match authenticate(credentials.token(), &secret) {
        Ok(user) => {
            req.extensions_mut().insert(user);
            Ok(req)
        }
        Err(e) => Err((e.into(), req)),
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let user = req
            .extensions()
            .get::<AuthenticatedUser>()
            .copied()
            .ok_or_else(|| ApiError::UnauthorizedError("No autenticado".to_string()));
        ready(user)
    }
}

#[cfg(test)]
pub(crate) fn issue_token(user_id: &ObjectId, secret: &str) -> String {
    let exp = (chrono::Utc::now() + chrono::Duration::hours(1)).timestamp() as usize;
    let claims = Claims {
        id: user_id.to_hex(),
        exp,
    };
    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}
