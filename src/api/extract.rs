//! Auth extractors.
//!
//! `AdminSession` guards write endpoints and rejects with 401.
//! `MaybeAdmin` never rejects; read endpoints use it to decide whether
//! hidden bookmarks are shown.

use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;
use tracing::debug;

use crate::api::error::ApiError;
use crate::app::App;
use crate::services::auth_gate::{bearer_token, AuthGateTrait};
use crate::types::auth::Claims;
use crate::types::errors::AuthError;

/// A request carrying a valid admin token.
#[derive(Debug, Clone)]
pub struct AdminSession(pub Claims);

/// The admin identity, when the request carries a valid token.
#[derive(Debug, Clone)]
pub struct MaybeAdmin(pub Option<Claims>);

impl MaybeAdmin {
    pub fn is_admin(&self) -> bool {
        self.0.is_some()
    }
}

fn authenticate(parts: &Parts, app: &App) -> Result<Claims, AuthError> {
    let header = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    let token = bearer_token(header)?;
    app.auth.verify_token(token)
}

impl FromRequestParts<Arc<App>> for AdminSession {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, app: &Arc<App>) -> Result<Self, Self::Rejection> {
        match authenticate(parts, app) {
            Ok(claims) => Ok(AdminSession(claims)),
            Err(e) => {
                debug!(error = %e, path = %parts.uri.path(), "admin auth rejected");
                Err(e.into())
            }
        }
    }
}

impl FromRequestParts<Arc<App>> for MaybeAdmin {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, app: &Arc<App>) -> Result<Self, Self::Rejection> {
        Ok(MaybeAdmin(authenticate(parts, app).ok()))
    }
}
