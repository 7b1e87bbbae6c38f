//! JSON error responses.
//!
//! Every failure leaves the API as `{"error": "<message>"}` with a status
//! code. Messages are user-facing Chinese text; internal details only go to
//! the log.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::types::errors::{AuthError, BookmarkError, CategoryError, SettingsError};

pub const MSG_BAD_BODY: &str = "请求格式错误";
pub const MSG_TITLE_URL_REQUIRED: &str = "标题和链接不能为空";
pub const MSG_CREDENTIALS_REQUIRED: &str = "用户名和密码不能为空";
pub const MSG_INVALID_CREDENTIALS: &str = "用户名或密码错误";
pub const MSG_UNAUTHORIZED: &str = "未授权，请先登录";
pub const MSG_TOKEN_EXPIRED: &str = "登录已过期，请重新登录";
pub const MSG_TOKEN_INVALID: &str = "无效的登录凭证";
pub const MSG_BOOKMARK_NOT_FOUND: &str = "书签不存在";
pub const MSG_INVALID_THEME: &str = "无效的主题";
pub const MSG_SITE_TITLE_TOO_LONG: &str = "网站标题不能超过60个字符";
pub const MSG_SITE_ICON_TOO_LONG: &str = "网站图标不能超过512个字符";
pub const MSG_INTERNAL: &str = "服务器内部错误";

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(&'static str),
    #[error("{0}")]
    Unauthorized(&'static str),
    #[error("{0}")]
    NotFound(&'static str),
    #[error("{0}")]
    Internal(&'static str),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Logs `cause` and returns the generic 500.
    pub fn internal(cause: impl std::fmt::Display) -> Self {
        error!(error = %cause, "request failed");
        ApiError::Internal(MSG_INTERNAL)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}

impl From<BookmarkError> for ApiError {
    fn from(err: BookmarkError) -> Self {
        match err {
            BookmarkError::NotFound(_) => ApiError::NotFound(MSG_BOOKMARK_NOT_FOUND),
            BookmarkError::MissingTitleOrUrl => ApiError::BadRequest(MSG_TITLE_URL_REQUIRED),
            BookmarkError::DatabaseError(_) => ApiError::internal(err),
        }
    }
}

impl From<CategoryError> for ApiError {
    fn from(err: CategoryError) -> Self {
        ApiError::internal(err)
    }
}

impl From<SettingsError> for ApiError {
    fn from(err: SettingsError) -> Self {
        match err {
            SettingsError::InvalidTheme(_) => ApiError::BadRequest(MSG_INVALID_THEME),
            SettingsError::SiteTitleTooLong(_) => ApiError::BadRequest(MSG_SITE_TITLE_TOO_LONG),
            SettingsError::SiteIconTooLong(_) => ApiError::BadRequest(MSG_SITE_ICON_TOO_LONG),
            SettingsError::DatabaseError(_) => ApiError::internal(err),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => ApiError::Unauthorized(MSG_INVALID_CREDENTIALS),
            AuthError::MissingToken => ApiError::Unauthorized(MSG_UNAUTHORIZED),
            AuthError::TokenExpired => ApiError::Unauthorized(MSG_TOKEN_EXPIRED),
            AuthError::InvalidToken(_) => ApiError::Unauthorized(MSG_TOKEN_INVALID),
            AuthError::TokenCreation(_) | AuthError::Crypto(_) => ApiError::internal(err),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(error = %rejection.body_text(), "rejected request body");
        ApiError::BadRequest(MSG_BAD_BODY)
    }
}
