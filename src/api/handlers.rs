//! Request handlers.
//!
//! Each handler locks the database only for its synchronous store work and
//! builds the store it needs on the locked connection.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::api::error::{ApiError, ApiResult, MSG_BOOKMARK_NOT_FOUND, MSG_CREDENTIALS_REQUIRED};
use crate::api::extract::{AdminSession, MaybeAdmin};
use crate::app::App;
use crate::managers::bookmark_manager::{BookmarkManager, BookmarkManagerTrait};
use crate::managers::category_manager::{CategoryManager, CategoryManagerTrait};
use crate::services::auth_gate::AuthGateTrait;
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::types::auth::{LoginRequest, LoginResponse};
use crate::types::bookmark::{Bookmark, BookmarkPatch, NewBookmark};
use crate::types::category::CategoryOrder;
use crate::types::errors::AuthError;
use crate::types::settings::{SettingsPatch, SiteSettings};

type Body<T> = Result<Json<T>, JsonRejection>;

#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct CategoryOrderRequest {
    pub categories: Vec<String>,
}

fn success() -> Json<Value> {
    Json(json!({ "success": true }))
}

// ─── Bookmarks ───

pub async fn list_bookmarks(
    State(app): State<Arc<App>>,
    viewer: MaybeAdmin,
) -> ApiResult<Json<Vec<Bookmark>>> {
    let db = app.lock_db();
    let mgr = BookmarkManager::new(db.connection());
    let bookmarks = if viewer.is_admin() {
        mgr.list()?
    } else {
        mgr.list_visible()?
    };
    Ok(Json(bookmarks))
}

pub async fn get_bookmark(
    State(app): State<Arc<App>>,
    viewer: MaybeAdmin,
    Path(id): Path<String>,
) -> ApiResult<Json<Bookmark>> {
    let db = app.lock_db();
    let bookmark = BookmarkManager::new(db.connection()).get(&id)?;
    if !bookmark.visible && !viewer.is_admin() {
        return Err(ApiError::NotFound(MSG_BOOKMARK_NOT_FOUND));
    }
    Ok(Json(bookmark))
}

pub async fn create_bookmark(
    State(app): State<Arc<App>>,
    _admin: AdminSession,
    body: Body<NewBookmark>,
) -> ApiResult<(StatusCode, Json<Bookmark>)> {
    let Json(data) = body?;
    let db = app.lock_db();
    let bookmark = BookmarkManager::new(db.connection()).create(data)?;
    Ok((StatusCode::CREATED, Json(bookmark)))
}

pub async fn update_bookmark(
    State(app): State<Arc<App>>,
    _admin: AdminSession,
    Path(id): Path<String>,
    body: Body<BookmarkPatch>,
) -> ApiResult<Json<Bookmark>> {
    let Json(patch) = body?;
    let db = app.lock_db();
    let bookmark = BookmarkManager::new(db.connection()).update(&id, patch)?;
    Ok(Json(bookmark))
}

pub async fn delete_bookmark(
    State(app): State<Arc<App>>,
    _admin: AdminSession,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let db = app.lock_db();
    BookmarkManager::new(db.connection()).delete(&id)?;
    Ok(success())
}

pub async fn reorder_bookmarks(
    State(app): State<Arc<App>>,
    _admin: AdminSession,
    body: Body<ReorderRequest>,
) -> ApiResult<Json<Value>> {
    let Json(req) = body?;
    let db = app.lock_db();
    BookmarkManager::new(db.connection()).reorder(&req.ids)?;
    Ok(success())
}

// ─── Categories ───

pub async fn list_categories(
    State(app): State<Arc<App>>,
    viewer: MaybeAdmin,
) -> ApiResult<Json<Vec<String>>> {
    let db = app.lock_db();
    let categories = BookmarkManager::new(db.connection()).categories(viewer.is_admin())?;
    Ok(Json(categories))
}

pub async fn get_category_order(
    State(app): State<Arc<App>>,
) -> ApiResult<Json<Vec<CategoryOrder>>> {
    let db = app.lock_db();
    let order = CategoryManager::new(db.connection()).list_order()?;
    Ok(Json(order))
}

pub async fn put_category_order(
    State(app): State<Arc<App>>,
    _admin: AdminSession,
    body: Body<CategoryOrderRequest>,
) -> ApiResult<Json<Value>> {
    let Json(req) = body?;
    let db = app.lock_db();
    CategoryManager::new(db.connection()).reorder_categories(&req.categories)?;
    Ok(success())
}

// ─── Settings ───

pub async fn get_settings(State(app): State<Arc<App>>) -> ApiResult<Json<SiteSettings>> {
    let db = app.lock_db();
    let settings = SettingsEngine::new(db.connection()).get_settings()?;
    Ok(Json(settings))
}

pub async fn put_settings(
    State(app): State<Arc<App>>,
    _admin: AdminSession,
    body: Body<SettingsPatch>,
) -> ApiResult<Json<SiteSettings>> {
    let Json(patch) = body?;
    let db = app.lock_db();
    let settings = SettingsEngine::new(db.connection()).update(&patch)?;
    Ok(Json(settings))
}

// ─── Auth ───

pub async fn login(
    State(app): State<Arc<App>>,
    body: Body<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let Json(req) = body?;
    let non_blank = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
    let (Some(username), Some(password)) = (non_blank(req.username), non_blank(req.password))
    else {
        return Err(ApiError::BadRequest(MSG_CREDENTIALS_REQUIRED));
    };

    // PBKDF2 verification is CPU-bound; keep it off the async workers.
    let gate = app.clone();
    let user = username.clone();
    let issued = tokio::task::spawn_blocking(move || gate.auth.issue_token(&user, &password))
        .await
        .map_err(ApiError::internal)?;

    match issued {
        Ok(token) => {
            info!(%username, "admin logged in");
            Ok(Json(LoginResponse { token, username }))
        }
        Err(e @ AuthError::InvalidCredentials) => {
            warn!(%username, "login rejected");
            Err(e.into())
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn verify_session(AdminSession(claims): AdminSession) -> Json<Value> {
    Json(json!({ "valid": true, "username": claims.sub }))
}

// ─── Health ───

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
