//! # HTTP routes
//!
//! The paths under `/todo` are kept verbatim from the legacy service
//! (including `marks_as_done`) so existing clients keep working, and the
//! listing endpoint keeps the legacy direction flag: `0` returns insertion
//! order, positive sorts descending, negative ascending. The flag is turned
//! into an explicit [`SortOrder`] right here; nothing below this layer sees
//! the integer.

use axum::{
    extract::{Query, State},
    routing::{delete, get, patch, post},
    Json, Router,
};
use serde::Deserialize;
use tower_sessions::Session;
use uuid::Uuid;

use api::auth::{self, Credentials, Registration, SESSION_USER_ID_KEY};
use api::items;
use api::UserInfo;
use store::models::{Item, ItemDraft, ItemPatch};
use store::sort::{SortField, SortOrder};

use crate::application::AppState;
use crate::error::AppError;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/me", get(me))
        .route("/todo/add_item", post(add_item))
        .route("/todo/get_items", get(get_items))
        .route("/todo/marks_as_done", post(mark_as_done))
        .route("/todo/update_item", patch(update_item))
        .route("/todo/delete_item", delete(delete_item))
        .with_state(state)
}

/// Resolve the authenticated user id from the session.
async fn current_user(session: &Session) -> Result<Uuid, AppError> {
    session
        .get::<Uuid>(SESSION_USER_ID_KEY)
        .await?
        .ok_or(AppError::Unauthenticated)
}

async fn register(
    State(state): State<AppState>,
    Json(registration): Json<Registration>,
) -> Result<Json<UserInfo>, AppError> {
    Ok(Json(auth::register(&state.pool, registration).await?))
}

async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(credentials): Json<Credentials>,
) -> Result<Json<UserInfo>, AppError> {
    let user = auth::login(&state.pool, &credentials).await?;
    session.insert(SESSION_USER_ID_KEY, user.id).await?;
    Ok(Json(user))
}

async fn logout(session: Session) -> Result<(), AppError> {
    session.flush().await?;
    Ok(())
}

async fn me(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<Option<UserInfo>>, AppError> {
    let Some(user_id) = session.get::<Uuid>(SESSION_USER_ID_KEY).await? else {
        return Ok(Json(None));
    };
    Ok(Json(auth::user_info(&state.pool, user_id).await?))
}

async fn add_item(
    State(state): State<AppState>,
    session: Session,
    Json(draft): Json<ItemDraft>,
) -> Result<Json<Uuid>, AppError> {
    let user_id = current_user(&session).await?;
    Ok(Json(items::add(&state.items, user_id, draft).await?))
}

#[derive(Debug, Deserialize)]
struct ListParams {
    #[serde(default = "default_sort_field")]
    sort_by: String,
    #[serde(default = "default_direction")]
    direction: i32,
}

fn default_sort_field() -> String {
    "due".to_string()
}

// Legacy default: sort by due date, flag 1 (descending).
fn default_direction() -> i32 {
    1
}

async fn get_items(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Item>>, AppError> {
    let user_id = current_user(&session).await?;
    let field: SortField = params.sort_by.parse()?;
    let order = SortOrder::from_flag(params.direction);
    Ok(Json(items::list(&state.items, user_id, field, order).await?))
}

#[derive(Debug, Deserialize)]
struct ItemIdParam {
    item_id: Uuid,
}

async fn mark_as_done(
    State(state): State<AppState>,
    session: Session,
    Query(param): Query<ItemIdParam>,
) -> Result<(), AppError> {
    let user_id = current_user(&session).await?;
    items::mark_done(&state.items, param.item_id, user_id).await?;
    Ok(())
}

async fn update_item(
    State(state): State<AppState>,
    session: Session,
    Query(param): Query<ItemIdParam>,
    Json(patch): Json<ItemPatch>,
) -> Result<(), AppError> {
    let user_id = current_user(&session).await?;
    items::update(&state.items, param.item_id, user_id, patch).await?;
    Ok(())
}

async fn delete_item(
    State(state): State<AppState>,
    session: Session,
    Query(param): Query<ItemIdParam>,
) -> Result<(), AppError> {
    let user_id = current_user(&session).await?;
    items::delete(&state.items, param.item_id, user_id).await?;
    Ok(())
}
