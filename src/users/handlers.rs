use axum::{
    extract::{OriginalUri, Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    errors::ApiError,
    state::AppState,
    users::dto::{UserRequest, UserResponse},
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/user", get(find_all).post(create))
        .route("/user/:id", get(find_by_id).put(update).delete(delete))
}

fn validated(req: UserRequest, path: &str) -> Result<UserRequest, ApiError> {
    if let Err(msg) = req.validate() {
        warn!(%path, reason = msg, "rejected user payload");
        return Err(ApiError::bad_request(msg, path));
    }
    Ok(req)
}

#[instrument(skip(state, uri))]
pub async fn find_by_id(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<i32>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .users
        .find_by_id(id)
        .await
        .map_err(|e| ApiError::from_user_error(e, uri.path()))?;
    Ok(Json(user.into()))
}

#[instrument(skip(state, uri))]
pub async fn find_all(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = state
        .users
        .find_all()
        .await
        .map_err(|e| ApiError::from_user_error(e, uri.path()))?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

#[instrument(skip(state, uri, payload))]
pub async fn create(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Json(payload): Json<UserRequest>,
) -> Result<(StatusCode, HeaderMap), ApiError> {
    let path = uri.path();
    let payload = validated(payload, path)?;

    let user = state
        .users
        .create(payload)
        .await
        .map_err(|e| ApiError::from_user_error(e, path))?;

    let location = format!("/user/{}", user.id);
    let mut headers = HeaderMap::new();
    headers.insert(
        header::LOCATION,
        HeaderValue::from_str(&location)
            .map_err(|_| ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error", path))?,
    );

    info!(user_id = user.id, %location, "created");
    Ok((StatusCode::CREATED, headers))
}

#[instrument(skip(state, uri, payload))]
pub async fn update(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<i32>,
    Json(payload): Json<UserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let path = uri.path();
    let payload = validated(payload, path)?;

    let user = state
        .users
        .update(id, payload)
        .await
        .map_err(|e| ApiError::from_user_error(e, path))?;
    Ok(Json(user.into()))
}

#[instrument(skip(state, uri))]
pub async fn delete(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    state
        .users
        .delete(id)
        .await
        .map_err(|e| ApiError::from_user_error(e, uri.path()))?;
    Ok(StatusCode::NO_CONTENT)
}
