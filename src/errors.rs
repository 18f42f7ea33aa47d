use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use time::OffsetDateTime;
use tracing::{error, warn};

use crate::users::error::UserError;

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct StandardError {
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub status: u16,
    pub error: String,
    pub path: String,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub path: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            path: path.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message, path)
    }

    /// Maps a service failure raised while serving `path`.
    pub fn from_user_error(err: UserError, path: &str) -> Self {
        match &err {
            UserError::NotFound { id } => {
                warn!(user_id = id, %path, "user not found");
                Self::new(StatusCode::NOT_FOUND, err.to_string(), path)
            }
            // Email conflicts are reported as 400, not 409.
            UserError::Conflict { email } => {
                warn!(%email, %path, "email conflict");
                Self::new(StatusCode::BAD_REQUEST, err.to_string(), path)
            }
            UserError::Storage(_) | UserError::Hashing(_) => {
                error!(error = ?err, %path, "request failed");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error", path)
            }
        }
    }

    pub fn body(&self) -> StandardError {
        StandardError {
            timestamp: OffsetDateTime::now_utc(),
            status: self.status.as_u16(),
            error: self.message.clone(),
            path: self.path.clone(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}: {}", self.status.as_u16(), self.path, self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::repo::RepoError;

    #[test]
    fn not_found_maps_to_404_body() {
        let err = ApiError::from_user_error(UserError::NotFound { id: 1 }, "/user/1");
        assert_eq!(err.status, StatusCode::NOT_FOUND);

        let body = err.body();
        assert_eq!(body.status, 404);
        assert_eq!(body.error, "User not found");
        assert_eq!(body.path, "/user/1");
    }

    #[test]
    fn conflict_maps_to_400_body() {
        let err = ApiError::from_user_error(
            UserError::Conflict {
                email: "valdir@email.com".into(),
            },
            "/user",
        );
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.body().error, "Email already registered");
        assert_eq!(err.body().status, 400);
    }

    #[test]
    fn storage_failures_hide_details() {
        let err = ApiError::from_user_error(
            UserError::Storage(RepoError::Database(sqlx::Error::PoolTimedOut)),
            "/user",
        );
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Internal server error");
    }

    #[test]
    fn body_serializes_rfc3339_timestamp() {
        let json = serde_json::to_value(ApiError::bad_request("Invalid email", "/user").body())
            .unwrap();
        let ts = json["timestamp"].as_str().unwrap();
        assert!(OffsetDateTime::parse(ts, &time::format_description::well_known::Rfc3339).is_ok());
        assert_eq!(json["status"], 400);
        assert_eq!(json["error"], "Invalid email");
        assert_eq!(json["path"], "/user");
    }
}
