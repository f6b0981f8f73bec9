use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use api::auth::AuthError;
use api::items::ItemError;
use store::sort::UnknownSortField;
use store::{StoreError, ValidationError};

/// Everything a handler can fail with, mapped onto a status code.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    BadSort(#[from] UnknownSortField),

    #[error("not logged in")]
    Unauthenticated,

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

impl From<ItemError> for AppError {
    fn from(err: ItemError) -> Self {
        match err {
            ItemError::Invalid(e) => Self::Validation(e),
            ItemError::Store(e) => Self::Store(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::BadSort(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::Auth(AuthError::EmailTaken | AuthError::BadCredentials) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Auth(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Store(StoreError::NotFound) => StatusCode::NOT_FOUND,
            AppError::Store(StoreError::Forbidden) => StatusCode::FORBIDDEN,
            AppError::Store(StoreError::Backend(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        (status, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        let cases = [
            (
                AppError::Validation(ValidationError::PriorityOutOfRange(11)),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::BadSort(UnknownSortField("name".into())),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (AppError::Unauthenticated, StatusCode::UNAUTHORIZED),
            (
                AppError::Store(StoreError::NotFound),
                StatusCode::NOT_FOUND,
            ),
            (
                AppError::Store(StoreError::Forbidden),
                StatusCode::FORBIDDEN,
            ),
            (
                AppError::Auth(AuthError::BadCredentials),
                StatusCode::BAD_REQUEST,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
