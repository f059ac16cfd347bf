//! Error types surfaced at the handler boundary.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use sea_orm::DbErr;
use thiserror::Error;

use crate::cart::CartCodecError;
use crate::db;
use crate::views;

/// A rejected review or login form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Kindly provide all the details.")]
    MissingField,

    #[error("Invalid movie name.")]
    InvalidMovie,
}

/// Everything a request handler can fail with.
#[derive(Debug, Error)]
pub enum AppError {
    /// No identity in the session. Always answered with a redirect to the
    /// login page, never an error page.
    #[error("login required")]
    Unauthenticated,

    /// A cart save was attempted without a username. Nothing was written.
    #[error("Username cannot be empty when saving cart.")]
    RequiresUsername,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("database error: {0}")]
    Database(#[from] DbErr),

    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error("stored cart rejected: {0}")]
    Cart(#[from] CartCodecError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Unauthenticated => Redirect::to("/login").into_response(),
            AppError::RequiresUsername | AppError::Validation(_) => {
                (StatusCode::BAD_REQUEST, views::error(&self.to_string())).into_response()
            }
            AppError::Database(_) | AppError::Session(_) | AppError::Cart(_) => {
                if let AppError::Database(e) = &self {
                    if db::is_acquire_timeout(e) {
                        tracing::warn!("database pool exhausted; a connection may have leaked");
                    }
                }
                tracing::error!("request failed: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    views::error("Something went wrong. Please try again."),
                )
                    .into_response()
            }
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
