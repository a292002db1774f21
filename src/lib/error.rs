use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt::{Debug, Display, Formatter};

/// The business-error kinds a handler can surface to a caller, named exactly
/// as the error-handling design names them. Each carries just enough detail
/// to build the HTTP status and user-facing message; internal causes (a
/// hashing failure, a document-store error) are logged, never echoed back.
#[derive(Debug, thiserror::Error)]
pub enum InternalError {
    #[error("{reason} ({field})")]
    ValidationFailed { field: &'static str, reason: &'static str },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Invalid or expired token")]
    ExpiredOrMalformedToken,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{reason}")]
    Conflict { reason: &'static str },

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Access denied")]
    AccessDenied,
}

/// The global server error type: a convenient wrapper around every kind of
/// error this crate's handlers can encounter, whether raised deliberately
/// (`InternalError`) or surfaced from an external library. Handlers should
/// propagate with `?` and let this type's `ResponseError` impl translate the
/// failure into the `{success, message}` JSON body callers see.
#[derive(Debug)]
pub enum ServerError {
    Internal(InternalError),
    Backend(mongodb::error::Error),
    Bson(bson::de::Error),
    Jwt(jsonwebtoken::errors::Error),
    Hash(argon2::password_hash::Error),
}

impl From<InternalError> for ServerError {
    fn from(error: InternalError) -> Self {
        Self::Internal(error)
    }
}

impl From<mongodb::error::Error> for ServerError {
    fn from(error: mongodb::error::Error) -> Self {
        Self::Backend(error)
    }
}

impl From<bson::de::Error> for ServerError {
    fn from(error: bson::de::Error) -> Self {
        Self::Bson(error)
    }
}

impl From<jsonwebtoken::errors::Error> for ServerError {
    fn from(error: jsonwebtoken::errors::Error) -> Self {
        Self::Jwt(error)
    }
}

impl From<argon2::password_hash::Error> for ServerError {
    fn from(error: argon2::password_hash::Error) -> Self {
        Self::Hash(error)
    }
}

impl Display for ServerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for ServerError {}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    message: String,
}

impl ServerError {
    fn user_message(&self) -> String {
        match self {
            Self::Internal(e) => e.to_string(),
            // Causes are logged in `error_response`; callers only ever see a
            // generic message for anything originating outside this crate.
            Self::Backend(_) | Self::Bson(_) => "An internal error has occurred. Please try again later.".to_string(),
            Self::Jwt(_) => "Invalid or expired token".to_string(),
            Self::Hash(_) => "An internal error has occurred. Please try again later.".to_string(),
        }
    }
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Internal(e) => match e {
                InternalError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
                InternalError::Unauthorized | InternalError::ExpiredOrMalformedToken => StatusCode::UNAUTHORIZED,
                InternalError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                InternalError::NotFound(_) => StatusCode::NOT_FOUND,
                InternalError::Conflict { .. } => StatusCode::BAD_REQUEST,
                InternalError::AccessDenied => StatusCode::FORBIDDEN,
            },
            Self::Jwt(_) => StatusCode::UNAUTHORIZED,
            Self::Backend(_) | Self::Bson(_) | Self::Hash(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if matches!(self, Self::Backend(_) | Self::Bson(_) | Self::Hash(_)) {
            log::error!("backend failure: {:?}", self);
        }
        HttpResponse::build(self.status_code()).json(ErrorBody {
            success: false,
            message: self.user_message(),
        })
    }
}
