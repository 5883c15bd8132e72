use std::fmt;

use http::StatusCode;
use serde::{Deserialize, Serialize};

#[cfg(feature = "backend")]
pub use backend::*;

/// Error type for routes that have no failure modes of their own
#[derive(Debug, Clone, PartialEq)]
pub enum Nothing {}

impl fmt::Display for Nothing {
    fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

impl std::error::Error for Nothing {}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ValidationError {
    pub error_messages: Vec<String>,
}

impl ValidationError {
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.error_messages.push(message.into());
    }

    /// `Ok` if no messages were collected
    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.error_messages.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error_messages.join("; "))
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone)]
pub enum ServerError<T> {
    /// Route specific error with the status code it maps to
    Inner { code: StatusCode, inner: T },
    Validation { inner: ValidationError },
    Other { message: String },

    WithContext { context: String, inner: Box<Self> },
}

impl<T> ServerError<T> {
    pub fn code(&self) -> StatusCode {
        match self {
            ServerError::Inner { code, .. } => *code,
            ServerError::Validation { .. } => StatusCode::BAD_REQUEST,
            ServerError::Other { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::WithContext { inner, .. } => inner.code(),
        }
    }

    /// The route specific error, if this is one
    pub fn inner(&self) -> Option<&T> {
        match self {
            ServerError::Inner { inner, .. } => Some(inner),
            ServerError::WithContext { inner, .. } => inner.inner(),
            _ => None,
        }
    }
}

impl<T: fmt::Display> fmt::Display for ServerError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::Inner { inner, .. } => write!(f, "{inner}"),
            ServerError::Validation { inner } => write!(f, "Validation failed: {inner}"),
            ServerError::Other { message } => write!(f, "{message}"),
            ServerError::WithContext { context, inner } => write!(f, "{context}: {inner}"),
        }
    }
}

impl<T: fmt::Debug + fmt::Display> std::error::Error for ServerError<T> {}

impl<T> From<ValidationError> for ServerError<T> {
    fn from(inner: ValidationError) -> Self {
        Self::Validation { inner }
    }
}

#[macro_export]
macro_rules! other_error {
    ($($arg:tt)*) => {
        $crate::api::error::ServerError::Other { message: format!($($arg)*) }
    };
}

pub trait ServerErrorContext<V, T>: Sized {
    /// Add helpful context to errors
    fn context<S: Into<String>>(self, context: S) -> Result<V, ServerError<T>>;
    /// Add helpful context to errors
    ///
    /// `context` is provided as a closure to avoid potential formatting cost if
    /// the result isn't an error
    fn with_context<S: Into<String>, F: FnOnce() -> S>(self, context: F) -> Result<V, ServerError<T>>;
}

impl<V, T, E: Into<ServerError<T>>> ServerErrorContext<V, T> for Result<V, E> {
    fn context<S: Into<String>>(self, context: S) -> Result<V, ServerError<T>> {
        self.map_err(|e| ServerError::WithContext {
            context: context.into(),
            inner: Box::new(e.into()),
        })
    }

    fn with_context<S: Into<String>, F: FnOnce() -> S>(self, context: F) -> Result<V, ServerError<T>> {
        self.map_err(|e| ServerError::WithContext {
            context: context().into(),
            inner: Box::new(e.into()),
        })
    }
}

#[cfg(feature = "backend")]
mod backend {
    use std::fmt;

    use axum::{
        extract::rejection::JsonRejection,
        response::{IntoResponse, Response},
        Json,
    };
    use deadpool_sqlite::{InteractError, PoolError};
    use serde::Serialize;
    use tracing::{debug, error};

    use super::{ServerError, ValidationError};

    #[derive(Debug, Serialize)]
    struct ErrorBody {
        error: String,
    }

    impl<T> From<rusqlite::Error> for ServerError<T> {
        fn from(err: rusqlite::Error) -> Self {
            Self::Other { message: format!("Database error: {err}") }
        }
    }

    impl<T> From<InteractError> for ServerError<T> {
        fn from(err: InteractError) -> Self {
            Self::Other { message: format!("Database interaction failed: {err:?}") }
        }
    }

    impl<T> From<PoolError> for ServerError<T> {
        fn from(err: PoolError) -> Self {
            Self::Other { message: format!("Database pool error: {err}") }
        }
    }

    /// Malformed or mistyped request bodies are the caller's fault
    impl<T> From<JsonRejection> for ServerError<T> {
        fn from(rejection: JsonRejection) -> Self {
            Self::Validation {
                inner: ValidationError {
                    error_messages: vec![rejection.body_text()],
                },
            }
        }
    }

    impl<T: fmt::Display> IntoResponse for ServerError<T> {
        fn into_response(self) -> Response {
            let code = self.code();
            let error = self.to_string();
            if code.is_server_error() {
                error!(%code, %error, "Request failed");
            } else {
                debug!(%code, %error, "Request rejected");
            }

            (code, Json(ErrorBody { error })).into_response()
        }
    }
}
