use axum::extract::FromRequest;
use shared::api::error::{Nothing, ServerError};

pub type BodyRejection = ServerError<Nothing>;

/// `axum::Json` with rejections rendered as `{"error": ...}` bad requests
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(BodyRejection))]
pub struct JsonBody<T>(pub T);
