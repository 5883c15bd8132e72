use shared::api::{error::ServerError, response_errors::RouteError};

/// Handler for paths no route matches, so they get the same JSON error shape
/// as everything else
pub async fn fallback() -> ServerError<RouteError> {
    RouteError::NotFound.into()
}
