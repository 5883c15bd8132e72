use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

pub mod cli;
pub mod db;

mod errors;
pub use errors::*;

mod extract;
pub use extract::*;

mod state;
pub use state::*;

pub mod routes;

/// The full service: API routes, CORS for the frontend origin and request
/// tracing
pub fn app(state: AppState, cors_origin: &str) -> Result<Router, anyhow::Error> {
    let cors = CorsLayer::new()
        .allow_origin(cors_origin.parse::<HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    Ok(routes::router()
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state))
}
