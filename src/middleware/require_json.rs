use axum::{
    extract::Request,
    http::header::ACCEPT,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::ApiError;

/// Middleware that only lets JSON requests through.
///
/// A request qualifies with `format=json` in its query string or an `Accept`
/// header mentioning json; anything else gets an empty 406.
pub async fn require_json_middleware(request: Request, next: Next) -> Response {
    if wants_json(&request) {
        next.run(request).await
    } else {
        ApiError::NotAcceptable.into_response()
    }
}

fn wants_json(request: &Request) -> bool {
    let format_json = request
        .uri()
        .query()
        .map(|query| query.split('&').any(|pair| pair == "format=json"))
        .unwrap_or(false);

    let accept_json = request
        .headers()
        .get_all(ACCEPT)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .any(|value| value.contains("json"));

    format_json || accept_json
}
