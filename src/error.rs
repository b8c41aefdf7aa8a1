use crate::registry::RegistryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Registry transport/decode failures are the only error class that reaches
/// PowerDNS as an HTTP failure (§7): "bad query shape" and "nothing found"
/// are both represented as a well-formed `{"result": false}` envelope
/// instead, built directly by the handlers in `http::handlers`.
impl IntoResponse for RegistryError {
    fn into_response(self) -> Response {
        log::error!("registry error: {}", self);
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}
