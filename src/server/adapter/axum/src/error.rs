/* src/server/adapter/axum/src/error.rs */

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kfz_core::SiteError;

/// Newtype wrapper to implement `IntoResponse` for `SiteError`.
/// Required because Rust's orphan rule prevents `impl IntoResponse for SiteError`
/// when both types are foreign to this crate.
pub(crate) struct AxumError(pub SiteError);

impl IntoResponse for AxumError {
  fn into_response(self) -> Response {
    let err = self.0;
    let status = StatusCode::from_u16(err.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = serde_json::json!({
      "ok": false,
      "error": {
        "code": err.code(),
        "message": err.message(),
        "transient": status.is_server_error(),
      }
    });
    (status, axum::Json(body)).into_response()
  }
}

impl From<SiteError> for AxumError {
  fn from(err: SiteError) -> Self {
    Self(err)
  }
}
