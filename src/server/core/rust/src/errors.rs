/* src/server/core/rust/src/errors.rs */

use std::fmt;

/// Error surfaced to HTTP clients as `{ok: false, error: {code, message}}`.
#[derive(Debug)]
pub struct SiteError {
  code: String,
  message: String,
  status: u16,
}

fn default_status(code: &str) -> u16 {
  match code {
    "VALIDATION_ERROR" => 400,
    "NOT_FOUND" => 404,
    "UPSTREAM_ERROR" => 502,
    "INTERNAL_ERROR" => 500,
    _ => 500,
  }
}

impl SiteError {
  pub fn new(code: impl Into<String>, message: impl Into<String>, status: u16) -> Self {
    Self { code: code.into(), message: message.into(), status }
  }

  pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
    let code = code.into();
    let status = default_status(&code);
    Self { code, message: message.into(), status }
  }

  pub fn validation(msg: impl Into<String>) -> Self {
    Self::with_code("VALIDATION_ERROR", msg)
  }

  pub fn not_found(msg: impl Into<String>) -> Self {
    Self::with_code("NOT_FOUND", msg)
  }

  pub fn upstream(msg: impl Into<String>) -> Self {
    Self::with_code("UPSTREAM_ERROR", msg)
  }

  pub fn internal(msg: impl Into<String>) -> Self {
    Self::with_code("INTERNAL_ERROR", msg)
  }

  pub fn code(&self) -> &str {
    &self.code
  }

  pub fn message(&self) -> &str {
    &self.message
  }

  pub fn status(&self) -> u16 {
    self.status
  }
}

impl fmt::Display for SiteError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}: {}", self.code, self.message)
  }
}

impl std::error::Error for SiteError {}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_status_known_codes() {
    assert_eq!(default_status("VALIDATION_ERROR"), 400);
    assert_eq!(default_status("NOT_FOUND"), 404);
    assert_eq!(default_status("UPSTREAM_ERROR"), 502);
    assert_eq!(default_status("INTERNAL_ERROR"), 500);
    assert_eq!(default_status("SOMETHING_ELSE"), 500);
  }

  #[test]
  fn explicit_status_is_kept() {
    let err = SiteError::new("GONE", "moved away", 410);
    assert_eq!((err.code(), err.message(), err.status()), ("GONE", "moved away", 410));
  }

  #[test]
  fn convenience_constructors() {
    assert_eq!(SiteError::validation("x").status(), 400);
    assert_eq!(SiteError::not_found("x").status(), 404);
    assert_eq!(SiteError::upstream("x").status(), 502);
    assert_eq!(SiteError::internal("x").status(), 500);
  }

  #[test]
  fn display_format() {
    assert_eq!(SiteError::not_found("no such page").to_string(), "NOT_FOUND: no such page");
  }
}
