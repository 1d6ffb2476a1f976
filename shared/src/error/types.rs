//! Error types and the error response body

use super::category::ErrorCategory;
use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

/// Whether system-category messages reach clients verbatim.
///
/// Production deployments switch this off so internal details never leave
/// the server; the full message is still logged.
static EXPOSE_INTERNAL_ERRORS: AtomicBool = AtomicBool::new(true);

/// Message shown instead of a hidden system error.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong";

/// Toggle exposure of system error messages in response bodies
pub fn set_expose_internal_errors(expose: bool) {
    EXPOSE_INTERNAL_ERRORS.store(expose, Ordering::Relaxed);
}

/// Application error with structured error code and details
///
/// This is the single error type handlers return. It carries:
/// - a standardized [`ErrorCode`] that fixes the HTTP status
/// - a human-readable message
/// - optional structured details (field-level validation errors, context)
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (field-level errors, context, etc.)
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create a not found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        let r = resource.into();
        Self::with_message(ErrorCode::NotFound, format!("{} not found", r))
            .with_detail("resource", r)
    }

    /// Create a not authenticated error (no token presented)
    pub fn not_authenticated() -> Self {
        Self::with_message(
            ErrorCode::NotAuthenticated,
            "Please provide a valid authentication token",
        )
    }

    /// Create a permission denied error
    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::PermissionDenied, msg)
    }

    /// Create an admin required error
    pub fn admin_required() -> Self {
        Self::with_message(
            ErrorCode::AdminRequired,
            "This action requires administrator privileges",
        )
    }

    /// Create an ownership required error
    pub fn ownership_required(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::OwnershipRequired, msg)
    }

    /// Create an invalid token error
    pub fn invalid_token(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::TokenInvalid, msg)
    }

    /// Create a token expired error
    pub fn token_expired() -> Self {
        Self::with_message(
            ErrorCode::TokenExpired,
            "The provided token is invalid or expired",
        )
    }

    /// Create an invalid credentials error
    pub fn invalid_credentials() -> Self {
        Self::with_message(ErrorCode::InvalidCredentials, "Username or password is incorrect")
    }

    /// Create an invalid request error
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidRequest, msg)
    }

    /// Create a too many requests error
    pub fn too_many_requests(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::TooManyRequests, msg)
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    /// Create a database error
    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }

    /// Message safe to put in a response body
    pub fn public_message(&self) -> String {
        if self.code.category() == ErrorCategory::System
            && !EXPOSE_INTERNAL_ERRORS.load(Ordering::Relaxed)
        {
            GENERIC_ERROR_MESSAGE.to_string()
        } else {
            self.message.clone()
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields = Vec::new();
        flatten_validation_errors("", &errors, &mut fields);
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let summary = fields
            .iter()
            .filter_map(|(_, messages)| messages.first().cloned())
            .collect::<Vec<_>>()
            .join(", ");
        let message = if summary.is_empty() {
            ErrorCode::ValidationFailed.message().to_string()
        } else {
            summary
        };

        let mut err = Self::validation(message);
        for (field, messages) in fields {
            err = err.with_detail(field, messages);
        }
        err
    }
}

/// Collect `(path, messages)` pairs, descending into nested structs and lists
/// (`products[0].quantity`).
fn flatten_validation_errors(
    prefix: &str,
    errors: &validator::ValidationErrors,
    out: &mut Vec<(String, Vec<String>)>,
) {
    use validator::ValidationErrorsKind;

    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };
        match kind {
            ValidationErrorsKind::Field(errs) => {
                let messages = errs
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| format!("{} is invalid", path))
                    })
                    .collect();
                out.push((path, messages));
            }
            ValidationErrorsKind::Struct(inner) => flatten_validation_errors(&path, inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    flatten_validation_errors(&format!("{}[{}]", path, index), inner, out);
                }
            }
        }
    }
}

/// JSON body of every error response
///
/// ```json
/// { "code": 4010, "error": "Insufficient inventory", "message": "...", "details": {...} }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Numeric error code
    pub code: u16,
    /// Short title derived from the code
    pub error: String,
    /// Human-readable message
    pub message: String,
    /// Additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl ErrorResponse {
    /// Build the body for an [`AppError`]
    pub fn from_error(err: &AppError) -> Self {
        let hidden = err.code.category() == ErrorCategory::System
            && !EXPOSE_INTERNAL_ERRORS.load(Ordering::Relaxed);
        Self {
            code: err.code.code(),
            error: err.code.message().to_string(),
            message: err.public_message(),
            details: if hidden { None } else { err.details.clone() },
        }
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = self.http_status();
        let body = ErrorResponse::from_error(&self);

        // Log system errors
        if self.code.category() == ErrorCategory::System {
            tracing::error!(
                code = %self.code,
                message = %self.message,
                "System error occurred"
            );
        }

        (status, Json(body)).into_response()
    }
}
