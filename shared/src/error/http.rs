//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound | Self::OrderNotFound | Self::ProductNotFound | Self::UserNotFound => {
                StatusCode::NOT_FOUND
            }

            // 401 Unauthorized
            Self::NotAuthenticated | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,

            // 403 Forbidden (a presented but unusable token is refused, not challenged)
            Self::TokenExpired
            | Self::TokenInvalid
            | Self::PermissionDenied
            | Self::AdminRequired
            | Self::OwnershipRequired => StatusCode::FORBIDDEN,

            // 402 Payment Required
            Self::PaymentFailed => StatusCode::PAYMENT_REQUIRED,

            // 409 Conflict
            Self::AlreadyExists => StatusCode::CONFLICT,

            // 429 Too Many Requests
            Self::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,

            // 500 Internal Server Error
            Self::Unknown | Self::InternalError | Self::DatabaseError | Self::ConfigError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            // 400 Bad Request: validation, duplicates, inventory
            Self::ValidationFailed
            | Self::InvalidRequest
            | Self::OrderEmpty
            | Self::InsufficientInventory
            | Self::CheckoutProductNotFound
            | Self::UsernameExists
            | Self::EmailExists => StatusCode::BAD_REQUEST,
        }
    }
}
