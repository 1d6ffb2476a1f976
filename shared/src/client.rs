//! Client-related types shared between server and client
//!
//! Auth request/response types used in API communication.

use crate::models::{Role, User, serde_helpers};
use serde::{Deserialize, Serialize};
use validator::Validate;

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Login request
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default, deserialize_with = "serde_helpers::trimmed")]
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub user: UserInfo,
}

/// User information returned on login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub username: String,
    pub email: String,
    pub first: String,
    pub last: String,
    pub role: Role,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone(),
            first: user.first.clone(),
            last: user.last.clone(),
            role: user.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_requires_both_fields() {
        let req: LoginRequest = serde_json::from_str(r#"{"username":"  "}"#).unwrap();
        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("username"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn test_user_info_from_user() {
        let user = User {
            username: "jane_smith".to_string(),
            email: "jane@example.com".to_string(),
            password: "hash".to_string(),
            first: "Jane".to_string(),
            last: "Smith".to_string(),
            street_address: "789 Customer Lane".to_string(),
            role: Role::User,
        };
        let json = serde_json::to_value(UserInfo::from(&user)).unwrap();
        assert_eq!(json["username"], "jane_smith");
        assert_eq!(json["role"], "user");
        assert!(json.get("street_address").is_none());
        assert!(json.get("password").is_none());
    }
}
