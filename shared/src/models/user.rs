//! User Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::{Validate, ValidationError};

/// Account role
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored account record, including the password hash
///
/// Never serialize this into a response; convert to [`UserProfile`] first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub email: String,
    /// Argon2 PHC string
    pub password: String,
    pub first: String,
    pub last: String,
    pub street_address: String,
    #[serde(default)]
    pub role: Role,
}

/// Account profile without the password hash
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    pub email: String,
    pub first: String,
    pub last: String,
    pub street_address: String,
    pub role: Role,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone(),
            first: user.first.clone(),
            last: user.last.clone(),
            street_address: user.street_address.clone(),
            role: user.role,
        }
    }
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            username: user.username,
            email: user.email,
            first: user.first,
            last: user.last,
            street_address: user.street_address,
            role: user.role,
        }
    }
}

/// Registration payload (`POST /register`)
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default, deserialize_with = "serde_helpers::trimmed")]
    #[validate(
        length(min = 3, max = 20, message = "Username must be between 3 and 20 characters"),
        custom(function = "validate_username_chars")
    )]
    pub username: String,
    #[serde(default, deserialize_with = "serde_helpers::trimmed")]
    #[validate(email(message = "Please provide a valid email address"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: String,
    #[serde(default, deserialize_with = "serde_helpers::trimmed")]
    #[validate(length(min = 1, message = "First name is required"))]
    pub first: String,
    #[serde(default, deserialize_with = "serde_helpers::trimmed")]
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last: String,
    #[serde(default, deserialize_with = "serde_helpers::trimmed")]
    #[validate(length(min = 1, message = "Street address is required"))]
    pub street_address: String,
}

/// Profile update payload (`PATCH /users/{username}`)
///
/// The username is the identifier and cannot be changed.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UserUpdate {
    #[serde(default, deserialize_with = "serde_helpers::trimmed_opt")]
    #[validate(email(message = "Please provide a valid email address"))]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "serde_helpers::trimmed_opt")]
    #[validate(length(min = 1, message = "First name cannot be empty"))]
    pub first: Option<String>,
    #[serde(default, deserialize_with = "serde_helpers::trimmed_opt")]
    #[validate(length(min = 1, message = "Last name cannot be empty"))]
    pub last: Option<String>,
    #[serde(default, deserialize_with = "serde_helpers::trimmed_opt")]
    #[validate(length(min = 1, message = "Street address cannot be empty"))]
    pub street_address: Option<String>,
    #[serde(default)]
    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: Option<String>,
    /// Admin callers only
    #[serde(default)]
    pub role: Option<Role>,
}

/// Lower-case and trim an email so lookups are case-insensitive
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn validate_username_chars(username: &str) -> Result<(), ValidationError> {
    if username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        Ok(())
    } else {
        Err(ValidationError::new("username_chars").with_message(
            "Username can only contain letters, numbers, and underscores".into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(username: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            first: "Ada".to_string(),
            last: "Lovelace".to_string(),
            street_address: "1 Analytical Way".to_string(),
        }
    }

    #[test]
    fn test_role_serde() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        let role: Role = serde_json::from_str("\"user\"").unwrap();
        assert_eq!(role, Role::User);
        assert!(serde_json::from_str::<Role>("\"root\"").is_err());
        assert!(Role::Admin.is_admin());
    }

    #[test]
    fn test_profile_hides_password() {
        let user = User {
            username: "ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "$argon2id$v=19$secret".to_string(),
            first: "Ada".to_string(),
            last: "Lovelace".to_string(),
            street_address: "1 Analytical Way".to_string(),
            role: Role::User,
        };
        let json = serde_json::to_value(UserProfile::from(&user)).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["role"], "user");
    }

    #[test]
    fn test_register_valid() {
        assert!(register("ada_99", "ada@example.com", "secret1").validate().is_ok());
    }

    #[test]
    fn test_register_username_rules() {
        assert!(register("ab", "ada@example.com", "secret1").validate().is_err());
        assert!(
            register("a_very_long_username_x", "ada@example.com", "secret1")
                .validate()
                .is_err()
        );
        let errors = register("ada-lovelace", "ada@example.com", "secret1")
            .validate()
            .unwrap_err();
        assert!(errors.field_errors().contains_key("username"));
    }

    #[test]
    fn test_register_email_and_password() {
        let errors = register("ada", "not-an-email", "12345").validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn test_update_optional_fields() {
        let update: UserUpdate = serde_json::from_str(r#"{"first":"Grace"}"#).unwrap();
        assert!(update.validate().is_ok());

        let update: UserUpdate = serde_json::from_str(r#"{"first":"  "}"#).unwrap();
        assert!(update.validate().is_err());

        let update: UserUpdate = serde_json::from_str(r#"{"role":"admin"}"#).unwrap();
        assert_eq!(update.role, Some(Role::Admin));
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Ada@Example.COM "), "ada@example.com");
    }
}
