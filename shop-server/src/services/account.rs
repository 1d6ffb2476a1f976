//! Account Service
//!
//! Registration, login and profile management.

use std::sync::Arc;
use std::time::Duration;

use shared::client::{LoginRequest, LoginResponse, UserInfo};
use shared::models::{Order, RegisterRequest, Role, User, UserProfile, UserUpdate, normalize_email};
use shared::{AppError, AppResult, ErrorCode};
use validator::Validate;

use crate::auth::{CurrentUser, JwtService, hash_password, require_owner_or_admin, verify_password};
use crate::db::repository::{OrderRepository, RepoError, UserChanges, UserRepository};
use crate::security_log;

#[derive(Debug, Clone)]
pub struct AccountService {
    users: UserRepository,
    orders: OrderRepository,
    jwt: Arc<JwtService>,
    /// Applied to every login attempt so response time carries no signal
    login_delay: Duration,
}

impl AccountService {
    pub fn new(
        users: UserRepository,
        orders: OrderRepository,
        jwt: Arc<JwtService>,
        login_delay: Duration,
    ) -> Self {
        Self {
            users,
            orders,
            jwt,
            login_delay,
        }
    }

    /// Create an account with role `user`
    pub fn register(&self, req: RegisterRequest) -> AppResult<UserProfile> {
        req.validate()?;

        // Cheap pre-check so a duplicate never pays for hashing
        if self.users.find_by_id(&req.username).is_some() {
            return Err(username_taken());
        }
        if self.users.find_by_email(&req.email).is_some() {
            return Err(email_taken());
        }

        let user = User {
            username: req.username,
            email: normalize_email(&req.email),
            password: hash_password(&req.password)?,
            first: req.first,
            last: req.last,
            street_address: req.street_address,
            role: Role::User,
        };

        let user = self.users.create(user).map_err(map_user_error)?;
        tracing::info!(username = %user.username, "User registered");
        Ok(UserProfile::from(user))
    }

    /// Check credentials and issue a token
    ///
    /// Unknown username and wrong password produce the same error.
    pub async fn login(&self, req: LoginRequest) -> AppResult<LoginResponse> {
        req.validate()?;

        let user = self.users.find_by_id(&req.username);

        tokio::time::sleep(self.login_delay).await;

        let user = match user {
            Some(user) if verify_password(&req.password, &user.password) => user,
            Some(_) => {
                security_log!(
                    "WARN",
                    "login_failed",
                    username = req.username.clone(),
                    reason = "invalid_password"
                );
                return Err(AppError::invalid_credentials());
            }
            None => {
                security_log!(
                    "WARN",
                    "login_failed",
                    username = req.username.clone(),
                    reason = "user_not_found"
                );
                return Err(AppError::invalid_credentials());
            }
        };

        let token = self
            .jwt
            .generate_token(&user)
            .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

        tracing::info!(
            username = %user.username,
            role = %user.role,
            "User logged in successfully"
        );

        Ok(LoginResponse {
            message: "Login successful".to_string(),
            token,
            user: UserInfo::from(&user),
        })
    }

    /// Profile of `username`; owner or admin only
    pub fn profile(&self, caller: &CurrentUser, username: &str) -> AppResult<UserProfile> {
        require_owner_or_admin(caller, username)?;
        self.users
            .find_by_id(username)
            .map(UserProfile::from)
            .ok_or_else(user_not_found)
    }

    /// Partial profile update; owner or admin only, role changes admin only
    pub fn update(
        &self,
        caller: &CurrentUser,
        username: &str,
        update: UserUpdate,
    ) -> AppResult<UserProfile> {
        require_owner_or_admin(caller, username)?;
        update.validate()?;

        if update.role.is_some() && !caller.is_admin() {
            security_log!(
                "WARN",
                "role_change_denied",
                username = caller.username.clone(),
                target_user = username.to_string()
            );
            return Err(AppError::admin_required());
        }
        if self.users.find_by_id(username).is_none() {
            return Err(user_not_found());
        }

        let password_hash = update
            .password
            .as_deref()
            .map(hash_password)
            .transpose()?;

        let changes = UserChanges {
            email: update.email,
            first: update.first,
            last: update.last,
            street_address: update.street_address,
            password_hash,
            role: update.role,
        };

        let user = self.users.update(username, changes).map_err(map_user_error)?;
        tracing::info!(username = %user.username, updated_by = %caller.username, "User updated");
        Ok(UserProfile::from(user))
    }

    /// Orders placed by `username`; owner or admin only
    pub fn orders_of(&self, caller: &CurrentUser, username: &str) -> AppResult<Vec<Order>> {
        require_owner_or_admin(caller, username)?;
        if self.users.find_by_id(username).is_none() {
            return Err(user_not_found());
        }
        Ok(self.orders.find_by_username(username))
    }
}

fn username_taken() -> AppError {
    AppError::with_message(ErrorCode::UsernameExists, "Please choose a different username")
}

fn email_taken() -> AppError {
    AppError::with_message(ErrorCode::EmailExists, "Please use a different email address")
}

fn user_not_found() -> AppError {
    AppError::with_message(ErrorCode::UserNotFound, "The requested user does not exist")
}

fn map_user_error(err: RepoError) -> AppError {
    match err {
        RepoError::Duplicate(field) if field == "username" => username_taken(),
        RepoError::Duplicate(_) => email_taken(),
        RepoError::NotFound(_) => user_not_found(),
        other => other.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::JwtConfig;
    use crate::db::repository::Repository;
    use crate::db::{MemoryBackend, Store};
    use http::StatusCode;

    fn service() -> AccountService {
        let store = Arc::new(Store::open(MemoryBackend::new()));
        AccountService::new(
            Repository::new(store.clone()),
            Repository::new(store),
            Arc::new(JwtService::with_config(JwtConfig::with_secret(
                "test-secret-test-secret-test-secret-0123",
            ))),
            Duration::ZERO,
        )
    }

    fn register_req(username: &str, email: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: "user123".to_string(),
            first: "John".to_string(),
            last: "Doe".to_string(),
            street_address: "456 User Avenue".to_string(),
        }
    }

    fn caller(username: &str, role: Role) -> CurrentUser {
        CurrentUser {
            username: username.to_string(),
            role,
            email: format!("{username}@example.com"),
        }
    }

    #[test]
    fn test_register_hashes_password_and_defaults_role() {
        let service = service();
        let profile = service
            .register(register_req("john_doe", "John@Example.com"))
            .unwrap();
        assert_eq!(profile.role, Role::User);
        assert_eq!(profile.email, "john@example.com");

        let stored = service.users.find_by_id("john_doe").unwrap();
        assert_ne!(stored.password, "user123");
        assert!(verify_password("user123", &stored.password));
    }

    #[test]
    fn test_register_duplicates_change_nothing() {
        let service = service();
        service.register(register_req("john_doe", "john@example.com")).unwrap();

        let err = service
            .register(register_req("john_doe", "other@example.com"))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::UsernameExists);
        assert_eq!(err.http_status(), StatusCode::BAD_REQUEST);

        let err = service
            .register(register_req("johnny", "JOHN@example.com"))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::EmailExists);

        assert_eq!(service.users.find_all().len(), 1);
    }

    #[test]
    fn test_register_validation() {
        let err = service()
            .register(register_req("x", "not-an-email"))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn test_login_success() {
        let service = service();
        service.register(register_req("john_doe", "john@example.com")).unwrap();

        let res = service
            .login(LoginRequest {
                username: "john_doe".to_string(),
                password: "user123".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(res.message, "Login successful");
        assert_eq!(res.user.username, "john_doe");

        let claims = service.jwt.validate_token(&res.token).unwrap();
        assert_eq!(claims.username, "john_doe");
        assert_eq!(claims.email, "john@example.com");
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let service = service();
        service.register(register_req("john_doe", "john@example.com")).unwrap();

        let wrong_password = service
            .login(LoginRequest {
                username: "john_doe".to_string(),
                password: "nope".to_string(),
            })
            .await
            .unwrap_err();
        let unknown_user = service
            .login(LoginRequest {
                username: "ghost".to_string(),
                password: "user123".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(wrong_password.code, unknown_user.code);
        assert_eq!(wrong_password.message, unknown_user.message);
        assert_eq!(wrong_password.http_status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_profile_access() {
        let service = service();
        service.register(register_req("john_doe", "john@example.com")).unwrap();

        assert!(service.profile(&caller("john_doe", Role::User), "john_doe").is_ok());
        assert!(service.profile(&caller("admin", Role::Admin), "john_doe").is_ok());

        let err = service
            .profile(&caller("jane_smith", Role::User), "john_doe")
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::OwnershipRequired);

        let err = service
            .profile(&caller("admin", Role::Admin), "ghost")
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::UserNotFound);
    }

    #[test]
    fn test_update_rehashes_password() {
        let service = service();
        service.register(register_req("john_doe", "john@example.com")).unwrap();

        let profile = service
            .update(
                &caller("john_doe", Role::User),
                "john_doe",
                UserUpdate {
                    password: Some("newpass1".to_string()),
                    last: Some("Dough".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(profile.last, "Dough");

        let stored = service.users.find_by_id("john_doe").unwrap();
        assert!(verify_password("newpass1", &stored.password));
        assert!(!verify_password("user123", &stored.password));
    }

    #[test]
    fn test_update_role_requires_admin() {
        let service = service();
        service.register(register_req("john_doe", "john@example.com")).unwrap();

        let err = service
            .update(
                &caller("john_doe", Role::User),
                "john_doe",
                UserUpdate {
                    role: Some(Role::Admin),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::AdminRequired);

        let profile = service
            .update(
                &caller("admin", Role::Admin),
                "john_doe",
                UserUpdate {
                    role: Some(Role::Admin),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(profile.role, Role::Admin);
    }

    #[test]
    fn test_update_email_conflict() {
        let service = service();
        service.register(register_req("john_doe", "john@example.com")).unwrap();
        service.register(register_req("jane_smith", "jane@example.com")).unwrap();

        let err = service
            .update(
                &caller("jane_smith", Role::User),
                "jane_smith",
                UserUpdate {
                    email: Some("john@example.com".to_string()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::EmailExists);
        assert_eq!(
            service.users.find_by_id("jane_smith").unwrap().email,
            "jane@example.com"
        );
    }

    #[test]
    fn test_orders_of_unknown_user() {
        let err = service()
            .orders_of(&caller("admin", Role::Admin), "ghost")
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::UserNotFound);
    }
}
