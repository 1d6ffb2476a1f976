//! User Repository

use shared::models::{Role, User, normalize_email};

use super::{RepoError, RepoResult, Repository};

pub type UserRepository = Repository<User>;

/// Already-validated profile changes; `None` leaves a field untouched
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub email: Option<String>,
    pub first: Option<String>,
    pub last: Option<String>,
    pub street_address: Option<String>,
    /// New Argon2 hash
    pub password_hash: Option<String>,
    pub role: Option<Role>,
}

impl Repository<User> {
    /// Case-insensitive email lookup
    pub fn find_by_email(&self, email: &str) -> Option<User> {
        let email = normalize_email(email);
        self.store().read(|doc| {
            doc.users
                .iter()
                .find(|u| normalize_email(&u.email) == email)
                .cloned()
        })
    }

    /// Insert a new account
    ///
    /// Username is checked before email, so a request colliding on both
    /// reports the username.
    pub fn create(&self, user: User) -> RepoResult<User> {
        self.store().write(|doc| {
            if doc.user(&user.username).is_some() {
                return Err(RepoError::Duplicate("username".into()));
            }
            let email = normalize_email(&user.email);
            if doc.users.iter().any(|u| normalize_email(&u.email) == email) {
                return Err(RepoError::Duplicate("email".into()));
            }
            doc.users.push(user.clone());
            Ok(user)
        })
    }

    /// Apply profile changes
    ///
    /// An email already owned by another account is rejected as `Duplicate("email")`.
    pub fn update(&self, username: &str, changes: UserChanges) -> RepoResult<User> {
        self.store().write(|doc| {
            if let Some(email) = &changes.email {
                let email = normalize_email(email);
                let taken = doc
                    .users
                    .iter()
                    .any(|u| u.username != username && normalize_email(&u.email) == email);
                if taken {
                    return Err(RepoError::Duplicate("email".into()));
                }
            }

            let user = doc
                .users
                .iter_mut()
                .find(|u| u.username == username)
                .ok_or_else(|| RepoError::NotFound(format!("user {}", username)))?;

            if let Some(email) = changes.email {
                user.email = normalize_email(&email);
            }
            if let Some(first) = changes.first {
                user.first = first;
            }
            if let Some(last) = changes.last {
                user.last = last;
            }
            if let Some(street_address) = changes.street_address {
                user.street_address = street_address;
            }
            if let Some(hash) = changes.password_hash {
                user.password = hash;
            }
            if let Some(role) = changes.role {
                user.role = role;
            }
            Ok(user.clone())
        })
    }
}
