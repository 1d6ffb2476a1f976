//! Authorization predicates
//!
//! Pure functions of (caller, target). Handlers resolve the target first so
//! an unknown resource is a 404 before any ownership check.

use shared::AppError;
use shared::models::Order;

use crate::auth::CurrentUser;
use crate::security_log;

const OWNERSHIP_MESSAGE: &str = "You can only access your own data";

/// Caller must hold the admin role
pub fn require_admin(user: &CurrentUser) -> Result<(), AppError> {
    if user.is_admin() {
        return Ok(());
    }
    security_log!("WARN", "admin_required", username = user.username.clone());
    Err(AppError::admin_required())
}

/// Caller is the named account, or an admin
pub fn require_owner_or_admin(user: &CurrentUser, username: &str) -> Result<(), AppError> {
    if user.is_admin() || user.username == username {
        return Ok(());
    }
    security_log!(
        "WARN",
        "ownership_denied",
        username = user.username.clone(),
        target_user = username.to_string()
    );
    Err(AppError::ownership_required(OWNERSHIP_MESSAGE))
}

/// Caller placed the order, or is an admin
pub fn require_order_access(user: &CurrentUser, order: &Order) -> Result<(), AppError> {
    require_owner_or_admin(user, &order.username)
}
