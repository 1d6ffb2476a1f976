//! 认证授权模块
//!
//! 提供 JWT 认证、密码哈希和访问策略：
//! - [`JwtService`] - JWT 令牌服务
//! - [`CurrentUser`] / [`AdminUser`] - 请求提取器
//! - [`require_admin`] / [`require_owner_or_admin`] / [`require_order_access`] - 访问策略
//! - [`hash_password`] / [`verify_password`] - Argon2 密码

pub mod extractor;
pub mod jwt;
pub mod password;
pub mod policy;

pub use extractor::AdminUser;
pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use password::{PasswordError, hash_password, verify_password};
pub use policy::{require_admin, require_order_access, require_owner_or_admin};
