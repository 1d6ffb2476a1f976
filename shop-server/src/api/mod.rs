//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 注册与登录
//! - [`products`] - 商品目录接口
//! - [`users`] - 用户资料接口
//! - [`orders`] - 订单与结账接口

pub mod extract;

pub mod auth;
pub mod health;
pub mod orders;
pub mod products;
pub mod users;

pub use extract::{AppJson, AppQuery};
pub use shared::{AppError, AppResult};
