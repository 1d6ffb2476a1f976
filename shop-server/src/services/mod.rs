//! 服务层
//!
//! # 服务列表
//!
//! - [`CatalogService`] - 商品目录 (列表、搜索、管理)
//! - [`AccountService`] - 注册、登录、用户资料
//! - [`OrderService`] - 订单查询与结账
//! - [`PaymentGateway`] - 支付网关 (模拟实现 [`MockPaymentGateway`])

pub mod account;
pub mod catalog;
pub mod orders;
pub mod payment;

pub use account::AccountService;
pub use catalog::CatalogService;
pub use orders::OrderService;
pub use payment::{MockPaymentGateway, PaymentError, PaymentGateway, PaymentReceipt};
