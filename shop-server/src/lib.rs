//! Shop Server - 电商 REST API
//!
//! # 架构概述
//!
//! - **数据库** (`db`): 单文件 JSON 文档存储，单写者事务
//! - **认证** (`auth`): JWT + Argon2 认证体系
//! - **服务** (`services`): 商品目录、账户、订单结账、模拟支付
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! shop-server/src/
//! ├── core/          # 配置、状态、错误、服务器
//! ├── auth/          # JWT 认证、权限策略
//! ├── db/            # JSON 文档存储与仓储
//! ├── services/      # 业务服务
//! ├── api/           # HTTP 路由和处理器
//! ├── middleware/    # 请求日志、限流
//! ├── routes/        # 路由组装与中间件栈
//! └── utils/         # 日志
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerError, ServerState};
pub use routes::build_app;
pub use shared::{AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr $(, $key:ident = $value:expr)* $(,)?) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 设置运行环境: 加载 `.env`，初始化日志
///
/// 日志级别和目录在配置加载之前就需要，所以直接读取 `LOG_LEVEL` / `LOG_DIR`。
pub fn setup_environment() {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty());
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());
}

pub fn print_banner() {
    println!(
        r#"
   _____ __                   _____
  / ___// /_  ____  ____     / ___/___  ______   _____  _____
  \__ \/ __ \/ __ \/ __ \    \__ \/ _ \/ ___/ | / / _ \/ ___/
 ___/ / / / / /_/ / /_/ /   ___/ /  __/ /   | |/ /  __/ /
/____/_/ /_/\____/ .___/   /____/\___/_/    |___/\___/_/
                /_/
    "#
    );
}
