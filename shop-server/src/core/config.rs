use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::auth::JwtConfig;
use crate::core::ServerError;

/// 服务器配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖 (启动时先加载 `.env`)：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | HTTP_PORT (或 PORT) | 3000 | HTTP 服务端口 |
/// | DATABASE_PATH | data/database.json | JSON 数据库文件 |
/// | ENVIRONMENT | development | 运行环境 |
/// | JWT_SECRET | 开发环境随机生成 | HMAC 密钥 (>= 32 字符) |
/// | JWT_EXPIRATION_MINUTES | 1440 | 令牌有效期 |
/// | PAYMENT_SUCCESS_RATE | 0.9 | 模拟支付成功率 |
/// | PAYMENT_DELAY_MS | 100 | 模拟支付延迟 |
/// | LOGIN_DELAY_MS | 500 | 登录固定延迟 |
/// | REQUEST_TIMEOUT_MS | 30000 | 请求超时(毫秒) |
/// | MAX_BODY_BYTES | 10485760 | 请求体上限 |
/// | API_RATE_LIMIT | 100 | 每窗口每客户端请求数 |
/// | AUTH_RATE_LIMIT | 5 | 登录/注册每窗口请求数 |
/// | RATE_LIMIT_WINDOW_SECS | 900 | 限流窗口 (15 分钟) |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | - | 日志目录 (按天滚动) |
///
/// # 示例
///
/// ```ignore
/// HTTP_PORT=8080 DATABASE_PATH=/tmp/shop.json cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API 服务端口
    pub http_port: u16,
    /// JSON 数据库文件路径
    pub database_path: PathBuf,
    /// 运行环境: development | production
    pub environment: String,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    /// 模拟支付成功率 (0.0 - 1.0)
    pub payment_success_rate: f64,
    pub payment_delay_ms: u64,
    pub login_delay_ms: u64,
    /// 请求超时时间 (毫秒)
    pub request_timeout_ms: u64,
    pub max_body_bytes: usize,
    pub api_rate_limit: u32,
    pub auth_rate_limit: u32,
    pub rate_limit_window_secs: u64,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl Config {
    /// 默认配置 + 指定的 JWT 配置
    ///
    /// 常用于测试场景
    pub fn with_jwt(jwt: JwtConfig) -> Self {
        Self {
            http_port: 3000,
            database_path: PathBuf::from("data/database.json"),
            environment: "development".into(),
            jwt,
            payment_success_rate: 0.9,
            payment_delay_ms: 100,
            login_delay_ms: 500,
            request_timeout_ms: 30_000,
            max_body_bytes: 10 * 1024 * 1024,
            api_rate_limit: 100,
            auth_rate_limit: 5,
            rate_limit_window_secs: 900,
            log_level: "info".into(),
            log_dir: None,
        }
    }

    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值。无法解析的值视为未设置。
    pub fn from_env() -> Result<Self, ServerError> {
        let jwt = JwtConfig::from_env().map_err(|e| ServerError::Config(e.to_string()))?;
        let defaults = Self::with_jwt(jwt);

        let http_port = env_parse("HTTP_PORT")
            .or_else(|| env_parse("PORT"))
            .unwrap_or(defaults.http_port);

        let config = Self {
            http_port,
            database_path: std::env::var("DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.database_path),
            environment: std::env::var("ENVIRONMENT").unwrap_or(defaults.environment),
            payment_success_rate: env_parse("PAYMENT_SUCCESS_RATE")
                .unwrap_or(defaults.payment_success_rate),
            payment_delay_ms: env_parse("PAYMENT_DELAY_MS").unwrap_or(defaults.payment_delay_ms),
            login_delay_ms: env_parse("LOGIN_DELAY_MS").unwrap_or(defaults.login_delay_ms),
            request_timeout_ms: env_parse("REQUEST_TIMEOUT_MS")
                .unwrap_or(defaults.request_timeout_ms),
            max_body_bytes: env_parse("MAX_BODY_BYTES").unwrap_or(defaults.max_body_bytes),
            api_rate_limit: env_parse("API_RATE_LIMIT").unwrap_or(defaults.api_rate_limit),
            auth_rate_limit: env_parse("AUTH_RATE_LIMIT").unwrap_or(defaults.auth_rate_limit),
            rate_limit_window_secs: env_parse("RATE_LIMIT_WINDOW_SECS")
                .unwrap_or(defaults.rate_limit_window_secs),
            log_level: std::env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
            jwt: defaults.jwt,
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ServerError> {
        if !(0.0..=1.0).contains(&self.payment_success_rate) {
            return Err(ServerError::Config(format!(
                "PAYMENT_SUCCESS_RATE must be between 0 and 1, got {}",
                self.payment_success_rate
            )));
        }
        if self.rate_limit_window_secs == 0 {
            return Err(ServerError::Config(
                "RATE_LIMIT_WINDOW_SECS must be positive".into(),
            ));
        }
        Ok(())
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn payment_delay(&self) -> Duration {
        Duration::from_millis(self.payment_delay_ms)
    }

    pub fn login_delay(&self) -> Duration {
        Duration::from_millis(self.login_delay_ms)
    }

    pub fn rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.rate_limit_window_secs)
    }
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::with_jwt(JwtConfig::with_secret("x".repeat(32)));
        assert_eq!(config.http_port, 3000);
        assert_eq!(config.api_rate_limit, 100);
        assert_eq!(config.auth_rate_limit, 5);
        assert_eq!(config.rate_limit_window(), Duration::from_secs(900));
        assert_eq!(config.jwt.expiration_minutes, 1440);
        assert!(!config.is_production());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_success_rate() {
        let mut config = Config::with_jwt(JwtConfig::with_secret("x".repeat(32)));
        config.payment_success_rate = 1.5;
        assert!(matches!(config.validate(), Err(ServerError::Config(_))));
    }
}
