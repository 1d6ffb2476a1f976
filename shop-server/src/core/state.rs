use std::sync::Arc;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::{JsonFileBackend, StorageBackend, Store};
use crate::db::repository::Repository;
use crate::middleware::RateLimiter;
use crate::services::{
    AccountService, CatalogService, MockPaymentGateway, OrderService, PaymentGateway,
};

/// 服务器状态 - 持有所有服务的单例引用
///
/// 使用 Arc 实现浅拷贝，每个请求克隆一次。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | store | Arc<Store> | JSON 文档存储 |
/// | jwt_service | Arc<JwtService> | JWT 认证服务 |
/// | catalog | CatalogService | 商品目录 |
/// | accounts | AccountService | 注册、登录、用户资料 |
/// | orders | OrderService | 订单与结账 |
/// | rate_limiter | Arc<RateLimiter> | 按客户端限流 |
///
/// # 使用示例
///
/// ```ignore
/// let products = state.catalog.list();
/// let jwt = state.get_jwt_service();
/// ```
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    pub store: Arc<Store>,
    /// JWT 认证服务 (Arc 共享所有权)
    pub jwt_service: Arc<JwtService>,
    pub catalog: CatalogService,
    pub accounts: AccountService,
    pub orders: OrderService,
    pub rate_limiter: Arc<RateLimiter>,
}

impl ServerState {
    /// 用指定的存储后端和支付网关构造状态
    ///
    /// 测试使用 `MemoryBackend` 和确定性的支付网关
    pub fn new(
        config: Config,
        backend: impl StorageBackend + 'static,
        gateway: Arc<dyn PaymentGateway>,
    ) -> Self {
        let store = Arc::new(Store::open(backend));
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        let catalog = CatalogService::new(Repository::new(store.clone()));
        let accounts = AccountService::new(
            Repository::new(store.clone()),
            Repository::new(store.clone()),
            jwt_service.clone(),
            config.login_delay(),
        );
        let orders = OrderService::new(store.clone(), gateway);
        let rate_limiter = Arc::new(RateLimiter::new(
            config.rate_limit_window(),
            config.api_rate_limit,
            config.auth_rate_limit,
        ));

        Self {
            config,
            store,
            jwt_service,
            catalog,
            accounts,
            orders,
            rate_limiter,
        }
    }

    /// 初始化服务器状态
    ///
    /// 1. 打开 JSON 数据库 (`DATABASE_PATH`，读取失败时以空库启动)
    /// 2. 模拟支付网关 (`PAYMENT_SUCCESS_RATE`, `PAYMENT_DELAY_MS`)
    /// 3. 各服务 (Catalog, Account, Order, JWT, RateLimiter)
    pub fn initialize(config: &Config) -> Self {
        let backend = JsonFileBackend::new(&config.database_path);
        let gateway = Arc::new(MockPaymentGateway::new(
            config.payment_success_rate,
            config.payment_delay(),
        ));
        Self::new(config.clone(), backend, gateway)
    }

    /// 获取 JWT 服务
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
