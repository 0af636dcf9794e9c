//! 服务器状态

use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

use crate::core::events::CartEventBus;
use crate::core::Config;
use crate::preorder::FollowupWorker;
use crate::services::{Mailer, ResendMailer};

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc / Clone 实现浅拷贝，handler 侧克隆成本极低。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Db> | 嵌入式数据库 |
/// | cart_events | CartEventBus | cart.updated 事件总线 |
/// | mailer | Option<Arc<dyn Mailer>> | 确认邮件发送 (配置缺失 = None) |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// cart.updated 事件总线
    pub cart_events: CartEventBus,
    /// 确认邮件发送服务
    pub mailer: Option<Arc<dyn Mailer>>,
}

impl ServerState {
    /// 初始化服务器状态：打开数据库并装配服务
    pub async fn initialize(config: &Config) -> anyhow::Result<Self> {
        let data_dir = format!("{}/data", config.work_dir);
        std::fs::create_dir_all(&data_dir)?;

        let db = Surreal::new::<RocksDb>(data_dir.as_str()).await?;
        db.use_ns("preorder").use_db("main").await?;

        Ok(Self::with_db(config.clone(), db))
    }

    /// 使用已有数据库连接构造状态 (测试场景)
    pub fn with_db(config: Config, db: Surreal<Db>) -> Self {
        let mailer: Option<Arc<dyn Mailer>> = config
            .followup
            .clone()
            .map(|followup| Arc::new(ResendMailer::new(followup)) as Arc<dyn Mailer>);

        Self {
            config,
            db,
            cart_events: CartEventBus::new(),
            mailer,
        }
    }

    /// 启动后台任务
    ///
    /// Follow-up worker 只在邮件配置齐全时启动；缺失配置时 cart.updated
    /// 事件无人消费（部署层面的开关，不是错误）。
    pub fn start_background_tasks(&self) {
        match &self.mailer {
            Some(mailer) => {
                let worker = FollowupWorker::new(self.db.clone(), Arc::clone(mailer));
                let events = self.cart_events.subscribe();
                tokio::spawn(worker.run(events));
            }
            None => {
                tracing::info!(
                    "Follow-up mailer not configured (RESEND_API_KEY / PREORDER_FROM_EMAIL), worker disabled"
                );
            }
        }
    }
}
