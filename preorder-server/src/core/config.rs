//! 服务器配置
//!
//! # 环境变量
//!
//! | 环境变量 | 默认值 | 说明 |
//! |----------|--------|------|
//! | WORK_DIR | /var/lib/preorder-server | 工作目录 (数据库、日志) |
//! | HTTP_PORT | 3000 | HTTP 服务端口 |
//! | ENVIRONMENT | development | 运行环境 |
//! | RESEND_API_KEY | (无) | Resend API key |
//! | PREORDER_FROM_EMAIL | (无) | 确认邮件发件地址 |
//! | PREORDER_REPLY_TO | (无) | 回复地址 (可选) |
//!
//! `RESEND_API_KEY` 和 `PREORDER_FROM_EMAIL` 都设置时才启用 follow-up
//! worker；缺失时 worker 不启动（静默关闭，不是错误）。
//!
//! # 示例
//!
//! ```ignore
//! WORK_DIR=/data/preorders HTTP_PORT=8080 cargo run
//! ```

/// 服务器配置
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库、日志等文件
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// Follow-up 邮件配置 (缺失 = worker 关闭)
    pub followup: Option<FollowupConfig>,
}

/// Follow-up 邮件发送配置
#[derive(Debug, Clone)]
pub struct FollowupConfig {
    /// Resend API key
    pub api_key: String,
    /// 发件地址
    pub from_email: String,
    /// 回复地址 (可选)
    pub reply_to: Option<String>,
}

fn non_empty(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|v| !v.is_empty())
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        let followup = match (non_empty("RESEND_API_KEY"), non_empty("PREORDER_FROM_EMAIL")) {
            (Some(api_key), Some(from_email)) => Some(FollowupConfig {
                api_key,
                from_email,
                reply_to: non_empty("PREORDER_REPLY_TO"),
            }),
            _ => None,
        };

        Self {
            work_dir: std::env::var("WORK_DIR")
                .unwrap_or_else(|_| "/var/lib/preorder-server".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            followup,
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
