//! Preorder Server - 预购管理服务
//!
//! Admin-side customization service for an e-commerce platform: reads the
//! platform's cart and variant tables, exposes the preorder report, and
//! sends one-time preorder confirmation emails.
//!
//! # 模块结构
//!
//! ```text
//! preorder-server/src/
//! ├── core/          # 配置、状态、事件总线、服务器
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 数据库层 (models + repositories)
//! ├── preorder/      # 预购生命周期：标记、报表、导出、follow-up
//! ├── availability/  # 变体可售性
//! ├── services/      # 确认邮件发送
//! └── utils/         # 错误、日志、时间工具
//! ```

pub mod api;
pub mod availability;
pub mod core;
pub mod db;
pub mod preorder;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{CartEvent, CartEventBus, Config, FollowupConfig, Server, ServerState};
pub use crate::preorder::{CartMetadata, Flag, FollowupWorker};
pub use crate::services::{Mailer, MailerError};
pub use crate::utils::{AppError, AppResult};

// Re-export logger functions
pub use crate::utils::logger::{init_logger, init_logger_with_file};
