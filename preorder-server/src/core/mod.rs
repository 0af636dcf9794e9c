//! 核心模块 - 配置、状态、事件、服务器

pub mod config;
pub mod events;
pub mod server;
pub mod state;

pub use config::{Config, FollowupConfig};
pub use events::{CartEvent, CartEventBus};
pub use server::Server;
pub use state::ServerState;
