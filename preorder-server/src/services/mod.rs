//! 服务模块
//!
//! - [`mailer`] - 确认邮件发送 (Resend HTTP API)

pub mod mailer;

pub use mailer::{Mailer, MailerError, ResendMailer};
