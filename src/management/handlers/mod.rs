//! # HTTP 处理器

pub mod analytics;
pub mod error_logs;
pub mod system;
