//! # 配置模块
//!
//! TOML 配置文件加载 + 环境变量覆盖

pub mod app_config;
pub mod database;

pub use app_config::{AppConfig, AuthConfig};
pub use database::DatabaseConfig;
