//! # 管理API模块
//!
//! 提供RESTful API接口用于错误日志管理与统计

pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod services;

pub use routes::create_routes;
pub use server::{ManagementConfig, ManagementServer, ManagementState};
