//! # 日志模块
//!
//! 基于 `tracing` 的结构化日志：统一的初始化入口，以及携带
//! 请求ID/阶段/组件/事件字段的便捷宏。

use std::env;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// 日志所处的处理阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogStage {
    Startup,
    Shutdown,
    Authentication,
    RequestReceived,
    Validation,
    Db,
    Internal,
    Response,
}

impl LogStage {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Startup => "startup",
            Self::Shutdown => "shutdown",
            Self::Authentication => "authentication",
            Self::RequestReceived => "request_received",
            Self::Validation => "validation",
            Self::Db => "db",
            Self::Internal => "internal",
            Self::Response => "response",
        }
    }
}

/// 产生日志的组件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogComponent {
    Main,
    Database,
    ServerSetup,
    Auth,
    ErrorLog,
    Analytics,
}

impl LogComponent {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Database => "database",
            Self::ServerSetup => "server_setup",
            Self::Auth => "auth",
            Self::ErrorLog => "error_log",
            Self::Analytics => "analytics",
        }
    }
}

/// info 级别结构化日志
#[macro_export]
macro_rules! linfo {
    ($request_id:expr, $stage:expr, $component:expr, $event:expr, $message:expr) => {
        tracing::info!(
            request_id = %$request_id,
            stage = $stage.as_str(),
            component = $component.as_str(),
            event = $event,
            "{}",
            $message
        )
    };
}

/// warn 级别结构化日志
#[macro_export]
macro_rules! lwarn {
    ($request_id:expr, $stage:expr, $component:expr, $event:expr, $message:expr) => {
        tracing::warn!(
            request_id = %$request_id,
            stage = $stage.as_str(),
            component = $component.as_str(),
            event = $event,
            "{}",
            $message
        )
    };
}

/// error 级别结构化日志
#[macro_export]
macro_rules! lerror {
    ($request_id:expr, $stage:expr, $component:expr, $event:expr, $message:expr) => {
        tracing::error!(
            request_id = %$request_id,
            stage = $stage.as_str(),
            component = $component.as_str(),
            event = $event,
            "{}",
            $message
        )
    };
}

/// HTTP 处理器出错时的统一记录入口
///
/// 错误明细只进入日志，响应端由 `ApiResponse` 负责脱敏。
pub fn log_handler_error(
    request_id: &str,
    stage: LogStage,
    component: LogComponent,
    event: &str,
    message: &str,
    err: &crate::error::TrackerError,
) {
    crate::lerror!(
        request_id,
        stage,
        component,
        event,
        &format!("{message}: {err:?}")
    );
}

/// 初始化日志系统
///
/// 默认过滤规则压低 `sqlx`/`sea_orm` 的查询日志噪音，
/// `RUST_LOG` 环境变量优先于传入的级别。
pub fn init_logging(log_level: Option<&String>) {
    let level = log_level.map_or("info", std::string::String::as_str);

    let default_filter = format!("{level},error_tracker=debug,sqlx::query=off,sea_orm::query=warn,sqlx=warn");

    let log_filter = env::var("RUST_LOG").unwrap_or(default_filter);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| log_filter.into()))
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_thread_ids(false)
                .with_thread_names(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}
