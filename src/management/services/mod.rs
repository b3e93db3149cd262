//! # 服务层
//!
//! handler 只做协议转换，具体业务集中在这里，便于复用与测试。

pub mod analytics;
pub mod error_logs;
pub mod shared;

pub use analytics::{AnalyticsResponse, AnalyticsService};
pub use error_logs::{
    ErrorLogFilter, ErrorLogListQuery, ErrorLogListResult, ErrorLogPayload, ErrorLogResponse,
    ErrorLogsService,
};
pub use shared::{PaginationInfo, PaginationParams, build_page};
