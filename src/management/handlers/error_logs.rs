//! # 错误日志处理器
//!
//! 处理 HTTP 请求，委托具体业务给 `ErrorLogsService`。

use crate::{
    logging::{LogComponent, LogStage, log_handler_error},
    management::{
        middleware::{RequestId, auth::AuthContext},
        response,
        server::ManagementState,
        services::error_logs::{ErrorLogListQuery, ErrorLogPayload, ErrorLogsService},
    },
};
use axum::{
    Json,
    extract::{Extension, Path, Query, State},
    response::IntoResponse,
};
use std::sync::Arc;

/// 创建错误日志
pub async fn create_error_log(
    State(state): State<ManagementState>,
    Extension(request_id): Extension<RequestId>,
    Extension(auth_context): Extension<Arc<AuthContext>>,
    Json(payload): Json<ErrorLogPayload>,
) -> impl IntoResponse {
    let service = ErrorLogsService::new(state.database.as_ref());
    match service.create(auth_context.user_id, &payload).await {
        Ok(created) => response::success_with_message(created, "Error log created successfully"),
        Err(err) => {
            log_handler_error(
                request_id.as_str(),
                LogStage::Internal,
                LogComponent::ErrorLog,
                "create_error_log_fail",
                "创建错误日志失败",
                &err,
            );
            response::app_error(err)
        }
    }
}

/// 获取错误日志列表
pub async fn list_error_logs(
    State(state): State<ManagementState>,
    Query(query): Query<ErrorLogListQuery>,
    Extension(request_id): Extension<RequestId>,
    Extension(auth_context): Extension<Arc<AuthContext>>,
) -> impl IntoResponse {
    let service = ErrorLogsService::new(state.database.as_ref());
    match service.list(auth_context.user_id, &query).await {
        Ok(result) => response::paginated(result.error_logs, result.pagination.into()),
        Err(err) => {
            log_handler_error(
                request_id.as_str(),
                LogStage::Internal,
                LogComponent::ErrorLog,
                "list_error_logs_fail",
                "获取错误日志列表失败",
                &err,
            );
            response::app_error(err)
        }
    }
}

/// 获取错误日志详情
pub async fn get_error_log(
    State(state): State<ManagementState>,
    Path(id): Path<i32>,
    Extension(request_id): Extension<RequestId>,
    Extension(auth_context): Extension<Arc<AuthContext>>,
) -> impl IntoResponse {
    let service = ErrorLogsService::new(state.database.as_ref());
    match service.get(auth_context.user_id, id).await {
        Ok(log) => response::success(log),
        Err(err) => {
            log_handler_error(
                request_id.as_str(),
                LogStage::Internal,
                LogComponent::ErrorLog,
                "get_error_log_fail",
                "获取错误日志详情失败",
                &err,
            );
            response::app_error(err)
        }
    }
}

/// 更新错误日志
pub async fn update_error_log(
    State(state): State<ManagementState>,
    Path(id): Path<i32>,
    Extension(request_id): Extension<RequestId>,
    Extension(auth_context): Extension<Arc<AuthContext>>,
    Json(payload): Json<ErrorLogPayload>,
) -> impl IntoResponse {
    let service = ErrorLogsService::new(state.database.as_ref());
    match service.update(auth_context.user_id, id, &payload).await {
        Ok(updated) => response::success_with_message(updated, "Error log updated successfully"),
        Err(err) => {
            log_handler_error(
                request_id.as_str(),
                LogStage::Internal,
                LogComponent::ErrorLog,
                "update_error_log_fail",
                "更新错误日志失败",
                &err,
            );
            response::app_error(err)
        }
    }
}

/// 删除错误日志
pub async fn delete_error_log(
    State(state): State<ManagementState>,
    Path(id): Path<i32>,
    Extension(request_id): Extension<RequestId>,
    Extension(auth_context): Extension<Arc<AuthContext>>,
) -> impl IntoResponse {
    let service = ErrorLogsService::new(state.database.as_ref());
    match service.delete(auth_context.user_id, id).await {
        Ok(()) => response::success_without_data("Error log deleted successfully"),
        Err(err) => {
            log_handler_error(
                request_id.as_str(),
                LogStage::Internal,
                LogComponent::ErrorLog,
                "delete_error_log_fail",
                "删除错误日志失败",
                &err,
            );
            response::app_error(err)
        }
    }
}
