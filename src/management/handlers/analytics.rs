//! # 统计分析处理器

use crate::{
    logging::{LogComponent, LogStage, log_handler_error},
    management::{
        middleware::{RequestId, auth::AuthContext},
        response,
        server::ManagementState,
        services::analytics::AnalyticsService,
    },
};
use axum::{
    extract::{Extension, State},
    response::IntoResponse,
};
use std::sync::Arc;

/// 获取当前用户的统计分析数据
pub async fn get_analytics(
    State(state): State<ManagementState>,
    Extension(request_id): Extension<RequestId>,
    Extension(auth_context): Extension<Arc<AuthContext>>,
) -> impl IntoResponse {
    let service = AnalyticsService::new(state.database.as_ref());
    match service.analytics(auth_context.user_id).await {
        Ok(bundle) => response::success(bundle),
        Err(err) => {
            log_handler_error(
                request_id.as_str(),
                LogStage::Internal,
                LogComponent::Analytics,
                "get_analytics_fail",
                "获取统计分析失败",
                &err,
            );
            response::app_error(err)
        }
    }
}
