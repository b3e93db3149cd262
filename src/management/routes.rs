//! # 路由配置
//!
//! 定义所有API路由和路由组织。`/error-logs` 下的全部路由
//! 都经过认证中间件，归属用户只来自校验后的令牌。

use crate::management::server::ManagementState;
use axum::Router;
use axum::routing::get;

/// 创建所有路由
pub fn create_routes(state: ManagementState) -> Router {
    Router::new()
        // 健康检查路由（无需认证）
        .nest("/health", health_routes())
        // 错误日志路由（需认证）
        .nest("/error-logs", error_log_routes(state.clone()))
        .with_state(state)
}

/// 健康检查路由
fn health_routes() -> Router<ManagementState> {
    Router::new().route(
        "/",
        get(crate::management::handlers::system::health_check),
    )
}

/// 错误日志路由
fn error_log_routes(state: ManagementState) -> Router<ManagementState> {
    use axum::routing::{post, put};
    Router::new()
        .route(
            "/",
            get(crate::management::handlers::error_logs::list_error_logs),
        )
        .route(
            "/",
            post(crate::management::handlers::error_logs::create_error_log),
        )
        // 统计接口要先于 {id} 注册，避免路径歧义
        .route(
            "/analytics",
            get(crate::management::handlers::analytics::get_analytics),
        )
        .route(
            "/{id}",
            get(crate::management::handlers::error_logs::get_error_log),
        )
        .route(
            "/{id}",
            put(crate::management::handlers::error_logs::update_error_log),
        )
        .route(
            "/{id}",
            axum::routing::delete(crate::management::handlers::error_logs::delete_error_log),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            crate::management::middleware::auth::auth,
        ))
}
