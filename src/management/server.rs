//! # 管理服务器
//!
//! Axum HTTP服务器，提供错误日志管理与统计API

use crate::auth::JwtManager;
use crate::config::AppConfig;
use crate::error::Result;
use crate::logging::{LogComponent, LogStage};
use crate::{linfo, lwarn, tracker_err};
use axum::Router;
use axum::routing::get;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// 管理服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagementConfig {
    /// 监听地址
    pub bind_address: String,
    /// 监听端口
    pub port: u16,
    /// 是否启用CORS
    pub enable_cors: bool,
    /// 允许的CORS源地址
    pub cors_origins: Vec<String>,
    /// API前缀
    pub api_prefix: String,
}

impl Default for ManagementConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 5000,
            enable_cors: true,
            cors_origins: vec!["*".to_string()],
            api_prefix: "/api".to_string(),
        }
    }
}

/// 管理服务器应用状态
#[derive(Clone)]
pub struct ManagementState {
    /// 数据库连接
    pub database: Arc<DatabaseConnection>,
    /// JWT 校验器
    jwt: Arc<JwtManager>,
}

impl ManagementState {
    #[must_use]
    pub fn new(database: Arc<DatabaseConnection>, jwt: Arc<JwtManager>) -> Self {
        Self { database, jwt }
    }

    #[must_use]
    pub fn jwt_manager(&self) -> &JwtManager {
        &self.jwt
    }
}

/// 管理服务器
pub struct ManagementServer {
    /// 配置
    config: ManagementConfig,
    /// 路由器
    router: Router,
}

impl ManagementServer {
    /// 创建新的管理服务器
    pub fn new(config: &AppConfig, database: Arc<DatabaseConnection>) -> Self {
        let jwt = Arc::new(JwtManager::new(
            &config.auth.jwt_secret,
            config.auth.token_expire_hours,
        ));
        let state = ManagementState::new(database, jwt);
        let router = Self::create_router(state, &config.server);

        Self {
            config: config.server.clone(),
            router,
        }
    }

    /// 创建路由器
    fn create_router(state: ManagementState, config: &ManagementConfig) -> Router {
        let api_routes = super::routes::create_routes(state);

        let mut app = Router::new()
            .nest(&config.api_prefix, api_routes)
            .route(
                "/ping",
                get(crate::management::handlers::system::ping_handler),
            )
            .route("/", get(crate::management::handlers::system::root_handler));

        // 请求ID中间件对所有路由生效
        app = app.layer(axum::middleware::from_fn(
            super::middleware::request_id_middleware,
        ));

        // 添加中间件
        let service_builder = ServiceBuilder::new().layer(TraceLayer::new_for_http());

        // 配置CORS
        if config.enable_cors {
            let mut cors_layer = CorsLayer::new()
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::PUT,
                    axum::http::Method::DELETE,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::ACCEPT,
                    axum::http::header::ORIGIN,
                ]);

            // 配置允许的源
            if config.cors_origins.contains(&"*".to_string()) {
                cors_layer = cors_layer.allow_origin(Any);
            } else {
                let origins = config
                    .cors_origins
                    .iter()
                    .map(|origin| origin.parse::<axum::http::HeaderValue>())
                    .collect::<std::result::Result<Vec<_>, axum::http::header::InvalidHeaderValue>>(
                    );

                match origins {
                    Ok(origins) => {
                        cors_layer = cors_layer.allow_origin(origins);
                    }
                    Err(e) => {
                        lwarn!(
                            "system",
                            LogStage::Startup,
                            LogComponent::ServerSetup,
                            "cors_config_fail",
                            &format!(
                                "Invalid CORS origin configuration: {e}, falling back to allow any"
                            )
                        );
                        cors_layer = cors_layer.allow_origin(Any);
                    }
                }
            }

            app = app.layer(service_builder.layer(cors_layer));
        } else {
            app = app.layer(service_builder);
        }

        app
    }

    /// 启动服务器
    pub async fn serve(self) -> Result<()> {
        let bind_address = self.config.bind_address.clone();
        let ip = bind_address.parse::<std::net::IpAddr>().map_err(|e| {
            tracker_err!(
                config,
                format!("Invalid bind address '{bind_address}': {e}")
            )
        })?;
        let addr = SocketAddr::new(ip, self.config.port);

        linfo!(
            "system",
            LogStage::Startup,
            LogComponent::ServerSetup,
            "server_start",
            &format!("Starting management server on {addr}")
        );

        let listener = TcpListener::bind(&addr).await?;

        axum::serve(listener, self.router)
            .await
            .map_err(|e| tracker_err!(server_start, format!("Management server error: {e}")))?;

        Ok(())
    }
}
