//! # Error Tracker 主程序
//!
//! 个人编程错误追踪与统计服务

use error_tracker::{
    AppConfig, Result, TrackerError, lerror, linfo,
    logging::{self, LogComponent, LogStage},
    management::ManagementServer,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志系统
    logging::init_logging(None);

    // 加载配置
    let config = AppConfig::load()?;

    // 执行数据初始化（数据库迁移等）
    let database = run_data_initialization(&config)
        .await
        .map_err(|e| TrackerError::Database {
            message: format!("数据初始化失败: {e}"),
            source: Some(e),
        })?;

    // 启动服务
    linfo!(
        "system",
        LogStage::Startup,
        LogComponent::Main,
        "service_starting",
        "服务启动"
    );
    if let Err(e) = ManagementServer::new(&config, database).serve().await {
        lerror!(
            "system",
            LogStage::Startup,
            LogComponent::Main,
            "service_start_failed",
            &format!("服务启动失败: {e:?}")
        );
        std::process::exit(1);
    }

    linfo!(
        "system",
        LogStage::Shutdown,
        LogComponent::Main,
        "service_shutdown",
        "服务正常关闭"
    );
    Ok(())
}

/// 数据初始化函数
async fn run_data_initialization(
    config: &AppConfig,
) -> anyhow::Result<Arc<sea_orm::DatabaseConnection>> {
    linfo!(
        "system",
        LogStage::Startup,
        LogComponent::Main,
        "data_init_start",
        "开始数据初始化过程..."
    );

    let url = config
        .database
        .get_connection_url()
        .map_err(|e| anyhow::anyhow!("数据库配置无效: {e}"))?;

    let db = error_tracker::database::init_database(&url)
        .await
        .map_err(|e| anyhow::anyhow!("数据库连接失败: {e}"))?;

    // 运行数据库迁移，确保表结构存在
    linfo!(
        "system",
        LogStage::Startup,
        LogComponent::Database,
        "run_migrations",
        "执行数据库迁移..."
    );
    error_tracker::database::run_migrations(&db)
        .await
        .map_err(|e| anyhow::anyhow!("数据库迁移失败: {e}"))?;

    linfo!(
        "system",
        LogStage::Startup,
        LogComponent::Main,
        "data_init_complete",
        "数据初始化过程完成"
    );
    Ok(Arc::new(db))
}
