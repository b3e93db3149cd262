//! # 错误处理测试

use crate::error::{Context, ErrorCategory, TrackerError};
use axum::http::StatusCode;
use std::error::Error;

#[test]
fn test_config_error_creation() {
    let err = TrackerError::config("测试配置错误");
    assert!(matches!(err, TrackerError::Config { .. }));
    assert_eq!(err.to_string(), "配置错误: 测试配置错误");
}

#[test]
fn test_config_error_with_source() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "文件不存在");
    let err = TrackerError::config_with_source("配置文件加载失败", io_err);

    assert!(matches!(err, TrackerError::Config { .. }));
    assert!(err.to_string().contains("配置错误: 配置文件加载失败"));
    assert!(err.source().is_some());
}

#[test]
fn test_validation_error_maps_to_bad_request() {
    let err = TrackerError::validation("标题不能为空", Some("title".to_string()));
    let (status, code) = err.to_http_response_parts();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code, "VALIDATION_ERROR");
    assert_eq!(err.category(), ErrorCategory::Client);
}

#[test]
fn test_not_found_error_maps_to_404() {
    let err = TrackerError::not_found("error_log", "42");
    assert_eq!(err.to_string(), "资源未找到: error_log 42");
    let (status, code) = err.to_http_response_parts();
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(code, "RESOURCE_NOT_FOUND");
    assert_eq!(err.category(), ErrorCategory::Client);
}

#[test]
fn test_database_error_is_server_category() {
    let err = TrackerError::database("查询失败");
    let (status, code) = err.to_http_response_parts();
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(code, "DATABASE_ERROR");
    assert_eq!(err.category(), ErrorCategory::Server);
}

#[test]
fn test_error_context_trait() {
    let result: Result<(), std::io::Error> = Err(std::io::Error::new(
        std::io::ErrorKind::PermissionDenied,
        "权限不足",
    ));

    let err = result.context("读取配置文件失败").unwrap_err();
    assert!(matches!(err, TrackerError::Context { .. }));
    assert_eq!(err.to_string(), "读取配置文件失败");
    // 包装错误沿用内层错误的HTTP语义
    let (status, _) = err.to_http_response_parts();
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn test_auto_conversion_from_io_error() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "文件不存在");
    let tracker_err: TrackerError = io_err.into();

    assert!(matches!(tracker_err, TrackerError::Io { .. }));
    assert!(tracker_err.to_string().contains("IO错误: 文件操作失败"));
}

#[test]
fn test_auto_conversion_from_toml_error() {
    let invalid_toml = "invalid = toml = syntax";
    let toml_err = toml::from_str::<toml::Value>(invalid_toml).unwrap_err();
    let tracker_err: TrackerError = toml_err.into();

    assert!(matches!(tracker_err, TrackerError::Config { .. }));
    assert!(tracker_err.to_string().contains("配置错误: TOML解析失败"));
}

#[test]
fn test_auto_conversion_from_database_not_found() {
    let db_err = crate::error::database::DatabaseError::NotFound("error_log 7".to_string());
    let tracker_err: TrackerError = db_err.into();
    assert!(matches!(tracker_err, TrackerError::NotFound { .. }));
}

#[test]
fn test_business_error() {
    let err = TrackerError::business("重复提交");
    assert!(matches!(err, TrackerError::Business { .. }));
    assert_eq!(err.to_string(), "业务错误: 重复提交");
}

#[test]
fn test_error_chain() {
    let root_cause = std::io::Error::new(std::io::ErrorKind::NotFound, "文件不存在");
    let config_err = TrackerError::config_with_source("无法读取配置", root_cause);

    // 验证错误链
    assert!(config_err.source().is_some());
    let source = config_err.source().unwrap();
    assert!(source.to_string().contains("文件不存在"));
}

#[test]
fn test_error_macros() {
    let err = crate::tracker_err!(config, "配置错误");
    assert!(matches!(err, TrackerError::Config { .. }));

    let err = crate::tracker_err!(database, "数据库错误");
    assert!(matches!(err, TrackerError::Database { .. }));

    let err = crate::tracker_err!(authentication, "认证错误");
    assert!(matches!(err, TrackerError::Authentication { .. }));

    let err = crate::tracker_err!(validation, "参数越界");
    assert!(matches!(
        err,
        TrackerError::Validation { field: None, .. }
    ));

    let err = crate::tracker_err!(validation, "页码无效", Some("page".to_string()));
    assert!(matches!(err, TrackerError::Validation { field: Some(f), .. } if f == "page"));

    let err = crate::tracker_err!(not_found, "error_log", "99");
    assert!(matches!(err, TrackerError::NotFound { .. }));

    let err = crate::tracker_err!(internal, "状态异常: {}", 42);
    assert!(matches!(err, TrackerError::Internal { .. }));
}

#[test]
fn test_ensure_macros() -> crate::error::Result<()> {
    crate::tracker_ensure!(true, config, "这不应该触发");

    // 测试确保宏会正确返回错误
    let result = (|| -> crate::error::Result<()> {
        crate::tracker_ensure!(false, validation, "页大小必须为正整数", Some("limit".to_string()));
        Ok(())
    })();
    assert!(matches!(
        result.unwrap_err(),
        TrackerError::Validation { .. }
    ));

    let result = (|| -> crate::error::Result<()> {
        crate::tracker_ensure!(false, business, "业务错误");
        Ok(())
    })();
    assert!(matches!(result.unwrap_err(), TrackerError::Business { .. }));

    Ok(())
}
