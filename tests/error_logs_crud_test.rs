//! 错误日志 CRUD 集成测试

mod common;

use common::{insert_user, sample_payload, setup_test_db};
use error_tracker::TrackerError;
use error_tracker::management::services::{ErrorLogListQuery, ErrorLogsService};

#[tokio::test]
async fn create_get_update_delete_error_log() {
    let db = setup_test_db().await;
    let owner = insert_user(&db, "alice").await;
    let service = ErrorLogsService::new(&db);

    let created = service
        .create(owner, &sample_payload())
        .await
        .expect("create error log");

    assert_eq!(created.title, "Cannot read properties of undefined");
    assert_eq!(created.programming_language, "JavaScript");
    assert_eq!(created.category, "Runtime Error");
    // 缺省严重程度与解决状态
    assert_eq!(created.severity, "Medium");
    assert!(created.is_resolved);
    assert_eq!(created.tags, vec!["frontend", "react"]);
    // 归属只暴露公开信息
    assert_eq!(created.user.id, owner);
    assert_eq!(created.user.username, "alice");
    assert_eq!(created.user.email, "alice@example.com");

    let fetched = service.get(owner, created.id).await.expect("get error log");
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.title, created.title);
    assert_eq!(fetched.created_at, created.created_at);

    let mut update = sample_payload();
    update.title = "Cannot read properties of null".to_string();
    update.category = "Type Error".to_string();
    update.severity = Some("High".to_string());
    update.is_resolved = Some(false);
    update.tags = None;

    let updated = service
        .update(owner, created.id, &update)
        .await
        .expect("update error log");
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.title, "Cannot read properties of null");
    assert_eq!(updated.category, "Type Error");
    assert_eq!(updated.severity, "High");
    assert!(!updated.is_resolved);
    assert!(updated.tags.is_empty());
    // 创建时间不变
    assert_eq!(updated.created_at, created.created_at);

    service
        .delete(owner, created.id)
        .await
        .expect("delete error log");

    // 删除后读取是未找到，而不是服务器错误
    let err = service.get(owner, created.id).await.unwrap_err();
    assert!(matches!(err, TrackerError::NotFound { .. }));

    // 重复删除同样是未找到
    let err = service.delete(owner, created.id).await.unwrap_err();
    assert!(matches!(err, TrackerError::NotFound { .. }));
}

#[tokio::test]
async fn owners_never_see_each_other() {
    let db = setup_test_db().await;
    let alice = insert_user(&db, "alice").await;
    let bob = insert_user(&db, "bob").await;
    let service = ErrorLogsService::new(&db);

    let created = service
        .create(alice, &sample_payload())
        .await
        .expect("create error log");

    // 即使拿着确切的记录ID，其他用户也读不到、改不了、删不掉
    let err = service.get(bob, created.id).await.unwrap_err();
    assert!(matches!(err, TrackerError::NotFound { .. }));

    let err = service
        .update(bob, created.id, &sample_payload())
        .await
        .unwrap_err();
    assert!(matches!(err, TrackerError::NotFound { .. }));

    let err = service.delete(bob, created.id).await.unwrap_err();
    assert!(matches!(err, TrackerError::NotFound { .. }));

    // 列表同样不可见
    let listed = service
        .list(bob, &ErrorLogListQuery::default())
        .await
        .expect("list as bob");
    assert_eq!(listed.pagination.total, 0);
    assert!(listed.error_logs.is_empty());

    // 数据本身未被破坏
    let fetched = service.get(alice, created.id).await.expect("get as alice");
    assert_eq!(fetched.title, created.title);
}

#[tokio::test]
async fn validation_errors_never_reach_storage() {
    let db = setup_test_db().await;
    let owner = insert_user(&db, "alice").await;
    let service = ErrorLogsService::new(&db);

    let mut bad = sample_payload();
    bad.title = "   ".to_string();
    let err = service.create(owner, &bad).await.unwrap_err();
    assert!(matches!(err, TrackerError::Validation { .. }));

    let mut bad = sample_payload();
    bad.programming_language = "COBOL".to_string();
    let err = service.create(owner, &bad).await.unwrap_err();
    assert!(matches!(err, TrackerError::Validation { .. }));

    let mut bad = sample_payload();
    bad.time_to_resolve = Some(-10);
    let err = service.create(owner, &bad).await.unwrap_err();
    assert!(matches!(err, TrackerError::Validation { .. }));

    // 被拒绝的请求没有写入任何数据
    let listed = service
        .list(owner, &ErrorLogListQuery::default())
        .await
        .expect("list");
    assert_eq!(listed.pagination.total, 0);
}

#[tokio::test]
async fn invalid_pagination_is_rejected() {
    let db = setup_test_db().await;
    let owner = insert_user(&db, "alice").await;
    let service = ErrorLogsService::new(&db);

    let query = ErrorLogListQuery {
        limit: Some(0),
        ..Default::default()
    };
    let err = service.list(owner, &query).await.unwrap_err();
    assert!(matches!(err, TrackerError::Validation { field: Some(f), .. } if f == "limit"));

    let query = ErrorLogListQuery {
        page: Some(-1),
        ..Default::default()
    };
    let err = service.list(owner, &query).await.unwrap_err();
    assert!(matches!(err, TrackerError::Validation { field: Some(f), .. } if f == "page"));
}
