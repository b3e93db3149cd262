//! 集成测试共享工具

use chrono::Utc;
use entity::users;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};

/// 打开内存数据库并执行全部迁移
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("connect test db");
    Migrator::up(&db, None).await.expect("run migrations");
    db
}

/// 插入一个测试用户并返回其ID
pub async fn insert_user(db: &DatabaseConnection, username: &str) -> i32 {
    let now = Utc::now();
    let user = users::ActiveModel {
        username: Set(username.to_string()),
        email: Set(format!("{username}@example.com")),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert test user");
    user.id
}

/// 常用的合法创建载荷
#[must_use]
pub fn sample_payload() -> error_tracker::management::services::ErrorLogPayload {
    error_tracker::management::services::ErrorLogPayload {
        title: "Cannot read properties of undefined".to_string(),
        description: "Accessing a property on an uninitialized object".to_string(),
        programming_language: "JavaScript".to_string(),
        category: "Runtime Error".to_string(),
        solution: "Add a null check before rendering".to_string(),
        severity: None,
        tags: Some(vec!["frontend".to_string(), "react".to_string()]),
        is_resolved: None,
        time_to_resolve: Some(30),
    }
}
