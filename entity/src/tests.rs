//! # 实体定义测试
//!
//! 测试 Sea-ORM 实体定义的正确性

#[cfg(test)]
mod tests {
    use crate::{error_logs, users};
    use sea_orm::Set;

    #[tokio::test]
    async fn test_user_entity_creation() {
        // 测试用户实体可以正常创建
        let user = users::ActiveModel {
            username: Set("test_user".to_string()),
            email: Set("test@example.com".to_string()),
            is_active: Set(true),
            ..Default::default()
        };

        assert_eq!(user.username.as_ref(), "test_user");
        assert_eq!(user.email.as_ref(), "test@example.com");
        assert_eq!(user.is_active.as_ref(), &true);
    }

    #[tokio::test]
    async fn test_error_log_entity_creation() {
        // 测试错误日志实体及默认可选列
        let log = error_logs::ActiveModel {
            user_id: Set(1),
            title: Set("Cannot read properties of undefined".to_string()),
            description: Set("访问未初始化对象的属性导致崩溃".to_string()),
            programming_language: Set("JavaScript".to_string()),
            category: Set("Runtime Error".to_string()),
            solution: Set("渲染前增加空值判断".to_string()),
            severity: Set("Medium".to_string()),
            tags: Set(Some(serde_json::json!(["frontend", "react"]).to_string())),
            is_resolved: Set(true),
            time_to_resolve: Set(Some(30)),
            ..Default::default()
        };

        assert_eq!(log.user_id.as_ref(), &1);
        assert_eq!(log.programming_language.as_ref(), "JavaScript");
        assert_eq!(log.category.as_ref(), "Runtime Error");
        assert_eq!(log.severity.as_ref(), "Medium");
        assert_eq!(log.time_to_resolve.as_ref(), &Some(30));
    }
}
