//! # 错误日志实体定义
//!
//! 用户提交的编程错误记录。`programming_language`、`category`、`severity`
//! 三列只接受闭集取值，由服务层在持久化前校验；`tags` 以 JSON 文本存储。

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 错误日志实体
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "error_logs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// 归属用户，创建后不可变更
    pub user_id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub programming_language: String,
    pub category: String,
    #[sea_orm(column_type = "Text")]
    pub solution: String,
    pub severity: String,
    /// JSON 编码的标签数组，空值表示无标签
    #[sea_orm(column_type = "Text", nullable)]
    pub tags: Option<String>,
    pub is_resolved: bool,
    /// 解决耗时（分钟）
    pub time_to_resolve: Option<i32>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Users,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
