//! # 用户实体定义
//!
//! 用户身份信息表的 Sea-ORM 实体模型。认证令牌的签发在系统外部完成，
//! 这里只保存用于归属解析的身份字段。

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 用户实体
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    pub is_active: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::error_logs::Entity")]
    ErrorLogs,
}

impl Related<super::error_logs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ErrorLogs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
