use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 插入默认本地用户，保证全新数据库开箱可用。
        // 令牌签发在系统外部完成，这里不保存任何凭据材料。
        manager
            .exec_stmt(
                Query::insert()
                    .into_table(Users::Table)
                    .columns([Users::Username, Users::Email, Users::IsActive])
                    .values_panic([
                        "local".into(),
                        "local@error-tracker.local".into(),
                        true.into(),
                    ])
                    .to_owned(),
            )
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 删除默认用户（错误日志经外键级联删除）
        manager
            .exec_stmt(
                Query::delete()
                    .from_table(Users::Table)
                    .and_where(Expr::col(Users::Username).eq("local"))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

// 表定义枚举
#[derive(DeriveIden)]
enum Users {
    Table,
    Username,
    Email,
    IsActive,
}
