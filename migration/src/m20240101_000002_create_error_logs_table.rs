use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ErrorLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ErrorLogs::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    // === 归属信息 ===
                    .col(ColumnDef::new(ErrorLogs::UserId).integer().not_null())
                    // === 错误描述 ===
                    .col(
                        ColumnDef::new(ErrorLogs::Title)
                            .string_len(200)
                            .not_null(),
                    )
                    .col(ColumnDef::new(ErrorLogs::Description).text().not_null())
                    .col(
                        ColumnDef::new(ErrorLogs::ProgrammingLanguage)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ErrorLogs::Category)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(ColumnDef::new(ErrorLogs::Solution).text().not_null())
                    .col(
                        ColumnDef::new(ErrorLogs::Severity)
                            .string_len(20)
                            .not_null()
                            .default("Medium"),
                    )
                    // === 附加信息 ===
                    .col(ColumnDef::new(ErrorLogs::Tags).text())
                    .col(
                        ColumnDef::new(ErrorLogs::IsResolved)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(ErrorLogs::TimeToResolve).integer())
                    // === 时间戳 ===
                    .col(
                        ColumnDef::new(ErrorLogs::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(ErrorLogs::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_error_logs_user_id")
                            .from(ErrorLogs::Table, ErrorLogs::UserId)
                            .to(Users::Table, Users::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建核心索引：列表查询按 (归属, 时间) 倒序分页
        manager
            .create_index(
                Index::create()
                    .name("idx_error_logs_user_time")
                    .table(ErrorLogs::Table)
                    .col(ErrorLogs::UserId)
                    .col(ErrorLogs::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_error_logs_language")
                    .table(ErrorLogs::Table)
                    .col(ErrorLogs::ProgrammingLanguage)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_error_logs_category")
                    .table(ErrorLogs::Table)
                    .col(ErrorLogs::Category)
                    .to_owned(),
            )
            .await?;

        // 归属 + 过滤列的组合索引
        manager
            .create_index(
                Index::create()
                    .name("idx_error_logs_user_language")
                    .table(ErrorLogs::Table)
                    .col(ErrorLogs::UserId)
                    .col(ErrorLogs::ProgrammingLanguage)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_error_logs_user_category")
                    .table(ErrorLogs::Table)
                    .col(ErrorLogs::UserId)
                    .col(ErrorLogs::Category)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ErrorLogs::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ErrorLogs {
    Table,
    // 归属信息
    Id,
    UserId,
    // 错误描述
    Title,
    Description,
    ProgrammingLanguage,
    Category,
    Solution,
    Severity,
    // 附加信息
    Tags,
    IsResolved,
    TimeToResolve,
    // 时间戳
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
