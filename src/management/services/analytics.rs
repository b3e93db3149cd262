//! # 统计分析服务
//!
//! 对单个用户的全部错误日志做描述性统计：总数、按语言/分类/严重程度
//! 的分组计数、最近 12 个月的月度趋势和最近 5 条记录。每次调用都
//! 现算，不做缓存；六项计算互不依赖，并发发出后合并结果。

use crate::{
    error::{Result, TrackerError},
    lerror,
    logging::{LogComponent, LogStage},
    tracker_err,
    types::{ErrorLogId, UserId},
};
use chrono::{DateTime, Datelike, Utc};
use entity::{ErrorLogs, error_logs};
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use serde::Serialize;
use std::collections::BTreeMap;

/// 月度趋势最多返回的桶数
const MONTHLY_BUCKETS: usize = 12;
/// 最近记录条数
const RECENT_ERRORS_LIMIT: u64 = 5;

/// 单语言计数
#[derive(Debug, Clone, Serialize)]
pub struct LanguageStat {
    pub language: String,
    pub count: i64,
}

/// 单分类计数
#[derive(Debug, Clone, Serialize)]
pub struct CategoryStat {
    pub category: String,
    pub count: i64,
}

/// 单严重程度计数
#[derive(Debug, Clone, Serialize)]
pub struct SeverityStat {
    pub severity: String,
    pub count: i64,
}

/// 月度桶：只包含至少有一条记录的月份
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyStat {
    pub year: i32,
    pub month: u32,
    pub count: i64,
}

/// 最近记录的摘要投影（不含解决方案与标签）
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentErrorEntry {
    pub id: ErrorLogId,
    pub title: String,
    pub description: String,
    pub programming_language: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
}

impl From<error_logs::Model> for RecentErrorEntry {
    fn from(model: error_logs::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            programming_language: model.programming_language,
            category: model.category,
            created_at: model.created_at,
        }
    }
}

/// 统计分析响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResponse {
    pub total_errors: i64,
    pub language_stats: Vec<LanguageStat>,
    pub category_stats: Vec<CategoryStat>,
    pub monthly_stats: Vec<MonthlyStat>,
    pub severity_stats: Vec<SeverityStat>,
    pub recent_errors: Vec<RecentErrorEntry>,
}

/// 统计分析服务
pub struct AnalyticsService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AnalyticsService<'a> {
    #[must_use]
    pub const fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    const fn db(&self) -> &'a DatabaseConnection {
        self.db
    }

    /// 计算完整的统计包
    ///
    /// 没有任何记录的用户得到全零/全空的正常结果，而不是错误。
    pub async fn analytics(&self, owner_id: UserId) -> Result<AnalyticsResponse> {
        let (total_errors, languages, categories, severities, monthly_stats, recent_errors) =
            tokio::try_join!(
                self.total_count(owner_id),
                self.grouped_count(owner_id, error_logs::Column::ProgrammingLanguage),
                self.grouped_count(owner_id, error_logs::Column::Category),
                self.grouped_count(owner_id, error_logs::Column::Severity),
                self.monthly_trend(owner_id),
                self.recent_errors(owner_id),
            )?;

        Ok(AnalyticsResponse {
            total_errors,
            language_stats: languages
                .into_iter()
                .map(|(language, count)| LanguageStat { language, count })
                .collect(),
            category_stats: categories
                .into_iter()
                .map(|(category, count)| CategoryStat { category, count })
                .collect(),
            monthly_stats,
            severity_stats: severities
                .into_iter()
                .map(|(severity, count)| SeverityStat { severity, count })
                .collect(),
            recent_errors,
        })
    }

    /// 用户全部记录数
    async fn total_count(&self, owner_id: UserId) -> Result<i64> {
        ErrorLogs::find()
            .filter(error_logs::Column::UserId.eq(owner_id))
            .count(self.db())
            .await
            .map(|count| i64::try_from(count).unwrap_or(0))
            .map_err(|err| db_error("统计错误日志总数失败", &err))
    }

    /// 按单个分类列分组计数，计数降序
    ///
    /// 排序使用稳定排序，同计数分组在一次响应内保持扫描顺序。
    async fn grouped_count(
        &self,
        owner_id: UserId,
        column: error_logs::Column,
    ) -> Result<Vec<(String, i64)>> {
        let mut rows = ErrorLogs::find()
            .filter(error_logs::Column::UserId.eq(owner_id))
            .select_only()
            .column(column)
            .column_as(error_logs::Column::Id.count(), "count")
            .group_by(column)
            .into_tuple::<(String, i64)>()
            .all(self.db())
            .await
            .map_err(|err| db_error("分组统计错误日志失败", &err))?;

        rows.sort_by(|a, b| b.1.cmp(&a.1));
        Ok(rows)
    }

    /// 按 (年, 月) 汇总创建时间，(年, 月) 降序，截断到最近 12 个桶
    async fn monthly_trend(&self, owner_id: UserId) -> Result<Vec<MonthlyStat>> {
        let timestamps: Vec<DateTime<Utc>> = ErrorLogs::find()
            .filter(error_logs::Column::UserId.eq(owner_id))
            .select_only()
            .column(error_logs::Column::CreatedAt)
            .into_tuple()
            .all(self.db())
            .await
            .map_err(|err| db_error("统计月度趋势失败", &err))?;

        let mut buckets: BTreeMap<(i32, u32), i64> = BTreeMap::new();
        for ts in timestamps {
            *buckets.entry((ts.year(), ts.month())).or_insert(0) += 1;
        }

        Ok(buckets
            .into_iter()
            .rev()
            .take(MONTHLY_BUCKETS)
            .map(|((year, month), count)| MonthlyStat { year, month, count })
            .collect())
    }

    /// 最近创建的若干条记录（摘要投影）
    async fn recent_errors(&self, owner_id: UserId) -> Result<Vec<RecentErrorEntry>> {
        let records = ErrorLogs::find()
            .filter(error_logs::Column::UserId.eq(owner_id))
            .order_by_desc(error_logs::Column::CreatedAt)
            .order_by_desc(error_logs::Column::Id)
            .limit(RECENT_ERRORS_LIMIT)
            .all(self.db())
            .await
            .map_err(|err| db_error("查询最近错误日志失败", &err))?;

        Ok(records.into_iter().map(RecentErrorEntry::from).collect())
    }
}

fn db_error(message: &str, err: &DbErr) -> TrackerError {
    lerror!(
        "system",
        LogStage::Db,
        LogComponent::Analytics,
        "analytics_service_db_error",
        &format!("{message}: {err}")
    );
    tracker_err!(database, format!("{message}: {err}"))
}
