//! # 错误日志服务
//!
//! CRUD 与列表查询的业务逻辑。列表过滤条件先解析成显式的
//! [`ErrorLogFilter`]，再由唯一的翻译函数 [`apply_filter`] 生成
//! 存储层查询；所有读写都带归属约束。

use crate::{
    error::{Result, TrackerError},
    lerror,
    logging::{LogComponent, LogStage},
    tracker_ensure, tracker_err,
    types::{ErrorCategory, ErrorLogId, ProgrammingLanguage, Severity, SortField, SortOrder, UserId},
};
use chrono::{DateTime, Utc};
use entity::{ErrorLogs, Users, error_logs, users};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set,
};
use serde::{Deserialize, Serialize};

use super::shared::{PaginationInfo, PaginationParams, build_page};

/// 列表缺省每页条数
pub const DEFAULT_PAGE_SIZE: u64 = 10;
/// 列表每页条数上限
pub const MAX_PAGE_SIZE: u64 = 100;

const TITLE_MAX_CHARS: usize = 200;
const DESCRIPTION_MAX_CHARS: usize = 2000;
const SOLUTION_MAX_CHARS: usize = 2000;
const TAG_MAX_CHARS: usize = 30;

/// 创建/更新错误日志的请求载荷
///
/// 更新是对可变字段的完整替换，与创建共用同一载荷与校验。
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorLogPayload {
    pub title: String,
    pub description: String,
    pub programming_language: String,
    pub category: String,
    pub solution: String,
    pub severity: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_resolved: Option<bool>,
    pub time_to_resolve: Option<i32>,
}

/// 列表查询参数
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorLogListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub programming_language: Option<String>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

/// 显式的类型化过滤条件
///
/// 归属约束永远存在；其余条件都是可选的精确匹配或子串搜索。
#[derive(Debug, Clone)]
pub struct ErrorLogFilter {
    pub owner_id: UserId,
    pub language: Option<ProgrammingLanguage>,
    pub category: Option<ErrorCategory>,
    pub search: Option<String>,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
}

impl ErrorLogFilter {
    /// 从原始查询参数解析过滤条件，闭集外的取值按校验错误拒绝
    pub fn from_query(owner_id: UserId, query: &ErrorLogListQuery) -> Result<Self> {
        let language = query
            .programming_language
            .as_deref()
            .map(str::parse::<ProgrammingLanguage>)
            .transpose()
            .map_err(|e| {
                TrackerError::validation(e.to_string(), Some("programmingLanguage".to_string()))
            })?;

        let category = query
            .category
            .as_deref()
            .map(str::parse::<ErrorCategory>)
            .transpose()
            .map_err(|e| TrackerError::validation(e.to_string(), Some("category".to_string())))?;

        let search = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(std::string::ToString::to_string);

        let sort_by = query
            .sort_by
            .as_deref()
            .map(str::parse::<SortField>)
            .transpose()
            .map_err(|e| TrackerError::validation(e.to_string(), Some("sortBy".to_string())))?
            .unwrap_or_default();

        let sort_order = query
            .sort_order
            .as_deref()
            .map(str::parse::<SortOrder>)
            .transpose()
            .map_err(|e| TrackerError::validation(e.to_string(), Some("sortOrder".to_string())))?
            .unwrap_or_default();

        Ok(Self {
            owner_id,
            language,
            category,
            search,
            sort_by,
            sort_order,
        })
    }
}

/// 把类型化过滤条件翻译成存储层查询
///
/// 这是列表查询唯一的构造入口，归属约束在此无条件加入。
fn apply_filter(filter: &ErrorLogFilter) -> Select<ErrorLogs> {
    let mut select = ErrorLogs::find().filter(error_logs::Column::UserId.eq(filter.owner_id));

    if let Some(language) = filter.language {
        select = select.filter(error_logs::Column::ProgrammingLanguage.eq(language.as_str()));
    }

    if let Some(category) = filter.category {
        select = select.filter(error_logs::Column::Category.eq(category.as_str()));
    }

    if let Some(search) = &filter.search {
        let search_pattern = format!("%{search}%");
        select = select.filter(
            Condition::any()
                .add(error_logs::Column::Title.like(&search_pattern))
                .add(error_logs::Column::Description.like(&search_pattern))
                .add(error_logs::Column::Solution.like(&search_pattern)),
        );
    }

    select
}

const fn sort_column(field: SortField) -> error_logs::Column {
    match field {
        SortField::CreatedAt => error_logs::Column::CreatedAt,
        SortField::UpdatedAt => error_logs::Column::UpdatedAt,
        SortField::Title => error_logs::Column::Title,
        SortField::Severity => error_logs::Column::Severity,
        SortField::TimeToResolve => error_logs::Column::TimeToResolve,
    }
}

/// 归属用户的公开信息（不含任何凭据材料）
#[derive(Debug, Clone, Serialize)]
pub struct OwnerInfo {
    pub id: UserId,
    pub username: String,
    pub email: String,
}

impl From<users::Model> for OwnerInfo {
    fn from(user: users::Model) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
        }
    }
}

/// 错误日志响应条目
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorLogResponse {
    pub id: ErrorLogId,
    pub title: String,
    pub description: String,
    pub programming_language: String,
    pub category: String,
    pub solution: String,
    pub severity: String,
    pub tags: Vec<String>,
    pub is_resolved: bool,
    pub time_to_resolve: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user: OwnerInfo,
}

impl ErrorLogResponse {
    fn from_model(model: error_logs::Model, owner: &OwnerInfo) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            programming_language: model.programming_language,
            category: model.category,
            solution: model.solution,
            severity: model.severity,
            tags: decode_tags(model.tags.as_deref()),
            is_resolved: model.is_resolved,
            time_to_resolve: model.time_to_resolve,
            created_at: model.created_at,
            updated_at: model.updated_at,
            user: owner.clone(),
        }
    }
}

/// 列表查询结果
#[derive(Debug)]
pub struct ErrorLogListResult {
    pub error_logs: Vec<ErrorLogResponse>,
    pub pagination: PaginationInfo,
}

/// 校验通过后的载荷
#[derive(Debug)]
struct ValidatedPayload {
    title: String,
    description: String,
    language: ProgrammingLanguage,
    category: ErrorCategory,
    solution: String,
    severity: Severity,
    tags: Vec<String>,
    is_resolved: bool,
    time_to_resolve: Option<i32>,
}

/// 错误日志服务
pub struct ErrorLogsService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ErrorLogsService<'a> {
    #[must_use]
    pub const fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    const fn db(&self) -> &'a DatabaseConnection {
        self.db
    }

    /// 创建错误日志
    pub async fn create(
        &self,
        owner_id: UserId,
        payload: &ErrorLogPayload,
    ) -> Result<ErrorLogResponse> {
        let validated = validate_payload(payload)?;
        let owner = self.owner_info(owner_id).await?;

        let now = Utc::now();
        let model = error_logs::ActiveModel {
            user_id: Set(owner_id),
            title: Set(validated.title),
            description: Set(validated.description),
            programming_language: Set(validated.language.as_str().to_string()),
            category: Set(validated.category.as_str().to_string()),
            solution: Set(validated.solution),
            severity: Set(validated.severity.as_str().to_string()),
            tags: Set(encode_tags(&validated.tags)?),
            is_resolved: Set(validated.is_resolved),
            time_to_resolve: Set(validated.time_to_resolve),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(self.db())
        .await
        .map_err(|err| db_error("插入错误日志失败", &err))?;

        Ok(ErrorLogResponse::from_model(model, &owner))
    }

    /// 分页获取错误日志列表
    pub async fn list(
        &self,
        owner_id: UserId,
        query: &ErrorLogListQuery,
    ) -> Result<ErrorLogListResult> {
        let params =
            PaginationParams::from_query(query.page, query.limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE)?;
        let filter = ErrorLogFilter::from_query(owner_id, query)?;

        let select = apply_filter(&filter);
        let total = select
            .clone()
            .count(self.db())
            .await
            .map_err(|err| db_error("统计错误日志总数失败", &err))?;

        let column = sort_column(filter.sort_by);
        let mut page_select = match filter.sort_order {
            SortOrder::Asc => select.order_by_asc(column),
            SortOrder::Desc => select.order_by_desc(column),
        };
        // 次级排序固定按主键，保证同值记录的顺序稳定
        page_select = page_select.order_by_asc(error_logs::Column::Id);

        let records = page_select
            .offset(params.offset())
            .limit(params.limit)
            .all(self.db())
            .await
            .map_err(|err| db_error("查询错误日志列表失败", &err))?;

        let owner = self.owner_info(owner_id).await?;
        let error_logs = records
            .into_iter()
            .map(|model| ErrorLogResponse::from_model(model, &owner))
            .collect();

        Ok(ErrorLogListResult {
            error_logs,
            pagination: build_page(total, params),
        })
    }

    /// 按ID获取错误日志（归属与存在性一并校验）
    pub async fn get(&self, owner_id: UserId, id: ErrorLogId) -> Result<ErrorLogResponse> {
        let model = self.find_owned(owner_id, id).await?;
        let owner = self.owner_info(owner_id).await?;
        Ok(ErrorLogResponse::from_model(model, &owner))
    }

    /// 更新错误日志（可变字段完整替换）
    pub async fn update(
        &self,
        owner_id: UserId,
        id: ErrorLogId,
        payload: &ErrorLogPayload,
    ) -> Result<ErrorLogResponse> {
        let validated = validate_payload(payload)?;
        let existing = self.find_owned(owner_id, id).await?;

        let mut model: error_logs::ActiveModel = existing.into();
        model.title = Set(validated.title);
        model.description = Set(validated.description);
        model.programming_language = Set(validated.language.as_str().to_string());
        model.category = Set(validated.category.as_str().to_string());
        model.solution = Set(validated.solution);
        model.severity = Set(validated.severity.as_str().to_string());
        model.tags = Set(encode_tags(&validated.tags)?);
        model.is_resolved = Set(validated.is_resolved);
        model.time_to_resolve = Set(validated.time_to_resolve);
        model.updated_at = Set(Utc::now());

        let updated = model
            .update(self.db())
            .await
            .map_err(|err| db_error("更新错误日志失败", &err))?;

        let owner = self.owner_info(owner_id).await?;
        Ok(ErrorLogResponse::from_model(updated, &owner))
    }

    /// 删除错误日志（单条语句内校验归属）
    pub async fn delete(&self, owner_id: UserId, id: ErrorLogId) -> Result<()> {
        let result = ErrorLogs::delete_many()
            .filter(error_logs::Column::Id.eq(id))
            .filter(error_logs::Column::UserId.eq(owner_id))
            .exec(self.db())
            .await
            .map_err(|err| db_error("删除错误日志失败", &err))?;

        tracker_ensure!(
            result.rows_affected > 0,
            not_found,
            "error_log",
            id.to_string()
        );
        Ok(())
    }

    /// 按 (id, 归属) 组合查找，未命中一律视为未找到
    ///
    /// 不单独区分「不存在」与「归属他人」，避免泄露他人数据的存在性。
    async fn find_owned(&self, owner_id: UserId, id: ErrorLogId) -> Result<error_logs::Model> {
        ErrorLogs::find()
            .filter(error_logs::Column::Id.eq(id))
            .filter(error_logs::Column::UserId.eq(owner_id))
            .one(self.db())
            .await
            .map_err(|err| db_error("查询错误日志失败", &err))?
            .ok_or_else(|| tracker_err!(not_found, "error_log", id.to_string()))
    }

    /// 解析归属用户的公开信息
    async fn owner_info(&self, owner_id: UserId) -> Result<OwnerInfo> {
        Users::find_by_id(owner_id)
            .one(self.db())
            .await
            .map_err(|err| db_error("查询归属用户失败", &err))?
            .map(OwnerInfo::from)
            .ok_or_else(|| tracker_err!(not_found, "user", owner_id.to_string()))
    }
}

fn validate_payload(payload: &ErrorLogPayload) -> Result<ValidatedPayload> {
    let title = payload.title.trim();
    tracker_ensure!(
        !title.is_empty(),
        validation,
        "标题不能为空",
        Some("title".to_string())
    );
    tracker_ensure!(
        title.chars().count() <= TITLE_MAX_CHARS,
        validation,
        format!("标题长度不能超过 {TITLE_MAX_CHARS} 个字符"),
        Some("title".to_string())
    );

    let description = payload.description.trim();
    tracker_ensure!(
        !description.is_empty(),
        validation,
        "错误描述不能为空",
        Some("description".to_string())
    );
    tracker_ensure!(
        description.chars().count() <= DESCRIPTION_MAX_CHARS,
        validation,
        format!("错误描述长度不能超过 {DESCRIPTION_MAX_CHARS} 个字符"),
        Some("description".to_string())
    );

    let solution = payload.solution.trim();
    tracker_ensure!(
        !solution.is_empty(),
        validation,
        "解决方案不能为空",
        Some("solution".to_string())
    );
    tracker_ensure!(
        solution.chars().count() <= SOLUTION_MAX_CHARS,
        validation,
        format!("解决方案长度不能超过 {SOLUTION_MAX_CHARS} 个字符"),
        Some("solution".to_string())
    );

    let language = payload
        .programming_language
        .parse::<ProgrammingLanguage>()
        .map_err(|e| {
            TrackerError::validation(e.to_string(), Some("programmingLanguage".to_string()))
        })?;

    let category = payload
        .category
        .parse::<ErrorCategory>()
        .map_err(|e| TrackerError::validation(e.to_string(), Some("category".to_string())))?;

    let severity = payload
        .severity
        .as_deref()
        .map(str::parse::<Severity>)
        .transpose()
        .map_err(|e| TrackerError::validation(e.to_string(), Some("severity".to_string())))?
        .unwrap_or_default();

    let mut tags = Vec::new();
    if let Some(raw_tags) = &payload.tags {
        for raw in raw_tags {
            let tag = raw.trim();
            if tag.is_empty() {
                continue;
            }
            tracker_ensure!(
                tag.chars().count() <= TAG_MAX_CHARS,
                validation,
                format!("单个标签长度不能超过 {TAG_MAX_CHARS} 个字符"),
                Some("tags".to_string())
            );
            tags.push(tag.to_string());
        }
    }

    if let Some(minutes) = payload.time_to_resolve {
        tracker_ensure!(
            minutes >= 0,
            validation,
            "解决耗时不能为负数",
            Some("timeToResolve".to_string())
        );
    }

    Ok(ValidatedPayload {
        title: title.to_string(),
        description: description.to_string(),
        language,
        category,
        solution: solution.to_string(),
        severity,
        tags,
        is_resolved: payload.is_resolved.unwrap_or(true),
        time_to_resolve: payload.time_to_resolve,
    })
}

fn encode_tags(tags: &[String]) -> Result<Option<String>> {
    if tags.is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::to_string(tags)?))
}

fn decode_tags(raw: Option<&str>) -> Vec<String> {
    raw.and_then(|text| serde_json::from_str(text).ok())
        .unwrap_or_default()
}

fn db_error(message: &str, err: &DbErr) -> TrackerError {
    lerror!(
        "system",
        LogStage::Db,
        LogComponent::ErrorLog,
        "error_logs_service_db_error",
        &format!("{message}: {err}")
    );
    tracker_err!(database, format!("{message}: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> ErrorLogPayload {
        ErrorLogPayload {
            title: "Cannot read properties of undefined".to_string(),
            description: "渲染时访问了未初始化的对象".to_string(),
            programming_language: "JavaScript".to_string(),
            category: "Runtime Error".to_string(),
            solution: "增加空值判断".to_string(),
            severity: None,
            tags: Some(vec!["  react ".to_string(), String::new()]),
            is_resolved: None,
            time_to_resolve: Some(30),
        }
    }

    #[test]
    fn validate_payload_applies_defaults_and_trims() {
        let validated = validate_payload(&payload()).expect("载荷应通过校验");
        assert_eq!(validated.severity, Severity::Medium);
        assert!(validated.is_resolved);
        // 标签去除首尾空白，空标签被丢弃
        assert_eq!(validated.tags, vec!["react".to_string()]);
    }

    #[test]
    fn validate_payload_rejects_out_of_set_values() {
        let mut bad = payload();
        bad.programming_language = "COBOL".to_string();
        let err = validate_payload(&bad).unwrap_err();
        assert!(
            matches!(err, TrackerError::Validation { field: Some(f), .. } if f == "programmingLanguage")
        );

        let mut bad = payload();
        bad.category = "Paper Jam".to_string();
        assert!(validate_payload(&bad).is_err());

        let mut bad = payload();
        bad.severity = Some("Catastrophic".to_string());
        assert!(validate_payload(&bad).is_err());
    }

    #[test]
    fn validate_payload_rejects_oversized_fields() {
        let mut bad = payload();
        bad.title = "t".repeat(201);
        assert!(validate_payload(&bad).is_err());

        let mut bad = payload();
        bad.description = "d".repeat(2001);
        assert!(validate_payload(&bad).is_err());

        let mut bad = payload();
        bad.tags = Some(vec!["x".repeat(31)]);
        assert!(validate_payload(&bad).is_err());

        let mut bad = payload();
        bad.time_to_resolve = Some(-1);
        assert!(validate_payload(&bad).is_err());
    }

    #[test]
    fn filter_parses_and_defaults_sorting() {
        let query = ErrorLogListQuery {
            programming_language: Some("Python".to_string()),
            search: Some("  timeout  ".to_string()),
            ..Default::default()
        };
        let filter = ErrorLogFilter::from_query(7, &query).expect("过滤条件应合法");
        assert_eq!(filter.owner_id, 7);
        assert_eq!(filter.language, Some(ProgrammingLanguage::Python));
        assert_eq!(filter.category, None);
        assert_eq!(filter.search.as_deref(), Some("timeout"));
        assert_eq!(filter.sort_by, SortField::CreatedAt);
        assert_eq!(filter.sort_order, SortOrder::Desc);
    }

    #[test]
    fn filter_rejects_unknown_sort_field() {
        let query = ErrorLogListQuery {
            sort_by: Some("ownerId".to_string()),
            ..Default::default()
        };
        let err = ErrorLogFilter::from_query(1, &query).unwrap_err();
        assert!(matches!(err, TrackerError::Validation { field: Some(f), .. } if f == "sortBy"));
    }

    #[test]
    fn blank_search_is_ignored() {
        let query = ErrorLogListQuery {
            search: Some("   ".to_string()),
            ..Default::default()
        };
        let filter = ErrorLogFilter::from_query(1, &query).expect("过滤条件应合法");
        assert_eq!(filter.search, None);
    }

    #[test]
    fn tags_round_trip_through_json_column() {
        let tags = vec!["frontend".to_string(), "react".to_string()];
        let encoded = encode_tags(&tags).expect("编码标签失败").expect("非空标签应有值");
        assert_eq!(decode_tags(Some(&encoded)), tags);
        assert_eq!(encode_tags(&[]).expect("编码空标签失败"), None);
        assert!(decode_tags(None).is_empty());
        assert!(decode_tags(Some("not json")).is_empty());
    }
}
