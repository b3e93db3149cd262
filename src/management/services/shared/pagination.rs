use serde::Serialize;

use crate::error::Result;
use crate::tracker_ensure;

/// 分页参数
///
/// `page`/`limit` 为 0 或负数是客户端错误，直接拒绝而不是悄悄修正；
/// 超过上限的 `limit` 收敛到 `max_limit`。
#[derive(Debug, Clone, Copy)]
pub struct PaginationParams {
    /// 当前页码（>= 1）
    pub page: u64,
    /// 每页条数（>= 1）
    pub limit: u64,
}

impl PaginationParams {
    /// 根据可选查询参数创建分页配置
    pub fn from_query(
        page: Option<i64>,
        limit: Option<i64>,
        default_limit: u64,
        max_limit: u64,
    ) -> Result<Self> {
        let page = match page {
            None => 1,
            Some(value) => {
                tracker_ensure!(
                    value >= 1,
                    validation,
                    "页码必须为正整数",
                    Some("page".to_string())
                );
                u64::try_from(value).unwrap_or(1)
            }
        };

        let limit = match limit {
            None => default_limit,
            Some(value) => {
                tracker_ensure!(
                    value >= 1,
                    validation,
                    "每页条数必须为正整数",
                    Some("limit".to_string())
                );
                u64::try_from(value).unwrap_or(default_limit).min(max_limit)
            }
        };

        Ok(Self { page, limit })
    }

    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page - 1) * self.limit
    }
}

/// 标准分页信息
#[derive(Debug, Clone, Serialize)]
pub struct PaginationInfo {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub pages: u64,
}

impl PaginationInfo {
    #[must_use]
    pub const fn new(page: u64, limit: u64, total: u64, pages: u64) -> Self {
        Self {
            page,
            limit,
            total,
            pages,
        }
    }
}

impl From<PaginationInfo> for crate::management::response::Pagination {
    fn from(value: PaginationInfo) -> Self {
        Self {
            current_page: value.page,
            total_pages: value.pages,
            total_items: value.total,
            items_per_page: value.limit,
        }
    }
}

/// 根据总数和分页参数计算分页信息。
#[must_use]
pub const fn build_page(total: u64, params: PaginationParams) -> PaginationInfo {
    let pages = if total == 0 {
        0
    } else {
        total.div_ceil(params.limit)
    };
    PaginationInfo::new(params.page, params.limit, total, pages)
}
