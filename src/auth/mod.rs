//! # 认证模块
//!
//! 只负责校验外部签发的 Bearer 令牌；登录、注册等签发流程不在本服务内。

pub mod jwt;

pub use jwt::{Claims, JwtManager};

/// 认证相关的轻量工具函数
pub struct AuthUtils;

impl AuthUtils {
    /// 从 `Authorization` 头中提取 Bearer Token
    #[must_use]
    pub fn extract_bearer_token(auth_header: &str) -> Option<&str> {
        auth_header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }
}
