use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("缺少认证令牌")]
    MissingToken,

    #[error("认证令牌无效: {0}")]
    InvalidToken(String),

    #[error("认证令牌已过期")]
    TokenExpired,
}
