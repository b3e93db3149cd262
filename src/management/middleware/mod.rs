//! # 管理服务器中间件

pub mod auth;
pub mod request_id;

pub use auth::AuthContext;
pub use request_id::{RequestId, request_id_middleware};
