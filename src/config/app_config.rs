//! # 应用配置结构定义

use crate::error::{Context, Result};
use crate::management::server::ManagementConfig;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// 默认配置文件路径
const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 应用主配置结构
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// 管理服务器配置
    pub server: ManagementConfig,
    /// 数据库配置
    pub database: super::DatabaseConfig,
    /// 认证配置
    pub auth: AuthConfig,
}

/// 认证配置
///
/// 只负责校验外部签发的令牌；密钥必须与签发方一致。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// JWT 签名密钥
    pub jwt_secret: String,
    /// 生成令牌时的有效期（小时），仅用于运维/测试工具
    pub token_expire_hours: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "dev-secret-change-me".to_string(),
            token_expire_hours: 24,
        }
    }
}

impl AppConfig {
    /// 加载配置：配置文件（可缺省） + 环境变量覆盖
    ///
    /// 覆盖项：`DATABASE_URL`、`JWT_SECRET`、`PORT`。
    pub fn load() -> Result<Self> {
        let path = env::var("CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(Path::new(&path))
    }

    /// 从指定路径加载配置，文件不存在时回退到默认值
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("读取配置文件失败: {}", path.display()))?;
            toml::from_str::<Self>(&raw)
                .with_context(|| format!("解析配置文件失败: {}", path.display()))?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = env::var("DATABASE_URL") {
            self.database.url = url;
        }
        if let Ok(secret) = env::var("JWT_SECRET") {
            self.auth.jwt_secret = secret;
        }
        if let Ok(port) = env::var("PORT")
            && let Ok(port) = port.parse::<u16>()
        {
            self.server.port = port;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = AppConfig::load_from(Path::new("definitely/not/here.toml"))
            .expect("缺省配置应加载成功");
        assert_eq!(config.server.port, 5000);
        assert!(config.database.is_sqlite());
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_sections() {
        let mut file = tempfile::NamedTempFile::new().expect("创建临时文件失败");
        writeln!(
            file,
            "[server]\nport = 9000\n\n[auth]\njwt_secret = \"unit-test-secret\""
        )
        .expect("写入临时文件失败");

        let config = AppConfig::load_from(file.path()).expect("配置应加载成功");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.auth.jwt_secret, "unit-test-secret");
        // database 段缺省
        assert!(config.database.is_sqlite());
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().expect("创建临时文件失败");
        writeln!(file, "server = = broken").expect("写入临时文件失败");

        let err = AppConfig::load_from(file.path()).unwrap_err();
        assert!(err.to_string().contains("解析配置文件失败"));
    }
}
