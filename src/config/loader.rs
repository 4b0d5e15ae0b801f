//! 从 TOML 文件加载注册表配置
//!
//! ```toml
//! factory_method = "create"
//! binding_const = "CREATED_BY"
//!
//! [aliases]
//! mailer = "app::Mailer"
//! ```
//!
//! 所有键都是可选的，缺省时使用默认值。

use super::registry_config::Config;
use crate::errors::ConfigError;
use std::{fs, path::Path};

const INLINE_SOURCE: &str = "<inline>";

impl Config {
    /// 从 TOML 文本解析配置
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        parse(source, INLINE_SOURCE)
    }

    /// 从磁盘加载配置文件
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let origin = path.display().to_string();

        let content =
            fs::read_to_string(path).map_err(|e| ConfigError::FileRead(origin.clone(), e))?;
        let config = parse(&content, &origin)?;

        tracing::debug!(
            path = %origin,
            aliases = config.aliases().len(),
            "Loaded registry configuration"
        );
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }
}

fn parse(source: &str, origin: &str) -> Result<Config, ConfigError> {
    toml::from_str(source).map_err(|e| ConfigError::TomlParse(origin.to_string(), e))
}
