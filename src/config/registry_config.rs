//! 注册表配置
//!
//! 被动的数据容器：别名表以及两个约定名称（工厂操作名、绑定常量名）。
//! 在构造 `Registry` 时被复制一次，之后对它的修改不会影响已构造的注册表。

use crate::errors::ConfigError;
use super::alias_table::alias_table;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 默认的工厂操作名称
pub const DEFAULT_FACTORY_METHOD: &str = "create";

/// 默认的绑定常量名称
pub const DEFAULT_BINDING_CONST: &str = "CREATED_BY";

/// 注册表构造前收集的配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 工厂操作名称
    factory_method: String,
    /// 绑定常量名称
    binding_const: String,
    /// 别名 -> 标识符
    aliases: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            factory_method: DEFAULT_FACTORY_METHOD.to_string(),
            binding_const: DEFAULT_BINDING_CONST.to_string(),
            aliases: BTreeMap::new(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_factory_method(&mut self, name: impl Into<String>) -> &mut Self {
        self.factory_method = name.into();
        self
    }

    pub fn factory_method(&self) -> &str {
        &self.factory_method
    }

    pub fn set_binding_const(&mut self, name: impl Into<String>) -> &mut Self {
        self.binding_const = name.into();
        self
    }

    pub fn binding_const(&self) -> &str {
        &self.binding_const
    }

    /// 整体替换别名表
    ///
    /// `mapping` 必须能序列化为键和值都是字符串的映射；数组、标量、
    /// 整数键或含非字符串值的映射都会返回 `ConfigError::InvalidAliases`，此时原有别名表保持不变。
    pub fn set_aliases<M: Serialize>(&mut self, mapping: M) -> Result<&mut Self, ConfigError> {
        self.aliases = alias_table(&mapping)?;
        Ok(self)
    }

    /// 合并别名，冲突的键以新值为准
    ///
    /// 校验规则与 [`Config::set_aliases`] 相同；校验失败时不会合并任何条目。
    pub fn add_aliases<M: Serialize>(&mut self, mapping: M) -> Result<&mut Self, ConfigError> {
        let table = alias_table(&mapping)?;
        self.aliases.extend(table);
        Ok(self)
    }

    /// [`Config::add_aliases`] 的强类型版本，不会失败
    pub fn extend_aliases<I, K, V>(&mut self, entries: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.aliases
            .extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// 设置单个别名，已存在时覆盖
    pub fn add_alias(&mut self, alias: impl Into<String>, target: impl Into<String>) -> &mut Self {
        self.aliases.insert(alias.into(), target.into());
        self
    }

    pub fn aliases(&self) -> &BTreeMap<String, String> {
        &self.aliases
    }
}
