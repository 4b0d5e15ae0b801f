use thiserror::Error;

/// 配置阶段的错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid alias mapping: {0}. Aliases must be an associative map of alias names to identifiers")]
    InvalidAliases(String),
    #[error("Failed to read file '{0}': {1}")]
    FileRead(String, #[source] std::io::Error),
    #[error("Failed to parse TOML from '{0}': {1}")]
    TomlParse(String, #[source] toml::de::Error),
    #[error("Failed to serialize configuration to TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// 解析阶段的错误
///
/// 嵌套解析中产生的错误原样向外传播，不会再次包装。
#[derive(Debug, Error)]
pub enum ResolveError {
    /// 标识符既不是别名，也不在类型目录中
    #[error("Type or interface not found: {identifier}")]
    NotFound { identifier: String },

    /// 类型已知，但既没有工厂操作也没有绑定常量
    #[error(
        "Expected '{identifier}' to expose either the binding constant '{binding_const}' \
         or the factory operation '{factory_method}' but found neither"
    )]
    Ambiguous {
        identifier: String,
        factory_method: String,
        binding_const: String,
    },

    /// 标识符在自身解析完成之前被再次请求
    #[error("Cyclic resolution detected: {}", .chain.join(" -> "))]
    CyclicResolution { chain: Vec<String> },

    /// 实例存在但不是调用方期望的类型
    #[error("Instance resolved for '{identifier}' is not a '{expected}'")]
    TypeMismatch {
        identifier: String,
        expected: &'static str,
    },

    /// 工厂操作自身报告的失败
    #[error("Factory for '{identifier}' failed: {source}")]
    CreationFailed {
        identifier: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ResolveError {
    /// 将工厂内部的任意错误包装为 `CreationFailed`
    pub fn creation_failed<E>(identifier: impl Into<String>, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        ResolveError::CreationFailed {
            identifier: identifier.into(),
            source: source.into(),
        }
    }

    /// 出错的标识符；循环错误时为闭合循环的那个标识符
    pub fn identifier(&self) -> Option<&str> {
        match self {
            ResolveError::NotFound { identifier }
            | ResolveError::Ambiguous { identifier, .. }
            | ResolveError::TypeMismatch { identifier, .. }
            | ResolveError::CreationFailed { identifier, .. } => Some(identifier.as_str()),
            ResolveError::CyclicResolution { chain } => chain.last().map(String::as_str),
        }
    }
}
