//! 日志初始化
//!
//! 注册表内部只发出 `tracing` 事件；宿主程序可以用这里的
//! [`init_logging`] 安装一个 fmt 订阅者，也可以自行安装。
//!
//! 未设置 `RUST_LOG` 时，默认过滤规则只作用于本 crate
//! （例如 `lazy_registry=debug`），不会放大宿主程序其他依赖的日志。

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 本 crate 事件的 target 前缀
const CRATE_TARGET: &str = "lazy_registry";

/// 日志环境配置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoggingEnvironment {
    /// 开发环境
    Development,
    /// 测试环境
    Testing,
    /// 生产环境
    Production,
}

/// 日志格式配置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// 人类可读格式
    Pretty,
    /// 紧凑格式
    Compact,
}

/// 日志配置
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub environment: LoggingEnvironment,
    /// 未设置 `RUST_LOG` 时注册表事件的级别
    pub level: Level,
    pub format: LogFormat,
    pub show_target: bool,
    pub show_thread_ids: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            environment: LoggingEnvironment::Development,
            level: Level::INFO,
            format: LogFormat::Pretty,
            show_target: true,
            show_thread_ids: false,
        }
    }
}

impl LoggingConfig {
    /// 创建开发环境配置
    pub fn development() -> Self {
        Self {
            environment: LoggingEnvironment::Development,
            level: Level::DEBUG,
            format: LogFormat::Pretty,
            show_target: true,
            show_thread_ids: true,
        }
    }

    /// 创建生产环境配置
    pub fn production() -> Self {
        Self {
            environment: LoggingEnvironment::Production,
            level: Level::INFO,
            format: LogFormat::Compact,
            show_target: false,
            show_thread_ids: false,
        }
    }

    /// 创建测试环境配置
    pub fn testing() -> Self {
        Self {
            environment: LoggingEnvironment::Testing,
            level: Level::ERROR,
            format: LogFormat::Compact,
            show_target: false,
            show_thread_ids: false,
        }
    }

    /// 未设置 `RUST_LOG` 时使用的过滤规则
    pub fn default_directive(&self) -> String {
        format!("{}={}", CRATE_TARGET, self.level.as_str().to_lowercase())
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.default_directive()))
    }
}

/// 初始化日志系统
///
/// 全局订阅者只能安装一次；重复调用返回错误而不是 panic。
pub fn init_logging(config: LoggingConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let ansi = config.environment != LoggingEnvironment::Production;

    // 两种格式的层类型不同，用 Option 层只启用其中一个
    let pretty = (config.format == LogFormat::Pretty).then(|| {
        fmt::layer()
            .pretty()
            .with_target(config.show_target)
            .with_thread_ids(config.show_thread_ids)
            .with_ansi(ansi)
    });
    let compact = (config.format == LogFormat::Compact).then(|| {
        fmt::layer()
            .compact()
            .with_target(config.show_target)
            .with_thread_ids(config.show_thread_ids)
            .with_ansi(ansi)
    });

    tracing_subscriber::registry()
        .with(config.filter())
        .with(pretty)
        .with(compact)
        .try_init()?;

    tracing::debug!(
        directive = %config.default_directive(),
        format = ?config.format,
        "Registry logging initialized"
    );

    Ok(())
}
