//! 惰性、带缓存的对象注册表
//!
//! 通过字符串标识符解析单例实例：类型要么暴露一个接收注册表的工厂操作
//! （默认 `create`），要么通过绑定常量（默认 `CREATED_BY`）指向另一个标识符。
//!
//! ```
//! use lazy_registry::{Catalog, Registry, ResolveError, TypeDescriptor};
//! use std::sync::Arc;
//!
//! struct Database;
//! struct Repository { db: Arc<Database> }
//!
//! let catalog = Catalog::new()
//!     .with(TypeDescriptor::class("app::Database").operation("create", |_| Ok(Database)))
//!     .with(TypeDescriptor::class("app::Repository").operation("create", |registry| {
//!         Ok(Repository { db: registry.resolve_as::<Database>("app::Database")? })
//!     }));
//!
//! let mut registry = Registry::create(catalog, |config| {
//!     config.add_alias("repo", "app::Repository");
//! });
//!
//! let repo = registry.resolve_as::<Repository>("repo")?;
//! let db = registry.resolve_as::<Database>("app::Database")?;
//! assert!(Arc::ptr_eq(&repo.db, &db));
//! # Ok::<(), ResolveError>(())
//! ```

pub mod config;
pub mod errors;
pub mod infrastructure;
pub mod logging;

// Re-export commonly used items for convenience
pub use config::Config;
pub use errors::{ConfigError, ResolveError};
pub use infrastructure::{
    Binding, Catalog, Component, Instance, Registry, RegistryStats, SharedRegistry,
    TypeDescriptor, TypeKind,
};
