//! 基础设施层
//!
//! - 类型目录：已知标识符及其暴露的操作与常量
//! - 注册表：按约定解析标识符并缓存实例

pub mod catalog;
pub mod registry;

// 重新导出API
pub use catalog::{Binding, Catalog, Component, FactoryFn, Instance, TypeDescriptor, TypeKind};
pub use registry::{Registry, RegistryStats, SharedRegistry};
