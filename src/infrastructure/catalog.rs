//! 类型目录
//!
//! Rust 没有运行时反射，因此用一张按标识符索引的能力表来描述
//! “某个标识符是否是已知类型、暴露了哪些具名操作和常量”。
//! 注册表在解析时按约定名称查询这张表。

use super::registry::Registry;
use crate::config::{DEFAULT_BINDING_CONST, DEFAULT_FACTORY_METHOD};
use crate::errors::ResolveError;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// 解析出的实例（类型擦除）
pub type Instance = Arc<dyn Any + Send + Sync>;

/// 类型擦除的工厂操作
pub type FactoryFn = Arc<dyn Fn(&mut Registry) -> Result<Instance, ResolveError> + Send + Sync>;

/// 目录条目的种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    /// 具体类型
    Class,
    /// 抽象标识符（接口）
    Interface,
}

/// 单个标识符的描述：具名操作与具名常量
#[derive(Clone)]
pub struct TypeDescriptor {
    name: String,
    kind: TypeKind,
    operations: HashMap<String, FactoryFn>,
    constants: HashMap<String, String>,
}

impl TypeDescriptor {
    pub fn class(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Class)
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Interface)
    }

    fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            operations: HashMap::new(),
            constants: HashMap::new(),
        }
    }

    /// 声明一个具名的静态操作，接收注册表并返回实例
    pub fn operation<T, F>(mut self, name: impl Into<String>, factory: F) -> Self
    where
        F: Fn(&mut Registry) -> Result<T, ResolveError> + Send + Sync + 'static,
        T: Any + Send + Sync,
    {
        let erased: FactoryFn = Arc::new(move |registry: &mut Registry| {
            let instance = factory(registry)?;
            Ok(Arc::new(instance) as Instance)
        });
        self.operations.insert(name.into(), erased);
        self
    }

    /// 声明一个具名的字符串常量
    pub fn constant(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.constants.insert(name.into(), value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn has_operation(&self, name: &str) -> bool {
        self.operations.contains_key(name)
    }

    pub fn operation_fn(&self, name: &str) -> Option<FactoryFn> {
        self.operations.get(name).cloned()
    }

    pub fn constant_value(&self, name: &str) -> Option<&str> {
        self.constants.get(name).map(String::as_str)
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut operations: Vec<&str> = self.operations.keys().map(String::as_str).collect();
        operations.sort_unstable();
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("operations", &operations)
            .field("constants", &self.constants)
            .finish()
    }
}

/// 能自行构建的具体类型
///
/// 通过 [`Catalog::component`] 注册后，会暴露名为 `create` 的工厂操作；
/// 注册表改用其他工厂操作名时，用 [`Catalog::component_as`] 注册。
pub trait Component: Any + Send + Sync + Sized {
    const IDENTIFIER: &'static str;

    fn create(registry: &mut Registry) -> Result<Self, ResolveError>;
}

/// 把抽象标识符绑定到具体实现
///
/// [`Catalog::binding`] 以 `CREATED_BY` 登记绑定常量，
/// [`Catalog::binding_as`] 可指定其他常量名。可以直接为 `dyn Trait` 实现：
///
/// ```
/// use lazy_registry::Binding;
///
/// trait Transport: Send + Sync {}
///
/// impl Binding for dyn Transport {
///     const IDENTIFIER: &'static str = "app::Transport";
///     const CREATED_BY: &'static str = "app::SmtpTransport";
/// }
/// ```
pub trait Binding {
    const IDENTIFIER: &'static str;
    const CREATED_BY: &'static str;
}

/// 已知标识符的集合
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    types: HashMap<String, TypeDescriptor>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 构建器风格的 [`Catalog::insert`]
    pub fn with(mut self, descriptor: TypeDescriptor) -> Self {
        self.insert(descriptor);
        self
    }

    /// 注册描述，同名条目会被覆盖
    pub fn insert(&mut self, descriptor: TypeDescriptor) -> &mut Self {
        self.types.insert(descriptor.name.clone(), descriptor);
        self
    }

    /// 以默认工厂操作名 `create` 注册组件
    pub fn component<T: Component>(self) -> Self {
        self.component_as::<T>(DEFAULT_FACTORY_METHOD)
    }

    /// 以指定的工厂操作名注册组件
    pub fn component_as<T: Component>(self, factory_method: impl Into<String>) -> Self {
        self.with(TypeDescriptor::class(T::IDENTIFIER).operation(factory_method, T::create))
    }

    /// 以默认绑定常量名 `CREATED_BY` 注册绑定
    pub fn binding<B: Binding + ?Sized>(self) -> Self {
        self.binding_as::<B>(DEFAULT_BINDING_CONST)
    }

    pub fn binding_as<B: Binding + ?Sized>(self, binding_const: impl Into<String>) -> Self {
        self.with(TypeDescriptor::interface(B::IDENTIFIER).constant(binding_const, B::CREATED_BY))
    }

    pub fn get(&self, identifier: &str) -> Option<&TypeDescriptor> {
        self.types.get(identifier)
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.types.contains_key(identifier)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// 所有已知标识符（排序后）
    pub fn identifiers(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.types.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Clock;

    impl Component for Clock {
        const IDENTIFIER: &'static str = "app::Clock";

        fn create(_registry: &mut Registry) -> Result<Self, ResolveError> {
            Ok(Clock)
        }
    }

    trait TimeSource {}

    impl Binding for dyn TimeSource {
        const IDENTIFIER: &'static str = "app::TimeSource";
        const CREATED_BY: &'static str = "app::Clock";
    }

    #[test]
    fn test_descriptor_members() {
        let descriptor = TypeDescriptor::class("app::Thing")
            .operation("build", |_| Ok(1u8))
            .constant("CREATED_BY", "app::Other");

        assert_eq!(descriptor.kind(), TypeKind::Class);
        assert!(descriptor.has_operation("build"));
        assert!(!descriptor.has_operation("create"));
        assert_eq!(descriptor.constant_value("CREATED_BY"), Some("app::Other"));
        assert_eq!(descriptor.constant_value("OTHER"), None);
    }

    #[test]
    fn test_capability_traits_register_default_conventions() {
        let catalog = Catalog::new().component::<Clock>().binding::<dyn TimeSource>();

        assert_eq!(catalog.identifiers(), vec!["app::Clock", "app::TimeSource"]);
        assert!(catalog.get("app::Clock").unwrap().has_operation("create"));

        let source = catalog.get("app::TimeSource").unwrap();
        assert_eq!(source.kind(), TypeKind::Interface);
        assert_eq!(source.constant_value("CREATED_BY"), Some("app::Clock"));
    }

    #[test]
    fn test_capability_traits_under_custom_conventions() {
        let catalog = Catalog::new()
            .component_as::<Clock>("make")
            .binding_as::<dyn TimeSource>("IMPLEMENTED_BY");

        let clock = catalog.get("app::Clock").unwrap();
        assert!(clock.has_operation("make"));
        assert!(!clock.has_operation("create"));

        let source = catalog.get("app::TimeSource").unwrap();
        assert_eq!(source.constant_value("IMPLEMENTED_BY"), Some("app::Clock"));
        assert_eq!(source.constant_value("CREATED_BY"), None);
    }

    #[test]
    fn test_insert_overwrites() {
        let mut catalog = Catalog::new();
        catalog
            .insert(TypeDescriptor::class("x").constant("A", "1"))
            .insert(TypeDescriptor::class("x").constant("A", "2"));

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("x").unwrap().constant_value("A"), Some("2"));
    }
}
