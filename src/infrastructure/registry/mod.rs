//! 惰性、带缓存的对象注册表
//!
//! 给定一个标识符（具体类型名或别名），按以下顺序得到它的单例实例：
//! 1. 缓存命中：直接返回
//! 2. 别名：消费别名条目，递归解析目标，并以别名缓存结果
//! 3. 工厂操作：调用类型暴露的工厂操作（默认 `create`），参数为注册表本身
//! 4. 绑定常量：读取常量（默认 `CREATED_BY`）指向的标识符并递归解析
//! 5. 都不满足：`NotFound` 或 `Ambiguous`
//!
//! 别名与绑定链上的每个标识符都会缓存同一个实例，因此经由不同入口
//! 解析到同一个具体类型时只会构建一次。
//!
//! 注册表本身不加锁。跨线程共享请使用 [`SharedRegistry`]。

pub mod shared;
pub mod stats;

pub use shared::SharedRegistry;
pub use stats::RegistryStats;

use super::catalog::{Catalog, Instance};
use crate::config::Config;
use crate::errors::ResolveError;
use std::any::Any;
use std::collections::{BTreeMap, HashMap};
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// 对象注册表
pub struct Registry {
    /// 已知类型（可在多个注册表之间共享）
    catalog: Arc<Catalog>,
    /// 标识符 -> 已解析实例
    cache: HashMap<String, Instance>,
    /// 尚未消费的别名
    aliases: BTreeMap<String, String>,
    factory_method: String,
    binding_const: String,
    /// 正在解析中的标识符，用于检测循环
    resolving: Vec<String>,
    stats: RegistryStats,
}

impl Registry {
    /// 使用默认配置创建注册表
    pub fn new(catalog: impl Into<Arc<Catalog>>) -> Self {
        Self::with_config(catalog, &Config::default())
    }

    /// 用回调配置一个全新的 `Config`，然后构造注册表
    pub fn create<F>(catalog: impl Into<Arc<Catalog>>, configure: F) -> Self
    where
        F: FnOnce(&mut Config),
    {
        let mut config = Config::default();
        configure(&mut config);
        Self::with_config(catalog, &config)
    }

    /// 与 [`Registry::create`] 相同，但回调可以返回配置错误
    pub fn try_create<F, E>(catalog: impl Into<Arc<Catalog>>, configure: F) -> Result<Self, E>
    where
        F: FnOnce(&mut Config) -> Result<(), E>,
    {
        let mut config = Config::default();
        configure(&mut config)?;
        Ok(Self::with_config(catalog, &config))
    }

    /// 从已有配置复制三项设置；之后对 `config` 的修改不会影响注册表
    pub fn with_config(catalog: impl Into<Arc<Catalog>>, config: &Config) -> Self {
        let catalog = catalog.into();
        debug!(
            types = catalog.len(),
            aliases = config.aliases().len(),
            factory_method = config.factory_method(),
            binding_const = config.binding_const(),
            "Registry created"
        );

        Self {
            catalog,
            cache: HashMap::new(),
            aliases: config.aliases().clone(),
            factory_method: config.factory_method().to_string(),
            binding_const: config.binding_const().to_string(),
            resolving: Vec::new(),
            stats: RegistryStats::default(),
        }
    }

    /// 解析标识符，返回单例实例
    ///
    /// 同一标识符的重复调用返回同一个 `Arc`（`Arc::ptr_eq` 成立）。
    /// 失败只影响本次调用；别名在第一次使用时即被消费，即使目标解析失败。
    pub fn resolve(&mut self, identifier: &str) -> Result<Instance, ResolveError> {
        self.stats.total_resolutions += 1;

        if let Some(instance) = self.cache.get(identifier) {
            self.stats.cache_hits += 1;
            trace!(identifier, "Registry cache hit");
            return Ok(Arc::clone(instance));
        }
        self.stats.cache_misses += 1;

        if self.resolving.iter().any(|pending| pending == identifier) {
            let mut chain = self.resolving.clone();
            chain.push(identifier.to_string());
            warn!(chain = %chain.join(" -> "), "Cyclic resolution detected");
            return Err(ResolveError::CyclicResolution { chain });
        }

        let result = {
            let mut frame = ResolutionFrame::enter(self, identifier);
            frame.resolve_uncached(identifier)
        };

        if let Err(e) = &result {
            debug!(identifier, error = %e, "Resolution failed");
        }
        result
    }

    /// 解析并向下转型为具体类型
    pub fn resolve_as<T: Any + Send + Sync>(
        &mut self,
        identifier: &str,
    ) -> Result<Arc<T>, ResolveError> {
        let instance = self.resolve(identifier)?;
        instance
            .downcast::<T>()
            .map_err(|_| ResolveError::TypeMismatch {
                identifier: identifier.to_string(),
                expected: std::any::type_name::<T>(),
            })
    }

    fn resolve_uncached(&mut self, identifier: &str) -> Result<Instance, ResolveError> {
        if let Some(target) = self.aliases.remove(identifier) {
            self.stats.aliases_consumed += 1;
            debug!(alias = identifier, redirect = %target, "Consuming alias");
            let instance = self.resolve(&target)?;
            return Ok(self.remember(identifier, instance));
        }

        let catalog = Arc::clone(&self.catalog);
        let descriptor = catalog
            .get(identifier)
            .ok_or_else(|| ResolveError::NotFound {
                identifier: identifier.to_string(),
            })?;

        if let Some(factory) = descriptor.operation_fn(&self.factory_method) {
            debug!(identifier, operation = %self.factory_method, "Building instance");
            let instance = factory(self)?;
            self.stats.instances_created += 1;
            return Ok(self.remember(identifier, instance));
        }

        if let Some(target) = descriptor.constant_value(&self.binding_const) {
            self.stats.bindings_followed += 1;
            debug!(identifier, redirect = target, "Following binding constant");
            let instance = self.resolve(target)?;
            return Ok(self.remember(identifier, instance));
        }

        Err(ResolveError::Ambiguous {
            identifier: identifier.to_string(),
            factory_method: self.factory_method.clone(),
            binding_const: self.binding_const.clone(),
        })
    }

    fn remember(&mut self, identifier: &str, instance: Instance) -> Instance {
        self.cache.insert(identifier.to_string(), Arc::clone(&instance));
        instance
    }

    /// 标识符是否已有缓存实例
    pub fn is_cached(&self, identifier: &str) -> bool {
        self.cache.contains_key(identifier)
    }

    /// 所有已缓存的标识符（排序后）
    pub fn cached_identifiers(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.cache.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// 尚未被消费的别名
    pub fn aliases(&self) -> &BTreeMap<String, String> {
        &self.aliases
    }

    pub fn factory_method(&self) -> &str {
        &self.factory_method
    }

    pub fn binding_const(&self) -> &str {
        &self.binding_const
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn stats(&self) -> &RegistryStats {
        &self.stats
    }
}

/// 解析栈上的一帧
///
/// 离开作用域时出栈，工厂操作 panic 时也一样。
struct ResolutionFrame<'a> {
    registry: &'a mut Registry,
}

impl<'a> ResolutionFrame<'a> {
    fn enter(registry: &'a mut Registry, identifier: &str) -> Self {
        registry.resolving.push(identifier.to_string());
        Self { registry }
    }
}

impl Deref for ResolutionFrame<'_> {
    type Target = Registry;

    fn deref(&self) -> &Registry {
        self.registry
    }
}

impl DerefMut for ResolutionFrame<'_> {
    fn deref_mut(&mut self) -> &mut Registry {
        self.registry
    }
}

impl Drop for ResolutionFrame<'_> {
    fn drop(&mut self) {
        self.registry.resolving.pop();
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("types", &self.catalog.len())
            .field("cached", &self.cached_identifiers())
            .field("aliases", &self.aliases)
            .field("factory_method", &self.factory_method)
            .field("binding_const", &self.binding_const)
            .finish()
    }
}
