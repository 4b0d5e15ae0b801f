//! 跨线程共享的注册表句柄
//!
//! `Registry` 本身不做任何同步；这里用一把互斥锁把整次解析包起来。
//! 工厂操作在锁内运行，拿到的是内部的 `&mut Registry`，
//! 不要在工厂里再次调用同一个 `SharedRegistry`，否则会死锁。

use super::{Registry, RegistryStats};
use crate::errors::ResolveError;
use crate::infrastructure::catalog::Instance;
use parking_lot::Mutex;
use std::any::Any;
use std::sync::Arc;

#[derive(Clone)]
pub struct SharedRegistry {
    inner: Arc<Mutex<Registry>>,
}

impl SharedRegistry {
    pub fn new(registry: Registry) -> Self {
        Self {
            inner: Arc::new(Mutex::new(registry)),
        }
    }

    pub fn resolve(&self, identifier: &str) -> Result<Instance, ResolveError> {
        self.inner.lock().resolve(identifier)
    }

    pub fn resolve_as<T: Any + Send + Sync>(&self, identifier: &str) -> Result<Arc<T>, ResolveError> {
        self.inner.lock().resolve_as::<T>(identifier)
    }

    /// 在持有锁的情况下访问内部注册表
    pub fn with<R>(&self, f: impl FnOnce(&mut Registry) -> R) -> R {
        f(&mut self.inner.lock())
    }

    pub fn stats(&self) -> RegistryStats {
        self.inner.lock().stats().clone()
    }
}

impl From<Registry> for SharedRegistry {
    fn from(registry: Registry) -> Self {
        Self::new(registry)
    }
}
