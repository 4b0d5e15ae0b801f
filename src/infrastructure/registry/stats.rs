/// 注册表统计信息
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryStats {
    /// 总解析次数（包含嵌套解析）
    pub total_resolutions: u64,
    /// 缓存命中次数
    pub cache_hits: u64,
    /// 缓存未命中次数
    pub cache_misses: u64,
    /// 工厂操作实际构建的实例数
    pub instances_created: u64,
    /// 被消费的别名数
    pub aliases_consumed: u64,
    /// 跟随绑定常量的次数
    pub bindings_followed: u64,
}

impl RegistryStats {
    /// 缓存命中率（小数形式）
    pub fn hit_rate(&self) -> f64 {
        let total = self.cache_hits + self.cache_misses;
        if total == 0 {
            0.0
        } else {
            self.cache_hits as f64 / total as f64
        }
    }

    /// 获取性能指标摘要
    pub fn performance_summary(&self) -> String {
        format!(
            "Registry: {} total resolutions, {:.1}% cache hit rate, {} instances built, {} aliases consumed, {} bindings followed",
            self.total_resolutions,
            self.hit_rate() * 100.0,
            self.instances_created,
            self.aliases_consumed,
            self.bindings_followed
        )
    }
}
