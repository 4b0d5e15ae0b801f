//! 注册表 - 简化使用示例
//!
//! 运行：`cargo run --example simple_registry_usage`

use lazy_registry::logging::{init_logging, LoggingConfig};
use lazy_registry::{Binding, Catalog, Component, Registry, ResolveError};
use std::sync::Arc;

#[derive(Debug)]
struct AppSettings {
    app_name: String,
}

impl Component for AppSettings {
    const IDENTIFIER: &'static str = "demo::AppSettings";

    fn create(_registry: &mut Registry) -> Result<Self, ResolveError> {
        Ok(Self {
            app_name: "demo".to_string(),
        })
    }
}

trait Greeter: Send + Sync {
    fn greet(&self, who: &str) -> String;
}

impl Binding for dyn Greeter {
    const IDENTIFIER: &'static str = "demo::Greeter";
    const CREATED_BY: &'static str = "demo::ConsoleGreeter";
}

struct ConsoleGreeter {
    settings: Arc<AppSettings>,
}

impl Greeter for ConsoleGreeter {
    fn greet(&self, who: &str) -> String {
        format!("[{}] hello, {}", self.settings.app_name, who)
    }
}

impl Component for ConsoleGreeter {
    const IDENTIFIER: &'static str = "demo::ConsoleGreeter";

    fn create(registry: &mut Registry) -> Result<Self, ResolveError> {
        Ok(Self {
            settings: registry.resolve_as::<AppSettings>(AppSettings::IDENTIFIER)?,
        })
    }
}

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::development()).map_err(|e| anyhow::anyhow!(e))?;

    let catalog = Catalog::new()
        .component::<AppSettings>()
        .component::<ConsoleGreeter>()
        .binding::<dyn Greeter>();

    let mut registry = Registry::create(catalog, |config| {
        config.add_alias("greeter", <dyn Greeter as Binding>::IDENTIFIER);
    });

    let greeter = registry.resolve_as::<ConsoleGreeter>("greeter")?;
    println!("{}", greeter.greet("world"));

    let same = registry.resolve_as::<ConsoleGreeter>(ConsoleGreeter::IDENTIFIER)?;
    println!("same instance: {}", Arc::ptr_eq(&greeter, &same));
    println!("{}", registry.stats().performance_summary());

    Ok(())
}
