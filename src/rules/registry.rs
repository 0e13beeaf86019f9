use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

/// 检查函数: 接收解析后的参数列表, 返回检查结果
pub type CheckHandler = Arc<dyn Fn(&[String]) -> Value + Send + Sync>;

/// 检查注册表: 条件名 → 检查函数
#[derive(Clone, Default)]
pub struct CheckRegistry {
    checks: HashMap<String, CheckHandler>,
}

impl CheckRegistry {
    pub fn new() -> Self {
        Self {
            checks: HashMap::new(),
        }
    }

    pub fn register<F>(&mut self, name: impl Into<String>, handler: F)
    where
        F: Fn(&[String]) -> Value + Send + Sync + 'static,
    {
        self.checks.insert(name.into(), Arc::new(handler));
    }

    pub fn get(&self, name: &str) -> Option<CheckHandler> {
        self.checks.get(name).map(Arc::clone)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.checks.contains_key(name)
    }
}
