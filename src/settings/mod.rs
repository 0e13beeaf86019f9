use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::store::OptionsStore;
use crate::utils::{sanitize_text, InputValidator};

/// 表单提交的单个设置项
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SettingEntry {
    pub name: String,
    #[serde(default)]
    pub value: Value,
}

impl SettingEntry {
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// 按表单维度持久化设置的存储 trait
pub trait FormSettingsStore: Send + Sync {
    fn set_setting(&self, form_id: u64, key: &str, value: Value) -> Result<()>;
    fn setting(&self, form_id: u64, key: &str) -> Result<Option<Value>>;
}

/// 聚合重名设置项
///
/// 多选控件会用同一名字提交多次, 聚合后的值是按提交顺序排列的数组.
pub fn format_setting_data(entries: &[SettingEntry]) -> Vec<SettingEntry> {
    let mut grouped: Vec<SettingEntry> = Vec::new();
    for entry in entries {
        if let Some(existing) = grouped.iter_mut().find(|e| e.name == entry.name) {
            match &mut existing.value {
                Value::Array(items) => items.push(entry.value.clone()),
                current => {
                    let first = current.take();
                    existing.value = Value::Array(vec![first, entry.value.clone()]);
                }
            }
        } else {
            grouped.push(entry.clone());
        }
    }
    grouped
}

/// 持久化一个表单的全部设置
///
/// 提交名末尾的 `[]` 会被剥掉; 字符串值逐项清洗;
/// 已知字段没有对应提交时写入空串.
pub fn update_form_settings(
    store: &dyn FormSettingsStore,
    form_id: u64,
    submitted: &[SettingEntry],
    known_fields: &[String],
) -> Result<()> {
    let mut remapped: HashMap<String, Value> = HashMap::new();
    for entry in format_setting_data(submitted) {
        let name = entry
            .name
            .strip_suffix("[]")
            .unwrap_or(&entry.name)
            .to_string();
        remapped.insert(name, entry.value);
    }

    for field in known_fields {
        let value = match remapped.get(field) {
            Some(Value::Array(items)) => Value::Array(items.iter().map(sanitize_value).collect()),
            Some(value) => sanitize_value(value),
            None => Value::String(String::new()),
        };
        store.set_setting(form_id, field, value)?;
    }
    Ok(())
}

fn sanitize_value(value: &Value) -> Value {
    match value {
        Value::String(text) => Value::String(sanitize_text(text)),
        other => other.clone(),
    }
}

/// 读取选项, 不存在时返回默认值
pub fn get_option(options: &dyn OptionsStore, name: &str, default: Value) -> Result<Value> {
    InputValidator::validate_option_name(name)?;
    Ok(options.get(name)?.unwrap_or(default))
}

#[cfg(feature = "memory-store")]
pub use memory::MemoryFormSettings;

#[cfg(feature = "memory-store")]
mod memory {
    use std::collections::HashMap;

    use parking_lot::RwLock;
    use serde_json::Value;

    use crate::error::Result;

    use super::FormSettingsStore;

    /// 内存实现
    #[derive(Default)]
    pub struct MemoryFormSettings {
        inner: RwLock<HashMap<(u64, String), Value>>,
    }

    impl MemoryFormSettings {
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl FormSettingsStore for MemoryFormSettings {
        fn set_setting(&self, form_id: u64, key: &str, value: Value) -> Result<()> {
            self.inner.write().insert((form_id, key.to_string()), value);
            Ok(())
        }

        fn setting(&self, form_id: u64, key: &str) -> Result<Option<Value>> {
            Ok(self.inner.read().get(&(form_id, key.to_string())).cloned())
        }
    }
}
