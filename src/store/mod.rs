use serde_json::Value;

use crate::error::Result;

/// 选项存储 trait
///
/// 宿主平台的键值选项表; 求值与门控逻辑只通过该接口读写.
pub trait OptionsStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Value>>;
    fn set(&self, key: &str, value: Value) -> Result<()>;
    fn delete(&self, key: &str) -> Result<()>;
}

#[cfg(feature = "memory-store")]
pub use memory::MemoryOptions;

#[cfg(feature = "memory-store")]
mod memory {
    use std::collections::HashMap;

    use parking_lot::RwLock;
    use serde_json::Value;

    use crate::error::Result;

    use super::OptionsStore;

    /// 内存实现
    #[derive(Default)]
    pub struct MemoryOptions {
        inner: RwLock<HashMap<String, Value>>,
    }

    impl MemoryOptions {
        pub fn new() -> Self {
            Self {
                inner: RwLock::new(HashMap::new()),
            }
        }
    }

    impl OptionsStore for MemoryOptions {
        fn get(&self, key: &str) -> Result<Option<Value>> {
            Ok(self.inner.read().get(key).cloned())
        }

        fn set(&self, key: &str, value: Value) -> Result<()> {
            self.inner.write().insert(key.to_string(), value);
            Ok(())
        }

        fn delete(&self, key: &str) -> Result<()> {
            self.inner.write().remove(key);
            Ok(())
        }
    }
}
