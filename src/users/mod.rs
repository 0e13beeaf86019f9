use chrono::NaiveDate;
use serde_json::Value;

use crate::error::Result;

/// 注册数据在用户元数据中的键前缀
pub const META_PREFIX: &str = "registration_";
/// 记录注册来源表单的元数据键
pub const FORM_ID_KEY: &str = "reg_form_id";

/// 用户账号
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserAccount {
    pub id: u64,
    pub email: String,
    pub registered_on: NaiveDate,
}

/// 用户元数据行
#[derive(Clone, Debug, PartialEq)]
pub struct MetaEntry {
    pub id: u64,
    pub key: String,
    pub value: Value,
}

/// 用户目录 trait
pub trait UserDirectory: Send + Sync {
    fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>>;

    /// 某表单名下全部注册日期
    fn registration_dates(&self, form_id: u64) -> Result<Vec<NaiveDate>>;
}

/// 用户元数据存储 trait
pub trait UserMetaStore: Send + Sync {
    fn entries(&self, user_id: u64) -> Result<Vec<MetaEntry>>;

    /// 删除键带指定前缀的行, 返回删除数
    fn delete_prefixed(&self, user_id: u64, prefix: &str) -> Result<u64>;

    /// 删除指定键的行, 返回删除数
    fn delete_key(&self, user_id: u64, key: &str) -> Result<u64>;
}

#[cfg(feature = "memory-store")]
pub use memory::MemoryUsers;

#[cfg(feature = "memory-store")]
mod memory {
    use chrono::NaiveDate;
    use parking_lot::RwLock;
    use serde_json::{json, Value};

    use crate::error::Result;

    use super::{MetaEntry, UserAccount, UserDirectory, UserMetaStore, FORM_ID_KEY};

    struct MetaRow {
        user_id: u64,
        entry: MetaEntry,
    }

    /// 内存实现, 同时提供目录与元数据存储
    #[derive(Default)]
    pub struct MemoryUsers {
        users: RwLock<Vec<UserAccount>>,
        meta: RwLock<Vec<MetaRow>>,
        next_user_id: RwLock<u64>,
        next_meta_id: RwLock<u64>,
    }

    impl MemoryUsers {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn add_user(&self, email: impl Into<String>, registered_on: NaiveDate) -> u64 {
            let mut next = self.next_user_id.write();
            *next += 1;
            let id = *next;
            self.users.write().push(UserAccount {
                id,
                email: email.into(),
                registered_on,
            });
            id
        }

        pub fn add_meta(&self, user_id: u64, key: impl Into<String>, value: Value) -> u64 {
            let mut next = self.next_meta_id.write();
            *next += 1;
            let id = *next;
            self.meta.write().push(MetaRow {
                user_id,
                entry: MetaEntry {
                    id,
                    key: key.into(),
                    value,
                },
            });
            id
        }

        /// 登记一次注册: 建账号并记录来源表单
        pub fn add_registration(
            &self,
            email: impl Into<String>,
            registered_on: NaiveDate,
            form_id: u64,
        ) -> u64 {
            let user_id = self.add_user(email, registered_on);
            self.add_meta(user_id, FORM_ID_KEY, json!(form_id));
            user_id
        }
    }

    impl UserDirectory for MemoryUsers {
        fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>> {
            Ok(self
                .users
                .read()
                .iter()
                .find(|user| user.email == email)
                .cloned())
        }

        fn registration_dates(&self, form_id: u64) -> Result<Vec<NaiveDate>> {
            let wanted = json!(form_id);
            let meta = self.meta.read();
            let users = self.users.read();
            let dates = users
                .iter()
                .filter(|user| {
                    meta.iter().any(|row| {
                        row.user_id == user.id && row.entry.key == FORM_ID_KEY && row.entry.value == wanted
                    })
                })
                .map(|user| user.registered_on)
                .collect();
            Ok(dates)
        }
    }

    impl UserMetaStore for MemoryUsers {
        fn entries(&self, user_id: u64) -> Result<Vec<MetaEntry>> {
            Ok(self
                .meta
                .read()
                .iter()
                .filter(|row| row.user_id == user_id)
                .map(|row| row.entry.clone())
                .collect())
        }

        fn delete_prefixed(&self, user_id: u64, prefix: &str) -> Result<u64> {
            let mut meta = self.meta.write();
            let before = meta.len();
            meta.retain(|row| !(row.user_id == user_id && row.entry.key.starts_with(prefix)));
            Ok((before - meta.len()) as u64)
        }

        fn delete_key(&self, user_id: u64, key: &str) -> Result<u64> {
            let mut meta = self.meta.write();
            let before = meta.len();
            meta.retain(|row| !(row.user_id == user_id && row.entry.key == key));
            Ok((before - meta.len()) as u64)
        }
    }
}
