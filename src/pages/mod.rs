use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::error::Result;
use crate::store::OptionsStore;
use crate::utils::sanitize_text;

/// 页面状态
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum PageStatus {
    Publish,
    Draft,
    Pending,
    Trash,
    Future,
    AutoDraft,
}

impl PageStatus {
    /// 可复用的状态; 待审/回收站/定时/自动草稿页面不算有效页面
    pub fn is_live(self) -> bool {
        !matches!(
            self,
            Self::Pending | Self::Trash | Self::Future | Self::AutoDraft
        )
    }
}

/// 页面记录
#[derive(Clone, Debug)]
pub struct PageRecord {
    pub id: u64,
    pub slug: String,
    pub title: String,
    pub content: String,
    pub parent: u64,
    pub status: PageStatus,
    pub comments_open: bool,
}

/// 待建页面描述
#[derive(Clone, Debug, Default)]
pub struct PageSpec {
    pub slug: String,
    /// 存放页面 id 的选项名
    pub option: Option<String>,
    pub title: String,
    pub content: String,
    pub parent: u64,
}

/// 新建页面的字段
#[derive(Clone, Debug)]
pub struct NewPage {
    pub slug: String,
    pub title: String,
    pub content: String,
    pub parent: u64,
}

/// 页面存储 trait
pub trait PageStore: Send + Sync {
    fn page(&self, id: u64) -> Result<Option<PageRecord>>;
    fn find_live_by_slug(&self, slug: &str) -> Result<Option<u64>>;
    fn find_live_by_content(&self, fragment: &str) -> Result<Option<u64>>;
    fn find_trashed_by_slug(&self, slug: &str) -> Result<Option<u64>>;
    fn find_trashed_by_content(&self, fragment: &str) -> Result<Option<u64>>;

    /// 回收站页面恢复为已发布
    fn restore(&self, id: u64) -> Result<()>;

    /// 新建已发布页面, 评论关闭, 返回页面 id
    fn create(&self, page: NewPage) -> Result<u64>;
}

/// 幂等建页
///
/// 依次尝试: 选项里记住的页面仍有效则直接复用; 按内容片段或 slug
/// 在有效页面中查找; 再到回收站查找并恢复; 都没有才新建.
/// 命中或新建的页面 id 会写回选项.
pub fn provision_page(
    store: &dyn PageStore,
    options: &dyn OptionsStore,
    spec: &PageSpec,
) -> Result<u64> {
    if let Some(option) = &spec.option {
        if let Some(value) = options.get(option)? {
            if let Some(id) = value.as_u64() {
                if id > 0 {
                    if let Some(page) = store.page(id)? {
                        if page.status.is_live() {
                            return Ok(page.id);
                        }
                    }
                }
            }
        }
    }

    let found = if spec.content.is_empty() {
        store.find_live_by_slug(&spec.slug)?
    } else {
        store.find_live_by_content(&spec.content)?
    };
    if let Some(id) = found {
        remember(options, spec, id)?;
        return Ok(id);
    }

    let trashed = if spec.content.is_empty() {
        store.find_trashed_by_slug(&spec.slug)?
    } else {
        store.find_trashed_by_content(&spec.content)?
    };

    let id = match trashed {
        Some(id) => {
            store.restore(id)?;
            debug!(page = id, slug = %spec.slug, "trashed page restored");
            id
        }
        None => {
            let id = store.create(NewPage {
                slug: sanitize_text(&spec.slug),
                title: sanitize_text(&spec.title),
                content: spec.content.clone(),
                parent: spec.parent,
            })?;
            debug!(page = id, slug = %spec.slug, "page created");
            id
        }
    };
    remember(options, spec, id)?;
    Ok(id)
}

fn remember(options: &dyn OptionsStore, spec: &PageSpec, id: u64) -> Result<()> {
    if let Some(option) = &spec.option {
        options.set(option, json!(id))?;
    }
    Ok(())
}

#[cfg(feature = "memory-store")]
pub use memory::MemoryPages;

#[cfg(feature = "memory-store")]
mod memory {
    use parking_lot::RwLock;

    use crate::error::Result;

    use super::{NewPage, PageRecord, PageStatus, PageStore};

    /// 内存实现
    #[derive(Default)]
    pub struct MemoryPages {
        pages: RwLock<Vec<PageRecord>>,
        next_id: RwLock<u64>,
    }

    impl MemoryPages {
        pub fn new() -> Self {
            Self::default()
        }

        /// 以指定状态插入页面, 测试与种子数据用
        pub fn insert(&self, page: NewPage, status: PageStatus) -> u64 {
            let mut next = self.next_id.write();
            *next += 1;
            let id = *next;
            self.pages.write().push(PageRecord {
                id,
                slug: page.slug,
                title: page.title,
                content: page.content,
                parent: page.parent,
                status,
                comments_open: false,
            });
            id
        }

        pub fn count(&self) -> usize {
            self.pages.read().len()
        }

        fn find(&self, predicate: impl Fn(&PageRecord) -> bool) -> Option<u64> {
            self.pages.read().iter().find(|page| predicate(page)).map(|page| page.id)
        }
    }

    impl PageStore for MemoryPages {
        fn page(&self, id: u64) -> Result<Option<PageRecord>> {
            Ok(self.pages.read().iter().find(|page| page.id == id).cloned())
        }

        fn find_live_by_slug(&self, slug: &str) -> Result<Option<u64>> {
            Ok(self.find(|page| page.status.is_live() && page.slug == slug))
        }

        fn find_live_by_content(&self, fragment: &str) -> Result<Option<u64>> {
            Ok(self.find(|page| page.status.is_live() && page.content.contains(fragment)))
        }

        fn find_trashed_by_slug(&self, slug: &str) -> Result<Option<u64>> {
            Ok(self.find(|page| page.status == PageStatus::Trash && page.slug == slug))
        }

        fn find_trashed_by_content(&self, fragment: &str) -> Result<Option<u64>> {
            Ok(self.find(|page| page.status == PageStatus::Trash && page.content.contains(fragment)))
        }

        fn restore(&self, id: u64) -> Result<()> {
            let mut pages = self.pages.write();
            if let Some(page) = pages.iter_mut().find(|page| page.id == id) {
                page.status = PageStatus::Publish;
            }
            Ok(())
        }

        fn create(&self, page: NewPage) -> Result<u64> {
            Ok(self.insert(page, PageStatus::Publish))
        }
    }
}
