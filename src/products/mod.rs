use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProductKind {
    Plugin,
    Theme,
}

/// 产品描述文件 (product.json)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProductManifest {
    pub name: String,
    pub version: String,
    #[serde(default = "ProductManifest::default_kind")]
    pub kind: ProductKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl ProductManifest {
    fn default_kind() -> ProductKind {
        ProductKind::Plugin
    }
}

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("product manifest not found: {0}")]
    ManifestMissing(String),
    #[error("failed to parse product manifest: {0}")]
    ManifestParse(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 已安装产品的版本查询接口
pub trait ProductVersions: Send + Sync {
    fn plugin_version(&self, slug: &str) -> Option<String>;
    fn theme_version(&self, slug: &str) -> Option<String>;
}

/// 已安装产品目录
///
/// 插件按标识符注册 (目录名或 `vendor/entry` 形式), 查询时标识符
/// 包含 slug 即视为命中, 取第一个; 主题按 slug 精确匹配.
#[derive(Default)]
pub struct InstalledProducts {
    plugins: Vec<(String, ProductManifest)>,
    themes: HashMap<String, ProductManifest>,
}

impl InstalledProducts {
    pub fn new() -> Self {
        Self {
            plugins: Vec::new(),
            themes: HashMap::new(),
        }
    }

    pub fn register(&mut self, identifier: impl Into<String>, manifest: ProductManifest) {
        match manifest.kind {
            ProductKind::Plugin => self.plugins.push((identifier.into(), manifest)),
            ProductKind::Theme => {
                self.themes.insert(identifier.into(), manifest);
            }
        }
    }

    /// 扫描目录, 从每个子目录的 product.json 载入产品描述
    pub fn load_directory(&mut self, dir: impl AsRef<Path>) -> Result<(), ProductError> {
        let dir = dir.as_ref();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.is_dir() {
                let manifest_path = path.join("product.json");
                if manifest_path.exists() {
                    let manifest = Self::load_manifest(&manifest_path)?;
                    let identifier = entry.file_name().to_string_lossy().into_owned();
                    tracing::debug!(product = %manifest.name, kind = ?manifest.kind, "product loaded");
                    self.register(identifier, manifest);
                }
            }
        }
        Ok(())
    }

    pub fn manifests(&self) -> impl Iterator<Item = &ProductManifest> {
        self.plugins
            .iter()
            .map(|(_, manifest)| manifest)
            .chain(self.themes.values())
    }

    fn load_manifest(path: &Path) -> Result<ProductManifest, ProductError> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|err| ProductError::ManifestParse(err.to_string()))
    }
}

impl ProductVersions for InstalledProducts {
    fn plugin_version(&self, slug: &str) -> Option<String> {
        self.plugins
            .iter()
            .find(|(identifier, _)| identifier.contains(slug))
            .map(|(_, manifest)| manifest.version.clone())
    }

    fn theme_version(&self, slug: &str) -> Option<String> {
        self.themes.get(slug).map(|manifest| manifest.version.clone())
    }
}
