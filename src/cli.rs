use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::products::{InstalledProducts, ProductError, ProductManifest};
use crate::rules::{CheckRegistry, ConditionEvaluator, ConditionSpec, ProductConditionSpec};

/// 规则文件: 条件树加可选的产品条件
#[derive(Debug, Default, Deserialize)]
pub struct RuleFile {
    #[serde(default)]
    pub conditions: ConditionSpec,
    #[serde(default)]
    pub product_conditions: Option<ProductConditionSpec>,
}

pub fn load_product_manifests(dir: &Path) -> std::result::Result<Vec<ProductManifest>, ProductError> {
    let mut products = InstalledProducts::new();
    products.load_directory(dir)?;
    Ok(products.manifests().cloned().collect())
}

/// 对规则文件求值; 具名检查无注册表可用, 全部按空结果处理
pub fn evaluate_rule_file(path: &Path, products_dir: Option<&Path>) -> Result<bool> {
    let content = fs::read_to_string(path).map_err(anyhow::Error::from)?;
    let rules: RuleFile = serde_json::from_str(&content).map_err(anyhow::Error::from)?;

    let mut products = InstalledProducts::new();
    if let Some(dir) = products_dir {
        products.load_directory(dir).map_err(anyhow::Error::from)?;
    }

    let checks = CheckRegistry::new();
    let evaluator = ConditionEvaluator::new(&checks, &products);
    let verdict = evaluator.evaluate_checks(&rules.conditions)
        && rules
            .product_conditions
            .as_ref()
            .map_or(true, |spec| evaluator.evaluate_products(spec));
    Ok(verdict)
}
