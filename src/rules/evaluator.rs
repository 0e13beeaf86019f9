use std::collections::BTreeMap;

use serde_json::Value;
use tracing::debug;

use crate::products::ProductVersions;

use super::condition::{BoolOperator, CheckCondition, ConditionSpec, PluginConstraints, ProductConditionSpec};
use super::operator::{compare, ComparisonOperator};
use super::registry::CheckRegistry;
use super::version::{Version, VersionConstraint};

/// 条件求值器
///
/// 对声明式的 AND/OR 条件树求值并归并为单个布尔值.
/// 具名检查经注册表调用, 产品条件与已安装版本比较.
/// 求值无内部状态, 可重入.
pub struct ConditionEvaluator<'a> {
    checks: &'a CheckRegistry,
    products: &'a dyn ProductVersions,
}

impl<'a> ConditionEvaluator<'a> {
    pub fn new(checks: &'a CheckRegistry, products: &'a dyn ProductVersions) -> Self {
        Self { checks, products }
    }

    /// 求值具名检查条件树; 空树恒为真
    pub fn evaluate_checks(&self, spec: &ConditionSpec) -> bool {
        if spec.is_empty() {
            return true;
        }

        let mut satisfied = 0usize;
        for (name, condition) in &spec.checks {
            if self.check_satisfied(name, condition) {
                satisfied += 1;
            }
        }
        verdict(spec.operator, satisfied, spec.checks.len())
    }

    fn check_satisfied(&self, name: &str, condition: &CheckCondition) -> bool {
        let params: Vec<String> = condition
            .params
            .as_deref()
            .map(|raw| raw.split(',').map(str::to_string).collect())
            .unwrap_or_default();

        // 未注册的检查按空结果处理, 不报错
        let result = match self.checks.get(name) {
            Some(handler) => handler(&params),
            None => empty(),
        };
        let subject = narrow(&result, condition.expected_attribute.as_deref());

        let token = condition.condition_to_validate.as_deref().unwrap_or("==");
        let met = match ComparisonOperator::parse(token) {
            Some(operator) => compare(operator, &condition.expected_value, &subject),
            None => false,
        };
        debug!(check = name, met, "condition evaluated");
        met
    }

    /// 求值产品版本条件; 空条件恒为真
    pub fn evaluate_products(&self, spec: &ProductConditionSpec) -> bool {
        if spec.is_empty() {
            return true;
        }

        let mut satisfied = 0usize;
        let mut total = 0usize;
        if let Some(plugins) = &spec.plugins {
            total += 1;
            if self.plugins_satisfied(plugins) {
                satisfied += 1;
            }
        }
        if let Some(themes) = &spec.themes {
            total += 1;
            if self.themes_satisfied(themes) {
                satisfied += 1;
            }
        }
        verdict(spec.operator, satisfied, total)
    }

    fn plugins_satisfied(&self, plugins: &PluginConstraints) -> bool {
        if plugins.constraints.is_empty() {
            return false;
        }

        let mut satisfied = 0usize;
        for (slug, raw) in &plugins.constraints {
            if self.version_satisfied(self.products.plugin_version(slug), raw, slug) {
                satisfied += 1;
                // OR 子树命中即停; AND 子树失败也继续扫完
                if plugins.operator == BoolOperator::Or {
                    break;
                }
            }
        }
        verdict(plugins.operator, satisfied, plugins.constraints.len())
    }

    // 主题子树没有自己的操作符, 恒为命中即停
    fn themes_satisfied(&self, themes: &BTreeMap<String, String>) -> bool {
        themes
            .iter()
            .any(|(slug, raw)| self.version_satisfied(self.products.theme_version(slug), raw, slug))
    }

    fn version_satisfied(&self, installed: Option<String>, raw: &str, slug: &str) -> bool {
        let constraint = match VersionConstraint::parse(raw) {
            Ok(constraint) => constraint,
            Err(error) => {
                debug!(product = slug, %error, "unusable version constraint");
                return false;
            }
        };
        let Some(installed) = installed else {
            return false;
        };
        let Some(installed) = Version::parse(&installed) else {
            return false;
        };
        constraint.matches(&installed)
    }
}

fn verdict(operator: BoolOperator, satisfied: usize, total: usize) -> bool {
    match operator {
        BoolOperator::And => satisfied == total,
        BoolOperator::Or => satisfied >= 1,
    }
}

// 检查结果与属性缺失时的空值
fn empty() -> Value {
    Value::String(String::new())
}

// 结果为非空映射或数组时取出指定属性, 其余情况用原始结果比较
fn narrow(result: &Value, attribute: Option<&str>) -> Value {
    let Some(attribute) = attribute else {
        return result.clone();
    };
    match result {
        Value::Object(map) if !map.is_empty() => map.get(attribute).cloned().unwrap_or_else(empty),
        Value::Array(items) if !items.is_empty() => attribute
            .parse::<usize>()
            .ok()
            .and_then(|index| items.get(index).cloned())
            .unwrap_or_else(empty),
        _ => result.clone(),
    }
}
