use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 同级条件的组合方式: AND 要求全部成立, OR 至少一个成立
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum BoolOperator {
    #[serde(rename = "AND")]
    And,
    #[serde(rename = "OR")]
    Or,
}

impl Default for BoolOperator {
    fn default() -> Self {
        Self::And
    }
}

/// 单个具名检查的条件定义
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CheckCondition {
    /// 传给检查函数的参数, 逗号分隔
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<String>,

    /// 期望值, 缺省为空串
    #[serde(default = "CheckCondition::default_expected")]
    pub expected_value: Value,

    /// 比较操作符 token, 缺省 `==`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition_to_validate: Option<String>,

    /// 比较前先从检查结果中取出该属性
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_attribute: Option<String>,
}

impl CheckCondition {
    fn default_expected() -> Value {
        Value::String(String::new())
    }
}

impl Default for CheckCondition {
    fn default() -> Self {
        Self {
            params: None,
            expected_value: Self::default_expected(),
            condition_to_validate: None,
            expected_attribute: None,
        }
    }
}

/// 条件树: 条件名 → 条件定义, `operator` 键不参与计数
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ConditionSpec {
    #[serde(default)]
    pub operator: BoolOperator,

    #[serde(flatten)]
    pub checks: BTreeMap<String, CheckCondition>,
}

impl ConditionSpec {
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

/// 插件版本约束子树, 自带组合操作符
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PluginConstraints {
    #[serde(default)]
    pub operator: BoolOperator,

    /// 插件 slug → 版本约束串 (如 `>=1.2.0`)
    #[serde(flatten)]
    pub constraints: BTreeMap<String, String>,
}

/// 产品版本条件
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ProductConditionSpec {
    #[serde(default)]
    pub operator: BoolOperator,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugins: Option<PluginConstraints>,

    /// 主题 slug → 版本约束串; 子树恒为命中即停
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub themes: Option<BTreeMap<String, String>>,
}

impl ProductConditionSpec {
    pub fn is_empty(&self) -> bool {
        self.plugins.is_none() && self.themes.is_none()
    }
}
