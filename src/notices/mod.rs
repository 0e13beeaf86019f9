use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

use crate::error::Result;
use crate::products::ProductVersions;
use crate::rules::{truthy, CheckRegistry, ConditionEvaluator, ConditionSpec, ProductConditionSpec};
use crate::store::OptionsStore;
use crate::utils::InputValidator;

/// 记录激活日期的选项
pub const ACTIVATED_OPTION: &str = "regadmin_activated";
/// 记录最近更新日期的选项
pub const UPDATED_OPTION: &str = "regadmin_updated_at";

/// 一条通知的门控规则
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NoticeRules {
    pub notice_type: String,
    #[serde(default)]
    pub conditions: ConditionSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_conditions: Option<ProductConditionSpec>,
}

/// 通知门控
///
/// 组合永久关闭标记与规则求值, 决定一条推广通知是否展示.
pub struct NoticeGate<'a> {
    evaluator: ConditionEvaluator<'a>,
    options: &'a dyn OptionsStore,
}

impl<'a> NoticeGate<'a> {
    pub fn new(
        checks: &'a CheckRegistry,
        products: &'a dyn ProductVersions,
        options: &'a dyn OptionsStore,
    ) -> Self {
        Self {
            evaluator: ConditionEvaluator::new(checks, products),
            options,
        }
    }

    /// 通知是否已被永久关闭
    ///
    /// 选项读取失败按未关闭处理, 只记告警.
    pub fn permanently_dismissed(&self, notice_type: &str) -> bool {
        match self.options.get(&dismiss_option(notice_type)) {
            Ok(Some(value)) => truthy(&value),
            Ok(None) => false,
            Err(error) => {
                warn!(notice = notice_type, %error, "failed to read dismissal flag");
                false
            }
        }
    }

    /// 永久关闭通知
    pub fn dismiss_permanently(&self, notice_type: &str) -> Result<()> {
        InputValidator::validate_notice_type(notice_type)?;
        self.options.set(&dismiss_option(notice_type), json!(true))
    }

    /// 通知是否应该展示
    pub fn should_display(&self, notice: &NoticeRules) -> bool {
        if self.permanently_dismissed(&notice.notice_type) {
            return false;
        }
        if !self.evaluator.evaluate_checks(&notice.conditions) {
            return false;
        }
        match &notice.product_conditions {
            Some(spec) => self.evaluator.evaluate_products(spec),
            None => true,
        }
    }
}

fn dismiss_option(notice_type: &str) -> String {
    format!("regadmin_{notice_type}_notice_dismissed")
}

/// 激活时间是否早于指定天数
pub fn activation_older_than(
    options: &dyn OptionsStore,
    days: u64,
    today: NaiveDate,
) -> Result<bool> {
    date_older_than(options, ACTIVATED_OPTION, days, today)
}

/// 最近更新时间是否早于指定天数
pub fn updated_older_than(
    options: &dyn OptionsStore,
    days: u64,
    today: NaiveDate,
) -> Result<bool> {
    date_older_than(options, UPDATED_OPTION, days, today)
}

// 选项缺失或格式不对都按"不够旧"处理
fn date_older_than(
    options: &dyn OptionsStore,
    key: &str,
    days: u64,
    today: NaiveDate,
) -> Result<bool> {
    let Some(value) = options.get(key)? else {
        return Ok(false);
    };
    let Some(raw) = value.as_str() else {
        return Ok(false);
    };
    let Ok(stored) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") else {
        return Ok(false);
    };
    Ok(stored < today - Days::new(days))
}
