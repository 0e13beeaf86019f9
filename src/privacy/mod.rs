use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use crate::error::Result;
use crate::users::{UserDirectory, UserMetaStore, FORM_ID_KEY, META_PREFIX};

/// 导出的单个字段
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ExportField {
    pub name: String,
    pub value: Value,
}

/// 一组导出数据
#[derive(Clone, Debug, Serialize)]
pub struct ExportGroup {
    pub group_id: String,
    pub group_label: String,
    pub item_id: String,
    pub data: Vec<ExportField>,
}

/// 导出结果
#[derive(Clone, Debug, Serialize)]
pub struct ExportResult {
    pub data: Vec<ExportGroup>,
    pub done: bool,
}

/// 擦除结果
#[derive(Clone, Debug, Default, Serialize)]
pub struct ErasureOutcome {
    pub items_removed: bool,
    pub items_retained: bool,
    pub messages: Vec<String>,
    pub done: bool,
}

/// 从表单定义中提取 字段名 → 标签 映射
///
/// 表单定义是 行 → 栅格 → 字段 的嵌套数组, 只收集同时带有
/// `field_key` 和 `general_setting.field_name`/`label` 的字段.
pub fn field_label_index(forms: &[Value]) -> HashMap<String, String> {
    let mut labels = HashMap::new();
    for form in forms {
        let Some(rows) = form.as_array() else { continue };
        for row in rows {
            let Some(grids) = row.as_array() else { continue };
            for grid in grids {
                let Some(fields) = grid.as_array() else { continue };
                for field in fields {
                    if field.get("field_key").is_none() {
                        continue;
                    }
                    let Some(setting) = field.get("general_setting") else {
                        continue;
                    };
                    let name = setting.get("field_name").and_then(Value::as_str);
                    let label = setting.get("label").and_then(Value::as_str);
                    if let (Some(name), Some(label)) = (name, label) {
                        labels.insert(name.to_string(), label.to_string());
                    }
                }
            }
        }
    }
    labels
}

/// 汇总某邮箱用户的注册元数据用于导出
///
/// 只导出键带注册前缀且能在标签映射中找到的行; 数组值用逗号拼接.
/// 用户不存在时导出为空, `done` 恒为 true.
pub fn export_user_data(
    directory: &dyn UserDirectory,
    meta: &dyn UserMetaStore,
    labels: &HashMap<String, String>,
    email: &str,
) -> Result<ExportResult> {
    let mut groups = Vec::new();

    if let Some(user) = directory.find_by_email(email)? {
        let mut data = Vec::new();
        let mut last_meta_id = 0;
        for entry in meta.entries(user.id)? {
            let Some(stripped) = entry.key.strip_prefix(META_PREFIX) else {
                continue;
            };
            let Some(label) = labels.get(stripped) else {
                continue;
            };
            let value = match &entry.value {
                Value::Array(items) => Value::String(
                    items.iter().map(value_text).collect::<Vec<_>>().join(","),
                ),
                other => other.clone(),
            };
            last_meta_id = entry.id;
            data.push(ExportField {
                name: label.clone(),
                value,
            });
        }

        if !data.is_empty() {
            groups.push(ExportGroup {
                group_id: "registration".to_string(),
                group_label: "User extra information".to_string(),
                item_id: format!("registration-{last_meta_id}"),
                data,
            });
        }
    }

    Ok(ExportResult {
        data: groups,
        done: true,
    })
}

/// 擦除某邮箱用户的注册元数据
///
/// 空邮箱直接完成且不删除任何数据. 前缀行与表单归属行都删到了
/// 才算 `items_removed`.
pub fn erase_user_data(
    directory: &dyn UserDirectory,
    meta: &dyn UserMetaStore,
    email: &str,
) -> Result<ErasureOutcome> {
    let mut outcome = ErasureOutcome {
        done: true,
        ..Default::default()
    };
    if email.is_empty() {
        return Ok(outcome);
    }

    if let Some(user) = directory.find_by_email(email)? {
        let removed_meta = meta.delete_prefixed(user.id, META_PREFIX)?;
        let removed_form = meta.delete_key(user.id, FORM_ID_KEY)?;
        outcome.items_removed = removed_meta > 0 && removed_form > 0;
    }

    Ok(outcome)
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
