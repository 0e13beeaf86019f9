use anyhow::anyhow;

use crate::error::{RegAdminError, Result};

/// 文本清洗: 控制字符视为空白, 折叠多余空白
pub fn sanitize_text(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// 输入校验器
pub struct InputValidator;

impl InputValidator {
    /// 校验选项名
    pub fn validate_option_name(name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(RegAdminError::Other(anyhow!("选项名不能为空")));
        }
        Ok(())
    }

    /// 校验通知类型标识
    pub fn validate_notice_type(notice_type: &str) -> Result<()> {
        if notice_type.is_empty() {
            return Err(RegAdminError::Other(anyhow!("通知类型不能为空")));
        }

        if !notice_type
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        {
            return Err(RegAdminError::Other(anyhow!(
                "通知类型 '{}' 包含无效字符，应该只包含字母、数字、下划线和短横线",
                notice_type
            )));
        }

        Ok(())
    }
}
