use std::cmp::Ordering;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// 比较操作符
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComparisonOperator {
    Equal,
    Identical,
    NotEqual,
    NotIdentical,
    Greater,
    Less,
    GreaterOrEqual,
    LessOrEqual,
}

impl ComparisonOperator {
    /// 解析操作符 token, 未知 token 返回 None
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "==" => Some(Self::Equal),
            "===" => Some(Self::Identical),
            "!=" => Some(Self::NotEqual),
            "!==" => Some(Self::NotIdentical),
            ">" => Some(Self::Greater),
            "<" => Some(Self::Less),
            ">=" => Some(Self::GreaterOrEqual),
            "<=" => Some(Self::LessOrEqual),
            _ => None,
        }
    }
}

/// 按操作符比较期望值(左操作数)与实际值(右操作数)
pub fn compare(operator: ComparisonOperator, expected: &Value, actual: &Value) -> bool {
    match operator {
        ComparisonOperator::Equal => loose_eq(expected, actual),
        ComparisonOperator::Identical => expected == actual,
        ComparisonOperator::NotEqual => !loose_eq(expected, actual),
        ComparisonOperator::NotIdentical => expected != actual,
        ComparisonOperator::Greater => matches!(ordering(expected, actual), Some(Ordering::Greater)),
        ComparisonOperator::Less => matches!(ordering(expected, actual), Some(Ordering::Less)),
        ComparisonOperator::GreaterOrEqual => matches!(
            ordering(expected, actual),
            Some(Ordering::Greater) | Some(Ordering::Equal)
        ),
        ComparisonOperator::LessOrEqual => matches!(
            ordering(expected, actual),
            Some(Ordering::Less) | Some(Ordering::Equal)
        ),
    }
}

/// 宽松相等: 数字串与数字互转, 布尔按真值比较, null 等同空标量
pub fn loose_eq(left: &Value, right: &Value) -> bool {
    if left == right {
        return true;
    }
    match (left, right) {
        (Value::Null, other) | (other, Value::Null) => is_empty_scalar(other),
        (Value::Bool(flag), other) | (other, Value::Bool(flag)) => *flag == truthy(other),
        _ => match (as_number(left), as_number(right)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        },
    }
}

/// 真值判断: 空串, `"0"`, 0, 空数组与 null 为假
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty() && text != "0",
        Value::Array(items) => !items.is_empty(),
        Value::Object(_) => true,
    }
}

fn is_empty_scalar(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => !*flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// 排序比较: 双方可转数字按数值, 否则双方都是字符串按字典序
fn ordering(left: &Value, right: &Value) -> Option<Ordering> {
    if let (Some(a), Some(b)) = (as_number(left), as_number(right)) {
        return a.partial_cmp(&b);
    }
    match (left, right) {
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

static NUMERIC_CONSTRAINT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([<>]=?|==|!=|<=|>=)?(\d+)").expect("numeric constraint pattern")
});

/// 按约束串检查数值, 如 `>=10`; 缺省或未知操作符按相等处理
pub fn check_numeric(value: i64, constraint: &str) -> bool {
    let Some(caps) = NUMERIC_CONSTRAINT.captures(constraint) else {
        return false;
    };
    let Ok(number) = caps[2].parse::<i64>() else {
        return false;
    };
    match caps.get(1).map(|m| m.as_str()) {
        Some(">") => value > number,
        Some(">=") => value >= number,
        Some("<") => value < number,
        Some("<=") => value <= number,
        Some("!=") => value != number,
        _ => value == number,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_operator_tokens() {
        assert_eq!(ComparisonOperator::parse("=="), Some(ComparisonOperator::Equal));
        assert_eq!(ComparisonOperator::parse("!=="), Some(ComparisonOperator::NotIdentical));
        assert_eq!(ComparisonOperator::parse("~="), None);
        assert_eq!(ComparisonOperator::parse(""), None);
    }

    #[test]
    fn test_loose_vs_strict_equality() {
        assert!(compare(ComparisonOperator::Equal, &json!("5"), &json!(5)));
        assert!(!compare(ComparisonOperator::Identical, &json!("5"), &json!(5)));
        assert!(compare(ComparisonOperator::Identical, &json!("5"), &json!("5")));
        assert!(compare(ComparisonOperator::NotIdentical, &json!("5"), &json!(5)));
        assert!(!compare(ComparisonOperator::NotEqual, &json!("5"), &json!(5)));
        assert!(compare(ComparisonOperator::Equal, &json!(null), &json!("")));
        assert!(compare(ComparisonOperator::Equal, &json!(true), &json!("yes")));
    }

    #[test]
    fn test_ordering() {
        assert!(compare(ComparisonOperator::GreaterOrEqual, &json!(5), &json!(5)));
        assert!(!compare(ComparisonOperator::Greater, &json!(5), &json!(5)));
        assert!(compare(ComparisonOperator::Greater, &json!("10"), &json!(9)));
        assert!(compare(ComparisonOperator::Less, &json!("apple"), &json!("banana")));
        assert!(!compare(ComparisonOperator::Less, &json!("apple"), &json!(null)));
    }

    #[test]
    fn test_check_numeric() {
        assert!(check_numeric(15, ">=10"));
        assert!(!check_numeric(5, ">=10"));
        assert!(check_numeric(10, "10"));
        assert!(check_numeric(3, "!=4"));
        assert!(!check_numeric(3, "no digits"));
    }
}
