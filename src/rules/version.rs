use std::cmp::Ordering;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConstraintError {
    #[error("no version constraint found in `{0}`")]
    NoMatch(String),
    #[error("unsupported version operator `{0}`")]
    UnsupportedOperator(String),
}

/// 点分数字版本号
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Version(Vec<u64>);

impl Version {
    /// 解析版本号, 非数字后缀 (如 `-beta`) 被忽略; 无数字可解析时返回 None
    pub fn parse(raw: &str) -> Option<Self> {
        let numeric: String = raw
            .trim()
            .chars()
            .take_while(|c| c.is_ascii_digit() || *c == '.')
            .collect();

        let mut parts = Vec::new();
        for piece in numeric.split('.') {
            match piece.parse::<u64>() {
                Ok(part) => parts.push(part),
                Err(_) => break,
            }
        }
        if parts.is_empty() {
            None
        } else {
            Some(Self(parts))
        }
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        for (a, b) in self.0.iter().zip(other.0.iter()) {
            match a.cmp(b) {
                Ordering::Equal => continue,
                unequal => return unequal,
            }
        }
        // 前缀相同时较长的版本号排在后面: `1.2` < `1.2.0`
        self.0.len().cmp(&other.0.len())
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(u64::to_string).collect();
        write!(f, "{}", parts.join("."))
    }
}

/// 版本比较操作符
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VersionOperator {
    Eq,
    Ne,
    Gt,
    Lt,
    Ge,
    Le,
}

impl VersionOperator {
    fn parse(token: &str) -> Option<Self> {
        match token {
            "=" | "==" => Some(Self::Eq),
            "!=" => Some(Self::Ne),
            ">" => Some(Self::Gt),
            "<" => Some(Self::Lt),
            ">=" => Some(Self::Ge),
            "<=" => Some(Self::Le),
            _ => None,
        }
    }
}

static CONSTRAINT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([<>!=]=?)(\d+(?:\.\d+)+)").expect("version constraint pattern"));

/// 版本约束, 形如 `>=1.2.0`
#[derive(Clone, Debug)]
pub struct VersionConstraint {
    pub operator: VersionOperator,
    pub version: Version,
}

impl VersionConstraint {
    /// 从约束串中提取操作符与版本号
    pub fn parse(raw: &str) -> Result<Self, ConstraintError> {
        let caps = CONSTRAINT
            .captures(raw)
            .ok_or_else(|| ConstraintError::NoMatch(raw.to_string()))?;
        let operator = VersionOperator::parse(&caps[1])
            .ok_or_else(|| ConstraintError::UnsupportedOperator(caps[1].to_string()))?;
        let version = Version::parse(&caps[2]).ok_or_else(|| ConstraintError::NoMatch(raw.to_string()))?;
        Ok(Self { operator, version })
    }

    /// 已安装版本是否满足约束
    pub fn matches(&self, installed: &Version) -> bool {
        match self.operator {
            VersionOperator::Eq => *installed == self.version,
            VersionOperator::Ne => *installed != self.version,
            VersionOperator::Gt => *installed > self.version,
            VersionOperator::Lt => *installed < self.version,
            VersionOperator::Ge => *installed >= self.version,
            VersionOperator::Le => *installed <= self.version,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_parsing() {
        assert_eq!(Version::parse("1.2.0"), Some(Version(vec![1, 2, 0])));
        assert_eq!(Version::parse("1.2.0-beta"), Some(Version(vec![1, 2, 0])));
        assert_eq!(Version::parse("latest"), None);
        assert_eq!(Version::parse(""), None);
    }

    #[test]
    fn test_version_ordering() {
        let parse = |raw: &str| Version::parse(raw).expect("version");
        assert!(parse("1.10.0") > parse("1.9.0"));
        assert!(parse("1.2") < parse("1.2.0"));
        assert!(parse("2.0.0") > parse("1.99.99"));
        assert_eq!(parse("1.2.0"), parse("1.2.0"));
    }

    #[test]
    fn test_constraint_parsing() {
        let constraint = VersionConstraint::parse(">=1.2.0").expect("constraint");
        assert_eq!(constraint.operator, VersionOperator::Ge);
        assert_eq!(constraint.version, Version(vec![1, 2, 0]));

        let eq = VersionConstraint::parse("=2.0.1").expect("constraint");
        assert_eq!(eq.operator, VersionOperator::Eq);

        assert!(matches!(
            VersionConstraint::parse("latest"),
            Err(ConstraintError::NoMatch(_))
        ));
        assert!(matches!(
            VersionConstraint::parse("!1.2.0"),
            Err(ConstraintError::UnsupportedOperator(_))
        ));
    }

    #[test]
    fn test_constraint_matching() {
        let constraint = VersionConstraint::parse(">=1.2.0").expect("constraint");
        assert!(constraint.matches(&Version::parse("1.3.0").expect("version")));
        assert!(constraint.matches(&Version::parse("1.2.0").expect("version")));
        assert!(!constraint.matches(&Version::parse("1.1.0").expect("version")));
    }
}
