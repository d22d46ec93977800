// ==========================================
// 孤儿资助系统 - 领域类型定义
// ==========================================
// 职责: 导入管道中流转的值类型
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 字段值 (Field Value)
// ==========================================
// 单元格经类型转换后的强类型值
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Boolean(bool),
    Integer(i64),
    Date(NaiveDate),
    Text(String),
}

impl FieldValue {
    /// 文本视图（整数按十进制渲染，布尔/日期不视为文本）
    pub fn as_text(&self) -> Option<String> {
        match self {
            FieldValue::Text(s) => Some(s.clone()),
            FieldValue::Integer(i) => Some(i.to_string()),
            FieldValue::Boolean(_) | FieldValue::Date(_) => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            FieldValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            FieldValue::Date(d) => Some(*d),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Boolean(b) => write!(f, "{}", b),
            FieldValue::Integer(i) => write!(f, "{}", i),
            FieldValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            FieldValue::Text(s) => write!(f, "{}", s),
        }
    }
}

// ==========================================
// 规范值 (Canonical Value)
// ==========================================
// 选项规则中 db 一侧的取值: 布尔 / 外键整数 / 枚举文本
// 不含日期，避免 "2020-01-01" 之类的文本被误判
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CanonicalValue {
    Boolean(bool),
    Integer(i64),
    Text(String),
}

impl From<CanonicalValue> for FieldValue {
    fn from(value: CanonicalValue) -> Self {
        match value {
            CanonicalValue::Boolean(b) => FieldValue::Boolean(b),
            CanonicalValue::Integer(i) => FieldValue::Integer(i),
            CanonicalValue::Text(s) => FieldValue::Text(s),
        }
    }
}

// ==========================================
// 性别 (Gender)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "Male"),
            Gender::Female => write!(f, "Female"),
        }
    }
}

impl Gender {
    /// 从规范文本解析（大小写不敏感）
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            _ => None,
        }
    }
}
