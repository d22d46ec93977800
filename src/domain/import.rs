// ==========================================
// 孤儿资助系统 - 导入领域模型
// ==========================================
// 用途: 导入管道的中间产物与错误台账条目
// 生命周期: 仅在一次导入运行内
// ==========================================

use crate::domain::types::FieldValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// ImportIssue - 导入错误台账条目
// ==========================================
// ref 指向出错的行号或文档本身；同一 ref 可出现多条
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportIssue {
    #[serde(rename = "ref")]
    pub reference: String,
    pub error: String,
}

impl ImportIssue {
    pub fn new(reference: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            error: error.into(),
        }
    }
}

// ==========================================
// ImportLedger - 错误台账
// ==========================================
// 只追加，不撤回；一次导入运行独占
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImportLedger {
    issues: Vec<ImportIssue>,
}

impl ImportLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, reference: impl Into<String>, error: impl Into<String>) {
        self.issues.push(ImportIssue::new(reference, error));
    }

    pub fn issues(&self) -> &[ImportIssue] {
        &self.issues
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// 是否存在指向该引用的条目
    pub fn mentions(&self, reference: &str) -> bool {
        self.issues.iter().any(|i| i.reference == reference)
    }
}

// ==========================================
// FieldMap - 单行提取结果
// ==========================================
// 目标字段名 → 强类型值
// 转换失败或缺失的字段不出现在 map 中
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMap {
    row_ref: String,
    fields: BTreeMap<String, FieldValue>,
}

impl FieldMap {
    pub fn new(row_ref: impl Into<String>) -> Self {
        Self {
            row_ref: row_ref.into(),
            fields: BTreeMap::new(),
        }
    }

    /// 来源行引用（电子表格 1 起始行号）
    pub fn row_ref(&self) -> &str {
        &self.row_ref
    }

    pub fn insert(&mut self, field: impl Into<String>, value: FieldValue) {
        self.fields.insert(field.into(), value);
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<'a> IntoIterator for &'a FieldMap {
    type Item = (&'a String, &'a FieldValue);
    type IntoIter = std::collections::btree_map::Iter<'a, String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_issue_serializes_ref_key() {
        let issue = ImportIssue::new("4", "name is mandatory");
        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["ref"], "4");
        assert_eq!(json["error"], "name is mandatory");
    }

    #[test]
    fn test_ledger_appends_in_order() {
        let mut ledger = ImportLedger::new();
        assert!(ledger.is_empty());

        ledger.add("3", "name is mandatory but no value was given");
        ledger.add("3", "gender: 'X' is not a valid gender option");
        ledger.add("5", "date_of_birth: 'soon' is not a valid date");

        assert_eq!(ledger.len(), 3);
        assert_eq!(ledger.issues()[1].reference, "3");
        assert!(ledger.mentions("5"));
        assert!(!ledger.mentions("4"));
    }

    #[test]
    fn test_field_map_basic_access() {
        let mut map = FieldMap::new("2");
        assert!(map.is_empty());

        map.insert("name", FieldValue::Text("Ahmad".to_string()));
        map.insert("minor_siblings_count", FieldValue::Integer(3));

        assert_eq!(map.row_ref(), "2");
        assert_eq!(map.len(), 2);
        assert!(map.contains("name"));
        assert!(!map.contains("gender"));
        assert_eq!(map.get("minor_siblings_count"), Some(&FieldValue::Integer(3)));
    }
}
