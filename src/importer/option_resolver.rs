// ==========================================
// 孤儿资助系统 - 选项解析器
// ==========================================
// 职责: 按配置的选项规则把原始文本解析为规范值
// 说明: 规则缺失 / 无匹配均为可恢复错误，不中断导入
// ==========================================

use crate::config::import_settings::{OptionEntry, OptionRules};
use crate::domain::types::FieldValue;
use crate::importer::error::FieldError;

pub struct OptionResolver<'a> {
    rules: &'a OptionRules,
}

impl<'a> OptionResolver<'a> {
    pub fn new(rules: &'a OptionRules) -> Self {
        Self { rules }
    }

    /// 选项规则是否已在配置中定义
    pub fn option_defined(&self, rule: &str) -> bool {
        self.rules.contains_key(rule)
    }

    /// 解析选项值
    ///
    /// # 参数
    /// - field: 目标字段名（用于错误消息）
    /// - rule: 列声明的选项规则键
    /// - raw: 单元格原始文本
    ///
    /// # 返回
    /// - Ok(FieldValue): 匹配条目的规范值
    /// - Err(OptionUndefined): 规则键未配置（配置缺陷）
    /// - Err(OptionUnmatched): 规则已配置但无匹配条目
    pub fn resolve_option(&self, field: &str, rule: &str, raw: &str) -> Result<FieldValue, FieldError> {
        let entries = self
            .rules
            .get(rule)
            .ok_or_else(|| FieldError::OptionUndefined {
                field: field.to_string(),
                rule: rule.to_string(),
            })?;

        find_entry(entries, raw)
            .map(|entry| FieldValue::from(entry.db.clone()))
            .ok_or_else(|| FieldError::OptionUnmatched {
                field: field.to_string(),
                rule: rule.to_string(),
                value: raw.to_string(),
            })
    }
}

/// 先精确匹配，再做 ASCII 大小写不敏感匹配（两侧均去除首尾空白）
fn find_entry<'e>(entries: &'e [OptionEntry], raw: &str) -> Option<&'e OptionEntry> {
    let raw = raw.trim();
    entries
        .iter()
        .find(|e| e.cell.trim() == raw)
        .or_else(|| entries.iter().find(|e| e.cell.trim().eq_ignore_ascii_case(raw)))
}
