// ==========================================
// 孤儿资助系统 - 导入配置（列定义 + 选项规则）
// ==========================================
// 职责: 描述期望的电子表格列、类型、必填性与选项解析规则
// 红线: 只读配置，导入运行前注入，不含导入逻辑
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::domain::types::CanonicalValue;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// 默认表头行数
pub const DEFAULT_HEADER_ROWS: usize = 1;

/// 默认日期文本格式（按顺序尝试）
pub const DEFAULT_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%Y/%m/%d", "%d.%m.%Y"];

// ==========================================
// ColumnType - 列类型
// ==========================================
// 封闭枚举；配置中无法识别的类型名落入 Unrecognized，
// 由字段转换器逐行报告，而不是让整份配置加载失败
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    String,
    Date,
    /// 选项列，携带选项规则键
    Option(String),
    Unrecognized(String),
}

impl ColumnType {
    pub fn name(&self) -> &str {
        match self {
            ColumnType::Integer => "Integer",
            ColumnType::String => "String",
            ColumnType::Date => "Date",
            ColumnType::Option(_) => "Option",
            ColumnType::Unrecognized(name) => name,
        }
    }
}

// ==========================================
// ColumnSpec - 列定义
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ColumnSpecDef", into = "ColumnSpecDef")]
pub struct ColumnSpec {
    /// 源列（电子表格列字母，如 "A"、"AB"）
    pub column: String,
    /// 目标字段名
    pub field: String,
    pub column_type: ColumnType,
    pub mandatory: bool,
}

impl ColumnSpec {
    pub fn new(column: &str, field: &str, column_type: ColumnType, mandatory: bool) -> Self {
        Self {
            column: column.to_string(),
            field: field.to_string(),
            column_type,
            mandatory,
        }
    }

    /// 选项规则键（仅选项列）
    pub fn option_rule(&self) -> Option<&str> {
        match &self.column_type {
            ColumnType::Option(key) => Some(key),
            _ => None,
        }
    }
}

/// 序列化形态: {"column","field","type","option"?,"mandatory"}
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ColumnSpecDef {
    column: String,
    field: String,
    #[serde(rename = "type")]
    type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    option: Option<String>,
    #[serde(default)]
    mandatory: bool,
}

impl From<ColumnSpecDef> for ColumnSpec {
    fn from(def: ColumnSpecDef) -> Self {
        let column_type = match (def.type_name.as_str(), def.option) {
            ("Integer", _) => ColumnType::Integer,
            ("String", _) => ColumnType::String,
            ("Date", _) => ColumnType::Date,
            ("Option", Some(key)) => ColumnType::Option(key),
            (_, _) => ColumnType::Unrecognized(def.type_name),
        };

        Self {
            column: def.column,
            field: def.field,
            column_type,
            mandatory: def.mandatory,
        }
    }
}

impl From<ColumnSpec> for ColumnSpecDef {
    fn from(spec: ColumnSpec) -> Self {
        let (type_name, option) = match spec.column_type {
            ColumnType::Option(key) => ("Option".to_string(), Some(key)),
            other => (other.name().to_string(), None),
        };

        Self {
            column: spec.column,
            field: spec.field,
            type_name,
            option,
            mandatory: spec.mandatory,
        }
    }
}

// ==========================================
// OptionEntry / OptionRules - 选项规则
// ==========================================
// cell: 表格中出现的原始文本; db: 解析后的规范值
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionEntry {
    pub cell: String,
    pub db: CanonicalValue,
}

impl OptionEntry {
    pub fn new(cell: &str, db: CanonicalValue) -> Self {
        Self {
            cell: cell.to_string(),
            db,
        }
    }
}

/// 规则键 → 有序规范条目
pub type OptionRules = BTreeMap<String, Vec<OptionEntry>>;

// ==========================================
// ImportSettings - 导入配置总览
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSettings {
    #[serde(default = "default_header_rows")]
    pub header_rows: usize,
    #[serde(default = "default_date_formats")]
    pub date_formats: Vec<String>,
    pub columns: Vec<ColumnSpec>,
    #[serde(default)]
    pub options: OptionRules,
}

fn default_header_rows() -> usize {
    DEFAULT_HEADER_ROWS
}

fn default_date_formats() -> Vec<String> {
    DEFAULT_DATE_FORMATS.iter().map(|f| f.to_string()).collect()
}

impl ImportSettings {
    pub fn new(columns: Vec<ColumnSpec>, options: OptionRules) -> Self {
        Self {
            header_rows: DEFAULT_HEADER_ROWS,
            date_formats: default_date_formats(),
            columns,
            options,
        }
    }

    pub fn from_json_str(raw: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// 从 JSON 文件读取配置
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::FileReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json_str(&raw)
    }

    pub fn to_json_string(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// 列定义中引用但选项规则中缺失的规则键
    pub fn undefined_option_rules(&self) -> BTreeSet<String> {
        self.columns
            .iter()
            .filter_map(|c| c.option_rule())
            .filter(|key| !self.options.contains_key(*key))
            .map(|key| key.to_string())
            .collect()
    }

    /// 内置孤儿导入模板
    pub fn default_orphan_settings() -> Self {
        use ColumnType::{Date, Integer};
        let text = || ColumnType::String;
        let opt = |key: &str| ColumnType::Option(key.to_string());

        let columns = vec![
            ColumnSpec::new("A", "name", text(), true),
            ColumnSpec::new("B", "father_name", text(), true),
            ColumnSpec::new("C", "father_is_martyr", opt("boolean"), true),
            ColumnSpec::new("D", "father_occupation", text(), false),
            ColumnSpec::new("E", "father_place_of_death", text(), false),
            ColumnSpec::new("F", "father_cause_of_death", text(), false),
            ColumnSpec::new("G", "father_date_of_death", Date, true),
            ColumnSpec::new("H", "mother_name", text(), true),
            ColumnSpec::new("I", "mother_alive", opt("boolean"), true),
            ColumnSpec::new("J", "date_of_birth", Date, true),
            ColumnSpec::new("K", "gender", opt("gender"), true),
            ColumnSpec::new("L", "health_status", text(), false),
            ColumnSpec::new("M", "schooling_status", text(), false),
            ColumnSpec::new("N", "goes_to_school", opt("boolean"), false),
            ColumnSpec::new("O", "guardian_name", text(), false),
            ColumnSpec::new("P", "guardian_relationship", text(), false),
            ColumnSpec::new("Q", "guardian_id_num", Integer, false),
            ColumnSpec::new("R", "original_address_province", opt("province"), true),
            ColumnSpec::new("S", "original_address_city", text(), false),
            ColumnSpec::new("T", "original_address_neighborhood", text(), false),
            ColumnSpec::new("U", "original_address_street", text(), false),
            ColumnSpec::new("V", "current_address_province", opt("province"), true),
            ColumnSpec::new("W", "current_address_city", text(), false),
            ColumnSpec::new("X", "current_address_neighborhood", text(), false),
            ColumnSpec::new("Y", "current_address_street", text(), false),
            ColumnSpec::new("Z", "contact_number", text(), false),
            ColumnSpec::new("AA", "alt_contact_number", text(), false),
            ColumnSpec::new("AB", "sponsored_by_another_org", opt("boolean"), false),
            ColumnSpec::new("AC", "another_org_sponsorship_details", text(), false),
            ColumnSpec::new("AD", "minor_siblings_count", Integer, false),
            ColumnSpec::new("AE", "sponsored_minor_siblings_count", Integer, false),
            ColumnSpec::new("AF", "comments", text(), false),
            ColumnSpec::new("AG", "orphan_status", opt("orphan_status"), false),
        ];

        let mut options = OptionRules::new();
        options.insert(
            "boolean".to_string(),
            vec![
                OptionEntry::new("Y", CanonicalValue::Boolean(true)),
                OptionEntry::new("N", CanonicalValue::Boolean(false)),
                OptionEntry::new("Yes", CanonicalValue::Boolean(true)),
                OptionEntry::new("No", CanonicalValue::Boolean(false)),
                // 原生布尔单元格
                OptionEntry::new("true", CanonicalValue::Boolean(true)),
                OptionEntry::new("false", CanonicalValue::Boolean(false)),
            ],
        );
        options.insert(
            "gender".to_string(),
            vec![
                OptionEntry::new("M", CanonicalValue::Text("Male".to_string())),
                OptionEntry::new("F", CanonicalValue::Text("Female".to_string())),
                OptionEntry::new("Male", CanonicalValue::Text("Male".to_string())),
                OptionEntry::new("Female", CanonicalValue::Text("Female".to_string())),
            ],
        );
        // 省份编码
        let provinces: &[(&str, i64)] = &[
            ("Damascus & Rif Dimashq", 11),
            ("Aleppo", 12),
            ("Homs", 13),
            ("Hama", 14),
            ("Latakia", 15),
            ("Deir Al-Zor", 16),
            ("Daraa", 17),
            ("Idlib", 18),
            ("Ar Raqqah", 19),
            ("Al Hasakah", 20),
            ("Tartous", 21),
            ("Al-Suwayda", 22),
            ("Al-Quneitra", 23),
            ("Outside Syria", 29),
        ];
        options.insert(
            "province".to_string(),
            provinces
                .iter()
                .map(|(name, code)| OptionEntry::new(name, CanonicalValue::Integer(*code)))
                .collect(),
        );
        options.insert(
            "orphan_status".to_string(),
            ["Active", "Inactive", "On Hold", "Under Revision"]
                .iter()
                .map(|s| OptionEntry::new(s, CanonicalValue::Text(s.to_string())))
                .collect(),
        );

        Self::new(columns, options)
    }
}
