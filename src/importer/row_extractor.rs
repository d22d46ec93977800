// ==========================================
// 孤儿资助系统 - 行提取器
// ==========================================
// 职责: 按列定义顺序逐列读取一行，校验必填，转换类型，组装 FieldMap
// 红线: 单个字段失败不终止整行，尽量暴露全部可修正的问题
// ==========================================

use crate::config::import_settings::{ColumnSpec, ImportSettings};
use crate::domain::import::{FieldMap, ImportLedger};
use crate::importer::error::FieldError;
use crate::importer::field_coercer::FieldCoercer;
use crate::importer::importer_trait::CellLookup;
use crate::importer::option_resolver::OptionResolver;
use tracing::debug;

pub struct RowExtractor<'a> {
    columns: &'a [ColumnSpec],
    coercer: FieldCoercer<'a>,
}

impl<'a> RowExtractor<'a> {
    pub fn new(settings: &'a ImportSettings) -> Self {
        Self {
            columns: &settings.columns,
            coercer: FieldCoercer::new(
                &settings.date_formats,
                OptionResolver::new(&settings.options),
            ),
        }
    }

    /// 提取一行
    ///
    /// # 参数
    /// - row_ref: 行引用（写入台账的 ref）
    /// - row: 单元格读取能力
    /// - ledger: 错误台账（只追加）
    ///
    /// # 返回
    /// - FieldMap: 总是返回；失败或缺失的字段不在其中
    pub fn extract<R>(&self, row_ref: &str, row: &R, ledger: &mut ImportLedger) -> FieldMap
    where
        R: CellLookup + ?Sized,
    {
        let mut fields = FieldMap::new(row_ref);

        for column in self.columns {
            let value = match row.cell(&column.column) {
                Some(v) if !v.is_blank() => v,
                _ => {
                    self.add_error_if_mandatory(row_ref, column, ledger);
                    continue;
                }
            };

            match self.coercer.coerce(&column.field, &column.column_type, &value) {
                Ok(typed) => fields.insert(column.field.clone(), typed),
                Err(e) => {
                    debug!(row = row_ref, column = %column.column, error = %e, "字段转换失败");
                    ledger.add(row_ref, e.to_string());
                }
            }
        }

        fields
    }

    /// 必填列缺值记一条错误；可选列静默跳过
    fn add_error_if_mandatory(&self, row_ref: &str, column: &ColumnSpec, ledger: &mut ImportLedger) {
        if column.mandatory {
            let err = FieldError::MissingMandatory {
                field: column.field.clone(),
            };
            ledger.add(row_ref, err.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::import_settings::{ColumnType, OptionEntry, OptionRules};
    use crate::domain::types::{CanonicalValue, FieldValue};
    use crate::importer::cell::CellValue;
    use std::collections::HashMap;

    fn settings(columns: Vec<ColumnSpec>) -> ImportSettings {
        let mut options = OptionRules::new();
        options.insert(
            "boolean".to_string(),
            vec![OptionEntry::new("Y", CanonicalValue::Boolean(true))],
        );
        ImportSettings::new(columns, options)
    }

    fn row(cells: &[(&str, &str)]) -> HashMap<String, CellValue> {
        cells
            .iter()
            .map(|(col, v)| (col.to_string(), CellValue::Text(v.to_string())))
            .collect()
    }

    #[test]
    fn test_all_fields_extracted() {
        let settings = settings(vec![
            ColumnSpec::new("A", "name", ColumnType::String, true),
            ColumnSpec::new("B", "minor_siblings_count", ColumnType::Integer, false),
            ColumnSpec::new("C", "mother_alive", ColumnType::Option("boolean".to_string()), true),
        ]);
        let extractor = RowExtractor::new(&settings);
        let mut ledger = ImportLedger::new();

        let fields = extractor.extract("2", &row(&[("A", "Ahmad"), ("B", "2"), ("C", "Y")]), &mut ledger);

        assert!(ledger.is_empty());
        assert_eq!(fields.row_ref(), "2");
        assert_eq!(fields.get("name"), Some(&FieldValue::Text("Ahmad".to_string())));
        assert_eq!(fields.get("minor_siblings_count"), Some(&FieldValue::Integer(2)));
        assert_eq!(fields.get("mother_alive"), Some(&FieldValue::Boolean(true)));
    }

    #[test]
    fn test_missing_mandatory_adds_one_error() {
        let settings = settings(vec![ColumnSpec::new("A", "name", ColumnType::String, true)]);
        let extractor = RowExtractor::new(&settings);
        let mut ledger = ImportLedger::new();

        let fields = extractor.extract("3", &row(&[]), &mut ledger);

        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.issues()[0].reference, "3");
        assert!(ledger.issues()[0].error.contains("name"));
        assert!(!fields.contains("name"));
    }

    #[test]
    fn test_missing_optional_is_silent() {
        let settings = settings(vec![ColumnSpec::new("A", "comments", ColumnType::String, false)]);
        let extractor = RowExtractor::new(&settings);
        let mut ledger = ImportLedger::new();

        // 仅含空白视同缺失
        let fields = extractor.extract("3", &row(&[("A", "   ")]), &mut ledger);

        assert!(ledger.is_empty());
        assert!(fields.is_empty());
    }

    #[test]
    fn test_bad_field_does_not_abort_row() {
        let settings = settings(vec![
            ColumnSpec::new("A", "date_of_birth", ColumnType::Date, true),
            ColumnSpec::new("B", "gender", ColumnType::Option("gender".to_string()), true),
            ColumnSpec::new("C", "height", ColumnType::Unrecognized("Float".to_string()), false),
            ColumnSpec::new("D", "name", ColumnType::String, true),
        ]);
        let extractor = RowExtractor::new(&settings);
        let mut ledger = ImportLedger::new();

        let fields = extractor.extract(
            "7",
            &row(&[("A", "Not a Date"), ("B", "F"), ("C", "1.2"), ("D", "Sara")]),
            &mut ledger,
        );

        // 日期无效 + 选项规则未定义 + 类型无法识别
        assert_eq!(ledger.len(), 3);
        assert!(ledger.issues().iter().all(|i| i.reference == "7"));
        assert_eq!(fields.len(), 1);
        assert_eq!(fields.get("name"), Some(&FieldValue::Text("Sara".to_string())));
    }
}
