// ==========================================
// 孤儿资助系统 - 字段转换器
// ==========================================
// 职责: 单元格原始值 → 按列类型转换的强类型值
// 说明: 选项列整体委托给 OptionResolver
// ==========================================

use crate::config::import_settings::ColumnType;
use crate::domain::types::FieldValue;
use crate::importer::cell::CellValue;
use crate::importer::error::FieldError;
use crate::importer::option_resolver::OptionResolver;
use calamine::{ExcelDateTime, ExcelDateTimeType};
use chrono::NaiveDate;

/// Excel 序列日期的最大值（9999-12-31）
const EXCEL_SERIAL_MAX: f64 = 2_958_465.0;

pub struct FieldCoercer<'a> {
    date_formats: &'a [String],
    resolver: OptionResolver<'a>,
}

impl<'a> FieldCoercer<'a> {
    pub fn new(date_formats: &'a [String], resolver: OptionResolver<'a>) -> Self {
        Self {
            date_formats,
            resolver,
        }
    }

    /// 按列类型转换单元格
    ///
    /// # 参数
    /// - field: 目标字段名（用于错误消息）
    /// - column_type: 列声明类型
    /// - raw: 非空单元格值
    pub fn coerce(
        &self,
        field: &str,
        column_type: &ColumnType,
        raw: &CellValue,
    ) -> Result<FieldValue, FieldError> {
        match column_type {
            ColumnType::Integer => parse_integer(field, raw),
            ColumnType::String => Ok(FieldValue::Text(match raw {
                CellValue::Text(s) => s.clone(),
                other => other.to_string(),
            })),
            ColumnType::Date => self.parse_date(field, raw),
            ColumnType::Option(rule) => {
                self.resolver
                    .resolve_option(field, rule, raw.to_string().trim())
            }
            ColumnType::Unrecognized(type_name) => Err(FieldError::UnrecognizedType {
                field: field.to_string(),
                type_name: type_name.clone(),
                value: raw.to_string(),
            }),
        }
    }

    /// 日期: 原生日期单元格 / 按配置格式解析文本 / Excel 序列数
    fn parse_date(&self, field: &str, raw: &CellValue) -> Result<FieldValue, FieldError> {
        let invalid = || FieldError::InvalidDate {
            field: field.to_string(),
            value: raw.to_string(),
        };

        match raw {
            CellValue::Date(d) => Ok(FieldValue::Date(*d)),
            CellValue::Text(s) => {
                let s = s.trim();
                self.date_formats
                    .iter()
                    .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
                    .map(FieldValue::Date)
                    .ok_or_else(invalid)
            }
            CellValue::Number(n) => excel_serial_to_date(*n)
                .map(FieldValue::Date)
                .ok_or_else(invalid),
            CellValue::Bool(_) | CellValue::Empty => Err(invalid()),
        }
    }
}

/// 十进制整数；数字单元格须无小数部分
fn parse_integer(field: &str, raw: &CellValue) -> Result<FieldValue, FieldError> {
    let invalid = || FieldError::InvalidInteger {
        field: field.to_string(),
        value: raw.to_string(),
    };

    match raw {
        CellValue::Number(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < i64::MAX as f64 => {
            Ok(FieldValue::Integer(*n as i64))
        }
        CellValue::Text(s) => s.trim().parse::<i64>().map(FieldValue::Integer).map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}

/// Excel 序列日期（1900 日期系统，含 1900-02-29 虚拟日的偏移）
fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || !(1.0..=EXCEL_SERIAL_MAX).contains(&serial) {
        return None;
    }
    ExcelDateTime::new(serial, ExcelDateTimeType::DateTime, false)
        .as_datetime()
        .map(|dt| dt.date())
}
