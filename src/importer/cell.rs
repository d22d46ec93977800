// ==========================================
// 孤儿资助系统 - 单元格原始值
// ==========================================
// 职责: 屏蔽 calamine 单元格类型，供行提取与字段转换使用
// ==========================================

use calamine::{Data, DataType};
use chrono::NaiveDate;
use std::fmt;

/// 单元格原始值（已脱离工作簿，纯内存）
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Date(NaiveDate),
    Bool(bool),
}

impl CellValue {
    /// 空单元格或仅含空白的文本视为未填写
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => write!(f, "{}", s),
            // Excel 数字均为浮点，整数值不带 ".0"
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            CellValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&Data> for CellValue {
    fn from(cell: &Data) -> Self {
        match cell {
            Data::Empty => CellValue::Empty,
            Data::String(s) => CellValue::Text(s.clone()),
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Float(n) => CellValue::Number(*n),
            Data::Bool(b) => CellValue::Bool(*b),
            Data::DateTime(_) | Data::DateTimeIso(_) => match cell.as_date() {
                Some(d) => CellValue::Date(d),
                None => CellValue::Text(cell.to_string()),
            },
            other => CellValue::Text(other.to_string()),
        }
    }
}

/// 列字母 → 0 起始列号（"A" → 0, "Z" → 25, "AA" → 26）
///
/// 非字母或空串返回 None
pub fn column_index(column: &str) -> Option<usize> {
    let column = column.trim();
    if column.is_empty() || !column.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    let mut index = 0usize;
    for c in column.chars() {
        let digit = (c.to_ascii_uppercase() as u8 - b'A') as usize + 1;
        index = index.checked_mul(26)?.checked_add(digit)?;
    }
    Some(index - 1)
}
