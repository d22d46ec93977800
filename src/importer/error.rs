// ==========================================
// 孤儿资助系统 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 两类错误都在检测点写入错误台账，不越过导入器边界
// ==========================================

use thiserror::Error;

/// 文档级（结构性）错误：整次导入终止，不处理任何行
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("{file} is not a valid Excel file")]
    NotASpreadsheet { file: String },

    #[error("{file} could not be read: {message}")]
    Unreadable { file: String, message: String },

    #[error("Does not contain any orphan records: {file}")]
    NoDataRows { file: String },
}

/// 字段级错误：记录后继续处理同一行的下一列
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("{field} is mandatory but no value was given")]
    MissingMandatory { field: String },

    #[error("{field}: '{value}' is not a valid integer")]
    InvalidInteger { field: String, value: String },

    #[error("{field}: '{value}' is not a valid date")]
    InvalidDate { field: String, value: String },

    #[error("{field}: unrecognised column type '{type_name}' for value '{value}'")]
    UnrecognizedType {
        field: String,
        type_name: String,
        value: String,
    },

    #[error("{field}: option rule '{rule}' is not defined in the import settings")]
    OptionUndefined { field: String, rule: String },

    #[error("{field}: '{value}' is not a valid {rule} option")]
    OptionUnmatched {
        field: String,
        rule: String,
        value: String,
    },
}

impl FieldError {
    /// 出错的目标字段名
    pub fn field(&self) -> &str {
        match self {
            FieldError::MissingMandatory { field }
            | FieldError::InvalidInteger { field, .. }
            | FieldError::InvalidDate { field, .. }
            | FieldError::UnrecognizedType { field, .. }
            | FieldError::OptionUndefined { field, .. }
            | FieldError::OptionUnmatched { field, .. } => field,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_error_messages_carry_contract_phrases() {
        let err = DocumentError::NotASpreadsheet {
            file: "fake.png.xls".to_string(),
        };
        assert!(err.to_string().contains("not a valid Excel file"));

        let err = DocumentError::NoDataRows {
            file: "empty.xlsx".to_string(),
        };
        assert!(err.to_string().contains("Does not contain any orphan records"));
    }

    #[test]
    fn test_field_error_names_field_and_value() {
        let err = FieldError::InvalidDate {
            field: "date_of_birth".to_string(),
            value: "Not a Date".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("date_of_birth"));
        assert!(msg.contains("Not a Date"));
        assert_eq!(err.field(), "date_of_birth");
    }
}
