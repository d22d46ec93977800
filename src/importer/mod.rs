// ==========================================
// 孤儿资助系统 - 导入层
// ==========================================
// 职责: 电子表格 → FieldMap 序列 + 错误台账
// 支持: .xls / .xlsx / .xlsb / .ods（按文件内容识别）
// ==========================================

// 模块声明
pub mod cell;
pub mod document_loader;
pub mod error;
pub mod field_coercer;
pub mod importer_trait;
pub mod option_resolver;
pub mod orphan_importer;
pub mod record_builder;
pub mod row_extractor;

// 重导出核心类型
pub use cell::CellValue;
pub use document_loader::{DocumentFormat, DocumentLoader, SheetDocument, SheetRow};
pub use error::{DocumentError, FieldError};
pub use field_coercer::FieldCoercer;
pub use option_resolver::OptionResolver;
pub use orphan_importer::OrphanImporter;
pub use record_builder::OrphanRecordBuilder;
pub use row_extractor::RowExtractor;

// 重导出 Trait 接口
pub use importer_trait::{CellLookup, RecordBuilder};
