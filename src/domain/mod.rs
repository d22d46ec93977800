// ==========================================
// 孤儿资助系统 - 领域模型层
// ==========================================
// 职责: 定义导入管道的实体与值类型
// 红线: 不含数据访问逻辑,不含导入逻辑
// ==========================================

pub mod import;
pub mod orphan;
pub mod types;

// 重导出核心类型
pub use import::{FieldMap, ImportIssue, ImportLedger};
pub use orphan::{Address, PendingOrphan};
pub use types::{CanonicalValue, FieldValue, Gender};
