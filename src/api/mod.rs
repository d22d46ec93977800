// ==========================================
// 孤儿资助系统 - API 层
// ==========================================
// 职责: 提供导入服务接口，供命令行入口调用
// ==========================================

pub mod error;
pub mod import_api;
pub mod validator;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use import_api::{ImportApi, ImportReport};
pub use validator::{PendingOrphanValidator, RecordValidator, RecordViolation};
