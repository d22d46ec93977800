// ==========================================
// 孤儿资助系统 - 导入核心库
// ==========================================
// 技术栈: Rust + calamine + SQLite
// 系统定位: 电子表格 → 待审核孤儿候选记录 + 可读错误台账
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 配置层 - 列定义与选项规则
pub mod config;

// 导入层 - 电子表格解析与提取
pub mod importer;

// 数据仓储层 - 候选记录暂存
pub mod repository;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 导入服务
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    Address, CanonicalValue, FieldMap, FieldValue, Gender, ImportIssue, ImportLedger,
    PendingOrphan,
};

// 配置
pub use config::{ConfigManager, ImportConfigReader, ImportSettings};

// 导入器
pub use importer::{DocumentError, FieldError, OrphanImporter, OrphanRecordBuilder};

// 仓储
pub use repository::{PendingOrphanRepository, PendingOrphanRepositoryImpl};

// API
pub use api::{ImportApi, ImportReport, PendingOrphanValidator, RecordValidator};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "孤儿资助系统 - 数据导入";
