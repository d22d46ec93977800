// ==========================================
// 孤儿资助系统 - 配置层
// ==========================================
// 职责: 导入配置（列定义 + 选项规则）的描述与加载
// 存储: config_kv 表 或 JSON 文件
// ==========================================

pub mod config_manager;
pub mod error;
pub mod import_config_trait;
pub mod import_settings;

// 重导出核心配置类型
pub use config_manager::{config_keys, ConfigManager};
pub use error::{ConfigError, ConfigResult};
pub use import_config_trait::ImportConfigReader;
pub use import_settings::{ColumnSpec, ColumnType, ImportSettings, OptionEntry, OptionRules};
