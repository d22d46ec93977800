// ==========================================
// 孤儿资助系统 - 导入配置读取 Trait
// ==========================================
// 职责: 定义导入模块所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含导入逻辑
// ==========================================

use crate::config::error::ConfigResult;
use crate::config::import_settings::ImportSettings;

// ==========================================
// ImportConfigReader Trait
// ==========================================
// 实现者: ConfigManager（config_kv 表）、ImportSettings（内存/JSON 文件）
pub trait ImportConfigReader: Send + Sync {
    /// 读取完整导入配置（列定义 + 选项规则）
    fn import_settings(&self) -> ConfigResult<ImportSettings>;
}

/// 已加载的配置直接作为读取器使用
impl ImportConfigReader for ImportSettings {
    fn import_settings(&self) -> ConfigResult<ImportSettings> {
        Ok(self.clone())
    }
}
