// ==========================================
// 孤儿资助系统 - 配置管理器
// ==========================================
// 职责: 导入配置的加载、查询与保存
// 存储: config_kv 表 (scope_id + key → value)
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::import_config_trait::ImportConfigReader;
use crate::config::import_settings::ImportSettings;
use crate::db::{ensure_config_schema, open_sqlite_connection};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

/// 配置键
pub mod config_keys {
    /// 导入配置（JSON 文档）
    pub const IMPORT_SETTINGS: &str = "import/settings";
}

/// 全局作用域
const GLOBAL_SCOPE: &str = "global";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> ConfigResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        ensure_config_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager（建表幂等）
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> ConfigResult<Self> {
        {
            let guard = conn
                .lock()
                .map_err(|e| ConfigError::LockError(e.to_string()))?;
            ensure_config_schema(&guard)?;
        }

        Ok(Self { conn })
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    pub fn get_config_value(&self, key: &str) -> ConfigResult<Option<String>> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| ConfigError::LockError(e.to_string()))?;

        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE scope_id = ?1 AND key = ?2",
                params![GLOBAL_SCOPE, key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;

        Ok(value)
    }

    /// 写入配置值（UPSERT）
    pub fn set_config_value(&self, key: &str, value: &str) -> ConfigResult<()> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| ConfigError::LockError(e.to_string()))?;

        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES (?1, ?2, ?3)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?3, updated_at = datetime('now')",
            params![GLOBAL_SCOPE, key, value],
        )?;

        Ok(())
    }

    /// 保存导入配置
    pub fn save_import_settings(&self, settings: &ImportSettings) -> ConfigResult<()> {
        let json = settings.to_json_string()?;
        self.set_config_value(config_keys::IMPORT_SETTINGS, &json)?;
        info!(columns = settings.columns.len(), "导入配置已保存");
        Ok(())
    }
}

impl ImportConfigReader for ConfigManager {
    /// 读取导入配置；未配置时回退到内置孤儿模板
    fn import_settings(&self) -> ConfigResult<ImportSettings> {
        match self.get_config_value(config_keys::IMPORT_SETTINGS)? {
            Some(raw) => ImportSettings::from_json_str(&raw),
            None => {
                debug!("config_kv 中无导入配置，使用内置模板");
                Ok(ImportSettings::default_orphan_settings())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::import_settings::{ColumnSpec, ColumnType};
    use tempfile::NamedTempFile;

    fn temp_manager() -> (NamedTempFile, ConfigManager) {
        let temp_file = NamedTempFile::new().unwrap();
        let manager = ConfigManager::new(temp_file.path().to_str().unwrap()).unwrap();
        (temp_file, manager)
    }

    #[test]
    fn test_missing_settings_fall_back_to_default() {
        let (_tmp, manager) = temp_manager();
        let settings = manager.import_settings().unwrap();
        assert_eq!(settings, ImportSettings::default_orphan_settings());
    }

    #[test]
    fn test_save_and_reload_settings() {
        let (_tmp, manager) = temp_manager();
        let settings = ImportSettings::new(
            vec![ColumnSpec::new("A", "name", ColumnType::String, true)],
            Default::default(),
        );

        manager.save_import_settings(&settings).unwrap();
        assert_eq!(manager.import_settings().unwrap(), settings);

        // 二次保存覆盖而非重复插入
        manager.save_import_settings(&settings).unwrap();
        assert_eq!(manager.import_settings().unwrap(), settings);
    }

    #[test]
    fn test_malformed_settings_reported() {
        let (_tmp, manager) = temp_manager();
        manager
            .set_config_value(config_keys::IMPORT_SETTINGS, "{not json")
            .unwrap();
        assert!(matches!(
            manager.import_settings(),
            Err(ConfigError::FormatError(_))
        ));
    }
}
