// ==========================================
// 孤儿资助系统 - 配置层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 配置层错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    FileReadError { path: String, message: String },

    #[error("配置格式错误: {0}")]
    FormatError(#[from] serde_json::Error),

    #[error("配置存储访问失败: {0}")]
    StoreError(#[from] rusqlite::Error),

    #[error("配置存储锁获取失败: {0}")]
    LockError(String),
}

/// Result 类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
