// ==========================================
// 孤儿资助系统 - 命令行入口
// ==========================================
// 用法:
//   orphan-import <file> [--config <settings.json>] [--db <sqlite>] [--stage]
//
// 输出: 导入报告（JSON）写到 stdout；导入无效时退出码为 1
// ==========================================

use anyhow::{bail, Context};
use orphan_import::config::{ConfigManager, ImportConfigReader, ImportSettings};
use orphan_import::db::open_sqlite_connection;
use orphan_import::repository::PendingOrphanRepositoryImpl;
use orphan_import::{logging, ImportApi};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// 命令行参数
#[derive(Debug, Default)]
struct CliArgs {
    file: Option<String>,
    config: Option<String>,
    db: Option<String>,
    stage: bool,
}

fn parse_args() -> anyhow::Result<CliArgs> {
    let mut parsed = CliArgs::default();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => parsed.config = Some(args.next().context("--config 需要文件路径")?),
            "--db" => parsed.db = Some(args.next().context("--db 需要数据库路径")?),
            "--stage" => parsed.stage = true,
            flag if flag.starts_with("--") => bail!("未知参数: {}", flag),
            _ if parsed.file.is_none() => parsed.file = Some(arg),
            _ => bail!("只能指定一个导入文件: {}", arg),
        }
    }

    Ok(parsed)
}

/// 用户配置目录下的默认导入配置
fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("orphan-import").join("settings.json"))
        .filter(|path| path.exists())
}

/// 未指定 --db 时的暂存数据库位置
fn default_db_path() -> String {
    let mut path = PathBuf::from("./orphan_import.db");
    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("orphan-import");
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("orphan_import.db");
        }
    }
    path.to_string_lossy().to_string()
}

fn main() -> anyhow::Result<()> {
    logging::init();

    let args = parse_args()?;
    let Some(file) = args.file.clone() else {
        bail!("用法: orphan-import <file> [--config <settings.json>] [--db <sqlite>] [--stage]");
    };

    tracing::info!(version = orphan_import::VERSION, file = %file, "{}", orphan_import::APP_NAME);

    let db_path = match (&args.db, args.stage) {
        (Some(path), _) => Some(path.clone()),
        (None, true) => Some(default_db_path()),
        (None, false) => None,
    };
    let conn = match &db_path {
        Some(path) => {
            tracing::info!(db = %path, "使用数据库");
            Some(Arc::new(Mutex::new(open_sqlite_connection(path)?)))
        }
        None => None,
    };

    // 配置优先级: --config > 数据库 config_kv > 用户配置目录 > 内置模板
    let config: Box<dyn ImportConfigReader> = match (&args.config, &conn, default_settings_path()) {
        (Some(path), _, _) => Box::new(
            ImportSettings::from_json_file(path)
                .with_context(|| format!("读取导入配置失败: {}", path))?,
        ),
        (None, Some(conn), _) => Box::new(ConfigManager::from_connection(conn.clone())?),
        (None, None, Some(path)) => Box::new(ImportSettings::from_json_file(&path)?),
        (None, None, None) => Box::new(ImportSettings::default_orphan_settings()),
    };

    let mut api = ImportApi::from_config(config.as_ref())?;
    if let (true, Some(conn)) = (args.stage, &conn) {
        api = api.with_repository(Arc::new(PendingOrphanRepositoryImpl::from_connection(
            conn.clone(),
        )?));
    }

    let report = api.import_file(&file)?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    if !report.valid {
        std::process::exit(1);
    }
    Ok(())
}
