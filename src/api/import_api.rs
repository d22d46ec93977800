// ==========================================
// 孤儿资助系统 - 导入API
// ==========================================
// 职责: 串联导入管道: 提取 → 构建候选记录 → 校验 → 暂存
// 红线: 导入无效时不暂存任何记录
// ==========================================

use crate::api::error::ApiResult;
use crate::api::validator::{PendingOrphanValidator, RecordValidator, RecordViolation};
use crate::config::import_config_trait::ImportConfigReader;
use crate::config::import_settings::ImportSettings;
use crate::domain::import::ImportIssue;
use crate::domain::orphan::PendingOrphan;
use crate::importer::{OrphanImporter, OrphanRecordBuilder, RecordBuilder};
use crate::repository::PendingOrphanRepository;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, info_span, warn};

/// 导入报告
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportReport {
    /// 批次ID（即本次导入运行的 run_id）
    pub batch_id: String,
    /// 文档文件名
    pub file_name: String,
    /// 错误台账为空
    pub valid: bool,
    /// 候选记录（文档顺序，含字段不完整的行）
    pub records: Vec<PendingOrphan>,
    /// 导入错误台账
    pub errors: Vec<ImportIssue>,
    /// 领域校验违规
    pub record_violations: Vec<RecordViolation>,
    /// 实际暂存的记录数
    pub staged: usize,
    /// 导入耗时（毫秒）
    pub elapsed_ms: i64,
}

/// 导入API
pub struct ImportApi {
    settings: ImportSettings,
    validator: PendingOrphanValidator,
    repo: Option<Arc<dyn PendingOrphanRepository>>,
}

impl ImportApi {
    /// 创建新的ImportApi实例（不暂存）
    pub fn new(settings: ImportSettings) -> Self {
        Self {
            settings,
            validator: PendingOrphanValidator::new(),
            repo: None,
        }
    }

    /// 从配置读取器创建
    pub fn from_config<C: ImportConfigReader + ?Sized>(config: &C) -> ApiResult<Self> {
        let settings = config.import_settings()?;
        for rule in settings.undefined_option_rules() {
            warn!(rule = %rule, "列引用了未定义的选项规则");
        }
        Ok(Self::new(settings))
    }

    /// 配置暂存仓储；有效导入的候选记录将写入暂存队列
    pub fn with_repository(mut self, repo: Arc<dyn PendingOrphanRepository>) -> Self {
        self.repo = Some(repo);
        self
    }

    pub fn with_validator(mut self, validator: PendingOrphanValidator) -> Self {
        self.validator = validator;
        self
    }

    pub fn settings(&self) -> &ImportSettings {
        &self.settings
    }

    /// 导入一个电子表格
    ///
    /// # 参数
    /// - file_path: 电子表格路径
    ///
    /// # 返回
    /// - Ok(ImportReport): 导入结果（文档无效同样返回 Ok，问题在 errors 中）
    /// - Err(ApiError): 暂存失败
    pub fn import_file<P: AsRef<Path>>(&self, file_path: P) -> ApiResult<ImportReport> {
        let start = Instant::now();
        let mut importer = OrphanImporter::new(file_path.as_ref(), self.settings.clone());
        let batch_id = importer.run_id().to_string();
        let file_name = importer.document_ref();

        let span = info_span!("import_file", batch_id = %batch_id, file = %file_name);
        let _guard = span.enter();

        importer.extract_records();
        let valid = importer.is_valid();
        let (field_maps, errors) = importer.into_parts();

        let builder = OrphanRecordBuilder::new();
        let records: Vec<PendingOrphan> = field_maps
            .into_iter()
            .map(|fields| builder.to_record(fields))
            .collect();

        let record_violations: Vec<RecordViolation> = records
            .iter()
            .flat_map(|record| self.validator.validate(record))
            .collect();

        let staged = match (&self.repo, valid) {
            (Some(repo), true) => repo.stage(&batch_id, &records)?,
            _ => 0,
        };

        info!(
            valid = valid,
            records = records.len(),
            errors = errors.len(),
            violations = record_violations.len(),
            staged = staged,
            "导入完成"
        );

        Ok(ImportReport {
            batch_id,
            file_name,
            valid,
            records,
            errors,
            record_violations,
            staged,
            elapsed_ms: start.elapsed().as_millis() as i64,
        })
    }

    /// 丢弃已暂存的批次
    ///
    /// # 返回
    /// - Ok(usize): 删除的记录数；未配置仓储为 0
    pub fn discard_batch(&self, batch_id: &str) -> ApiResult<usize> {
        match &self.repo {
            Some(repo) => Ok(repo.discard_batch(batch_id)?),
            None => Ok(0),
        }
    }
}
