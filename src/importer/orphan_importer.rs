// ==========================================
// 孤儿资助系统 - 孤儿导入器（导入编排）
// ==========================================
// 职责: 加载文档一次，逐行提取，汇总错误台账
// 流程: 打开文档 → 逐行提取 → FieldMap 序列 + 错误台账
// 状态: Unopened → Opened → Extracted；或 Unopened → Rejected（终态）
// ==========================================

use crate::config::error::ConfigResult;
use crate::config::import_config_trait::ImportConfigReader;
use crate::config::import_settings::ImportSettings;
use crate::domain::import::{FieldMap, ImportIssue, ImportLedger};
use crate::importer::document_loader::{document_name, DocumentLoader, SheetDocument};
use crate::importer::row_extractor::RowExtractor;
use std::path::{Path, PathBuf};
use tracing::{debug, info, info_span, warn};
use uuid::Uuid;

/// 导入运行状态
#[derive(Debug)]
enum ImportState {
    Unopened,
    Opened(SheetDocument),
    Rejected,
    Extracted,
}

// ==========================================
// OrphanImporter
// ==========================================
// 一个实例对应一个文档的一次运行，不跨运行复用
pub struct OrphanImporter {
    file_path: PathBuf,
    settings: ImportSettings,
    run_id: Uuid,
    state: ImportState,
    ledger: ImportLedger,
    field_maps: Vec<FieldMap>,
}

impl OrphanImporter {
    /// 创建导入器
    ///
    /// # 参数
    /// - file_path: 电子表格路径
    /// - settings: 列定义 + 选项规则（显式注入，无全局配置）
    pub fn new<P: AsRef<Path>>(file_path: P, settings: ImportSettings) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
            settings,
            run_id: Uuid::new_v4(),
            state: ImportState::Unopened,
            ledger: ImportLedger::new(),
            field_maps: Vec::new(),
        }
    }

    /// 从配置读取器创建导入器
    pub fn from_config<P, C>(file_path: P, config: &C) -> ConfigResult<Self>
    where
        P: AsRef<Path>,
        C: ImportConfigReader + ?Sized,
    {
        Ok(Self::new(file_path, config.import_settings()?))
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// 台账中指代文档本身的引用
    pub fn document_ref(&self) -> String {
        document_name(&self.file_path)
    }

    /// 打开文档（仅首次调用生效）
    ///
    /// # 返回
    /// - true: 文档可用（已打开或已提取）
    /// - false: 文档被拒绝，错误已写入台账
    pub fn open_doc(&mut self) -> bool {
        if let ImportState::Unopened = self.state {
            let loader = DocumentLoader::new(self.settings.header_rows);
            self.state = match loader.open(&self.file_path) {
                Ok(doc) => ImportState::Opened(doc),
                Err(e) => {
                    warn!(run_id = %self.run_id, error = %e, "文档被拒绝");
                    let reference = self.document_ref();
                    self.ledger.add(reference, e.to_string());
                    ImportState::Rejected
                }
            };
        }

        !matches!(self.state, ImportState::Rejected)
    }

    /// 提取全部数据行
    ///
    /// # 返回
    /// - 文档顺序的 FieldMap 序列（字段不完整的行同样保留）
    /// - 文档被拒绝时为空
    ///
    /// # 说明
    /// - 重复调用返回同一序列，不重新加载，不重复记错
    pub fn extract_records(&mut self) -> &[FieldMap] {
        self.open_doc();

        if let ImportState::Opened(_) = self.state {
            if let ImportState::Opened(doc) = std::mem::replace(&mut self.state, ImportState::Extracted) {
                self.extract_rows(&doc);
            }
        }

        &self.field_maps
    }

    fn extract_rows(&mut self, doc: &SheetDocument) {
        let span = info_span!("extract_rows", run_id = %self.run_id, file = %self.document_ref());
        let _guard = span.enter();

        let extractor = RowExtractor::new(&self.settings);
        for row in &doc.rows {
            let row_ref = row.number.to_string();
            let fields = extractor.extract(&row_ref, row, &mut self.ledger);
            debug!(row = row.number, fields = fields.len(), "行提取完成");
            self.field_maps.push(fields);
        }

        info!(
            rows = self.field_maps.len(),
            errors = self.ledger.len(),
            "提取完成"
        );
    }

    /// 台账为空即有效（与是否产生 FieldMap 无关）
    pub fn is_valid(&self) -> bool {
        self.ledger.is_empty()
    }

    /// 完整的有序错误台账
    pub fn import_errors(&self) -> &[ImportIssue] {
        self.ledger.issues()
    }

    /// 已提取且所在行无任何错误的 FieldMap
    pub fn clean_records(&self) -> Vec<&FieldMap> {
        self.field_maps
            .iter()
            .filter(|fields| !self.ledger.mentions(fields.row_ref()))
            .collect()
    }

    /// 交出提取结果（消费导入器）
    pub fn into_parts(self) -> (Vec<FieldMap>, Vec<ImportIssue>) {
        (self.field_maps, self.ledger.issues().to_vec())
    }
}
