// ==========================================
// 孤儿资助系统 - 导入管道 Trait
// ==========================================
// 职责: 定义导入管道各阶段之间的接口（不包含实现）
// ==========================================

use crate::domain::import::FieldMap;
use crate::importer::cell::CellValue;
use std::collections::HashMap;

// ==========================================
// CellLookup Trait
// ==========================================
// 用途: 按源列读取一行中的单元格
// 实现者: SheetRow（工作簿行）、HashMap（测试/内存数据）
pub trait CellLookup {
    /// 读取源列的单元格
    ///
    /// # 参数
    /// - column: 源列（列字母）
    ///
    /// # 返回
    /// - None: 该列不存在或超出本行范围
    fn cell(&self, column: &str) -> Option<CellValue>;
}

impl CellLookup for HashMap<String, CellValue> {
    fn cell(&self, column: &str) -> Option<CellValue> {
        self.get(column).cloned()
    }
}

// ==========================================
// RecordBuilder Trait
// ==========================================
// 用途: FieldMap → 领域候选记录
// 实现者: OrphanRecordBuilder
// 说明: 与提取循环解耦，不做跨字段/唯一性校验
pub trait RecordBuilder {
    type Record;

    fn to_record(&self, fields: FieldMap) -> Self::Record;
}
