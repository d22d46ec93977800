// ==========================================
// 集成测试辅助模块
// ==========================================

#![allow(dead_code)]

pub mod orphan_rows;
pub mod workbook_builder;
