// ==========================================
// 孤儿导入测试数据
// ==========================================
// 列布局与 ImportSettings::default_orphan_settings() 一致（A..AG）
// ==========================================

use super::workbook_builder::{number, text, Cell, WorkbookBuilder};
use std::path::{Path, PathBuf};

pub const HEADERS: [&str; 33] = [
    "Name",
    "Father Name",
    "Father Is Martyr",
    "Father Occupation",
    "Father Place Of Death",
    "Father Cause Of Death",
    "Father Date Of Death",
    "Mother Name",
    "Mother Alive",
    "Date Of Birth",
    "Gender",
    "Health Status",
    "Schooling Status",
    "Goes To School",
    "Guardian Name",
    "Guardian Relationship",
    "Guardian ID",
    "Original Province",
    "Original City",
    "Original Neighborhood",
    "Original Street",
    "Current Province",
    "Current City",
    "Current Neighborhood",
    "Current Street",
    "Contact Number",
    "Alt Contact Number",
    "Sponsored By Another Org",
    "Sponsorship Details",
    "Minor Siblings",
    "Sponsored Minor Siblings",
    "Comments",
    "Status",
];

pub fn header_row() -> Vec<Cell> {
    HEADERS.iter().map(|h| text(h)).collect()
}

/// 一行完整有效的孤儿数据
pub fn valid_row(name: &str) -> Vec<Cell> {
    vec![
        text(name),
        text("Omar"),
        text("Y"),
        text("Teacher"),
        text("Aleppo"),
        text("Shelling"),
        text("2016-03-02"),
        text("Huda"),
        text("Y"),
        // 2011-07-15 的 Excel 序列数
        number(40739.0),
        text("M"),
        text("Good"),
        text("Primary"),
        text("Yes"),
        text("Huda"),
        text("Mother"),
        number(12345678.0),
        text("Aleppo"),
        text("Aleppo"),
        text("Al-Shaar"),
        text("Main Street"),
        text("Outside Syria"),
        text("Gaziantep"),
        text("Sahinbey"),
        text("Ataturk Blvd"),
        number(905551112233.0),
        Cell::Empty,
        text("N"),
        Cell::Empty,
        number(2.0),
        number(0.0),
        Cell::Empty,
        text("Active"),
    ]
}

/// 三处字段错误的行: 日期无法解析 / 性别不匹配 / 整数非法
pub fn invalid_row(name: &str) -> Vec<Cell> {
    let mut row = valid_row(name);
    row[9] = text("Not a Date");
    row[10] = text("X");
    row[16] = text("abc");
    row
}

/// 表头 + 给定数据行
pub fn workbook(rows: Vec<Vec<Cell>>) -> WorkbookBuilder {
    rows.into_iter()
        .fold(WorkbookBuilder::new().row(header_row()), |wb, row| wb.row(row))
}

pub fn write_valid_workbook(dir: &Path, file_name: &str, names: &[&str]) -> PathBuf {
    workbook(names.iter().map(|n| valid_row(n)).collect()).write_to(dir, file_name)
}
