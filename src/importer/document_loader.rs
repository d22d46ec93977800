// ==========================================
// 孤儿资助系统 - 文档加载器
// ==========================================
// 职责: 打开电子表格，按内容（魔数）而非扩展名判定格式
// 支持: 旧版 OLE2 (.xls) / OOXML (.xlsx/.xlsm/.xlsb) / OpenDocument (.ods)
// ==========================================

use crate::importer::cell::{column_index, CellValue};
use crate::importer::error::DocumentError;
use crate::importer::importer_trait::CellLookup;
use calamine::{Data, Ods, Range, Reader, Xls, Xlsb, Xlsx};
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, info, warn};

/// OLE2 复合文档魔数（旧版 .xls）
const OLE2_MAGIC: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// ZIP 本地文件头魔数（.xlsx/.xlsb/.ods）
const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// 工作簿读取源（整个文件读入内存）
type Source = Cursor<Vec<u8>>;

/// 第一张工作表的读取结果（错误为格式化后的解析器消息）
type SheetRead = Result<Range<Data>, String>;

/// 按内容识别出的文档容器格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// OLE2/BIFF 旧版工作簿
    Legacy,
    /// ZIP 容器（OOXML 或 OpenDocument）
    Zipped,
}

/// 根据文件头判定格式；无法识别返回 None
pub fn sniff_format(bytes: &[u8]) -> Option<DocumentFormat> {
    if bytes.starts_with(&OLE2_MAGIC) {
        Some(DocumentFormat::Legacy)
    } else if bytes.starts_with(&ZIP_MAGIC) {
        Some(DocumentFormat::Zipped)
    } else {
        None
    }
}

// ==========================================
// SheetRow - 工作表中的一行数据
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct SheetRow {
    /// 电子表格行号（1 起始）
    pub number: usize,
    /// 按绝对列号排列的单元格
    pub cells: Vec<CellValue>,
}

impl SheetRow {
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(CellValue::is_blank)
    }
}

impl CellLookup for SheetRow {
    fn cell(&self, column: &str) -> Option<CellValue> {
        column_index(column).and_then(|idx| self.cells.get(idx).cloned())
    }
}

// ==========================================
// SheetDocument - 已加载的工作表
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct SheetDocument {
    pub format: DocumentFormat,
    /// 表头之后的非空数据行（文档顺序）
    pub rows: Vec<SheetRow>,
}

// ==========================================
// DocumentLoader
// ==========================================
pub struct DocumentLoader {
    header_rows: usize,
}

impl DocumentLoader {
    /// # 参数
    /// - header_rows: 第一张工作表顶部的表头行数
    pub fn new(header_rows: usize) -> Self {
        Self { header_rows }
    }

    /// 打开并读取第一张工作表
    ///
    /// # 返回
    /// - Ok(SheetDocument): 至少包含一行数据
    /// - Err(DocumentError): 非电子表格 / 读取失败 / 无数据行
    pub fn open<P: AsRef<Path>>(&self, path: P) -> Result<SheetDocument, DocumentError> {
        let path = path.as_ref();
        let file = document_name(path);

        let bytes = std::fs::read(path).map_err(|e| DocumentError::Unreadable {
            file: file.clone(),
            message: e.to_string(),
        })?;

        let format = sniff_format(&bytes).ok_or_else(|| {
            warn!(file = %file, "文件头不是电子表格格式");
            DocumentError::NotASpreadsheet { file: file.clone() }
        })?;

        let range = match format {
            DocumentFormat::Legacy => first_sheet::<Xls<Source>>(&bytes),
            // ZIP 容器依次尝试 OOXML / 二进制 OOXML / OpenDocument
            DocumentFormat::Zipped => {
                let readers: [fn(&[u8]) -> Option<SheetRead>; 3] = [
                    first_sheet::<Xlsx<Source>>,
                    first_sheet::<Xlsb<Source>>,
                    first_sheet::<Ods<Source>>,
                ];
                let mut outcome = None;
                for read in readers {
                    outcome = read(&bytes);
                    if !matches!(outcome, Some(Err(_))) {
                        break;
                    }
                }
                outcome
            }
        };

        let range = match range {
            Some(Ok(range)) => range,
            Some(Err(message)) => {
                warn!(file = %file, error = %message, "工作簿无法解析");
                return Err(DocumentError::NotASpreadsheet { file });
            }
            None => return Err(DocumentError::NoDataRows { file }),
        };

        let rows = self.data_rows(&range);
        if rows.is_empty() {
            warn!(file = %file, header_rows = self.header_rows, "工作表无数据行");
            return Err(DocumentError::NoDataRows { file });
        }

        info!(file = %file, format = ?format, rows = rows.len(), "文档加载完成");
        Ok(SheetDocument { format, rows })
    }

    /// 提取表头之后的非空行（绝对坐标，跳过完全空白的行）
    fn data_rows(&self, range: &Range<Data>) -> Vec<SheetRow> {
        let Some((end_row, end_col)) = range.end() else {
            return Vec::new();
        };

        let mut rows = Vec::new();
        for row in self.header_rows as u32..=end_row {
            let cells: Vec<CellValue> = (0..=end_col)
                .map(|col| {
                    range
                        .get_value((row, col))
                        .map(CellValue::from)
                        .unwrap_or(CellValue::Empty)
                })
                .collect();

            let sheet_row = SheetRow {
                number: row as usize + 1,
                cells,
            };

            if sheet_row.is_blank() {
                debug!(row = sheet_row.number, "跳过空白行");
                continue;
            }
            rows.push(sheet_row);
        }

        rows
    }
}

/// 用指定格式读取第一张工作表
///
/// # 返回
/// - None: 工作簿可打开但没有任何工作表
/// - Some(Err): 不是该格式的工作簿
fn first_sheet<R>(bytes: &[u8]) -> Option<SheetRead>
where
    R: Reader<Source>,
{
    let mut workbook = match R::new(Cursor::new(bytes.to_vec())) {
        Ok(wb) => wb,
        Err(e) => return Some(Err(format!("{:?}", e))),
    };

    workbook
        .worksheet_range_at(0)
        .map(|result| result.map_err(|e| format!("{:?}", e)))
}

/// 台账中用于指代文档本身的引用（文件名）
pub fn document_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
