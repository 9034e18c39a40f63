// ==========================================
// 空间站货舱调度系统 - 文件解析器实现
// ==========================================
// 支持: CSV (.csv), 首行为表头
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

/// 原始行记录: 表头 → 单元格文本 (已 trim)
pub type RawRecord = HashMap<String, String>;

/// 带源文件行号的原始行
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    /// 数据行号 (从 1 起, 不含表头; 空白行同样占号)
    pub row_number: usize,
    pub fields: RawRecord,
}

/// 文件解析接口
pub trait FileParser {
    /// 解析为原始行 (跳过全空行, 行号保持与源文件一致)
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<RawRow>>;
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<RawRow>> {
        let path = file_path;

        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        // 检查扩展名
        if let Some(ext) = path.extension() {
            if !ext.eq_ignore_ascii_case("csv") {
                return Err(ImportError::UnsupportedFormat(
                    ext.to_string_lossy().to_string(),
                ));
            }
        }

        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        // 读取表头
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut records = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            let record = result?;
            // 表头占第 1 行; 无位置信息时退回到记录序号
            let row_number = record
                .position()
                .map(|pos| pos.line().saturating_sub(1) as usize)
                .unwrap_or(idx + 1);

            let mut row_map = HashMap::new();

            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row_map.insert(header.clone(), value.trim().to_string());
                }
            }

            // 跳过完全空白的行
            if row_map.values().all(|v| v.is_empty()) {
                continue;
            }

            records.push(RawRow {
                row_number,
                fields: row_map,
            });
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_rejects_non_csv_extension() {
        let mut file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        writeln!(file, "id,name").unwrap();
        let err = CsvParser.parse_to_raw_records(file.path()).unwrap_err();
        assert!(matches!(err, ImportError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_trims_and_skips_blank_rows() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, " id , name ").unwrap();
        writeln!(file, " 1 , Food Supplies ").unwrap();
        writeln!(file, ",").unwrap();
        writeln!(file, "2,Water").unwrap();
        file.flush().unwrap();

        let rows = CsvParser.parse_to_raw_records(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].fields.get("id").map(String::as_str), Some("1"));
        assert_eq!(
            rows[0].fields.get("name").map(String::as_str),
            Some("Food Supplies")
        );
    }

    #[test]
    fn test_row_numbers_count_skipped_blank_rows() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "id,name").unwrap();
        writeln!(file, "1,Food Supplies").unwrap();
        writeln!(file, ",").unwrap();
        writeln!(file, "3,Water").unwrap();
        file.flush().unwrap();

        let rows = CsvParser.parse_to_raw_records(file.path()).unwrap();
        let numbers: Vec<usize> = rows.iter().map(|r| r.row_number).collect();
        assert_eq!(numbers, vec![1, 3]);
    }
}
