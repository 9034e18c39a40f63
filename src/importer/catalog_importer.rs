// ==========================================
// 空间站货舱调度系统 - 目录导入器
// ==========================================
// 流程: 文件解析 → 字段映射 → 主键查重
// 红线: 任一行失败则整批失败, 不做部分导入
// ==========================================

use crate::domain::item::StoredItem;
use crate::domain::zone::StorageZone;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::FieldMapper;
use crate::importer::file_parser::{CsvParser, FileParser};
use std::collections::HashSet;
use std::path::Path;
use tracing::{info, instrument};

pub struct CatalogImporter<P: FileParser = CsvParser> {
    parser: P,
    mapper: FieldMapper,
}

impl CatalogImporter<CsvParser> {
    pub fn new() -> Self {
        Self::with_parser(CsvParser)
    }
}

impl Default for CatalogImporter<CsvParser> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: FileParser> CatalogImporter<P> {
    pub fn with_parser(parser: P) -> Self {
        Self {
            parser,
            mapper: FieldMapper,
        }
    }

    /// 导入货物清单
    ///
    /// # 返回
    /// - 按文件顺序排列的货物; 出错时报告源文件数据行号 (从 1 起, 不含表头)
    #[instrument(skip(self, file_path), fields(file = %file_path.as_ref().display()))]
    pub fn import_items<Q: AsRef<Path>>(&self, file_path: Q) -> ImportResult<Vec<StoredItem>> {
        let rows = self.parser.parse_to_raw_records(file_path.as_ref())?;

        let mut seen = HashSet::new();
        let mut items = Vec::with_capacity(rows.len());
        for row in &rows {
            let row_number = row.row_number;
            let item = self.mapper.map_to_item(&row.fields, row_number)?;
            if !seen.insert(item.id.clone()) {
                return Err(ImportError::DuplicateKey {
                    row: row_number,
                    key: item.id,
                });
            }
            items.push(item);
        }

        info!(count = items.len(), "货物清单解析完成");
        Ok(items)
    }

    /// 导入货舱清单
    #[instrument(skip(self, file_path), fields(file = %file_path.as_ref().display()))]
    pub fn import_zones<Q: AsRef<Path>>(&self, file_path: Q) -> ImportResult<Vec<StorageZone>> {
        let rows = self.parser.parse_to_raw_records(file_path.as_ref())?;

        let mut seen = HashSet::new();
        let mut zones = Vec::with_capacity(rows.len());
        for row in &rows {
            let row_number = row.row_number;
            let zone = self.mapper.map_to_zone(&row.fields, row_number)?;
            if !seen.insert(zone.name.clone()) {
                return Err(ImportError::DuplicateKey {
                    row: row_number,
                    key: zone.name,
                });
            }
            zones.push(zone);
        }

        info!(count = zones.len(), "货舱清单解析完成");
        Ok(zones)
    }
}
