// ==========================================
// 空间站货舱调度系统 - 导入层
// ==========================================
// 职责: 外部货物/货舱清单导入, 生成领域实体
// 支持: CSV
// ==========================================

pub mod catalog_importer;
pub mod error;
pub mod field_mapper;
pub mod file_parser;

// 重导出核心类型
pub use catalog_importer::CatalogImporter;
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper;
pub use file_parser::{CsvParser, FileParser, RawRecord, RawRow};
