// ==========================================
// 空间站货舱调度系统 - 字段映射器实现
// ==========================================
// 职责: 源字段 → 领域实体 + 类型转换
// 列名大小写不敏感, 支持 camelCase / snake_case 两种写法
// ==========================================

use crate::domain::item::{Location, StoredItem};
use crate::domain::types::{Fragility, Priority};
use crate::domain::zone::StorageZone;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::RawRecord;
use chrono::NaiveDate;

pub struct FieldMapper;

impl FieldMapper {
    // ==========================================
    // 货物行
    // ==========================================
    //
    // 列: id, name, category, location | (zone, section), volume,
    //     priority, movable, fragility, lastAccessed, expirationDate
    pub fn map_to_item(&self, row: &RawRecord, row_number: usize) -> ImportResult<StoredItem> {
        let location = match self.get_string(row, "location") {
            Some(loc) => Location::parse(&loc),
            None => Location::new(
                self.require_string(row, "zone", row_number)?,
                self.get_string(row, "section").unwrap_or_default(),
            ),
        };

        let volume = self.require_f64(row, "volume", row_number)?;
        if volume < 0.0 {
            return Err(ImportError::ValueRangeError {
                row: row_number,
                field: "volume".to_string(),
                message: format!("体积不能为负: {}", volume),
            });
        }

        let priority_raw = self.require_string(row, "priority", row_number)?;
        let priority = Priority::parse(&priority_raw).ok_or_else(|| {
            ImportError::TypeConversionError {
                row: row_number,
                field: "priority".to_string(),
                message: format!("未知优先级: {}", priority_raw),
            }
        })?;

        let fragility = match self.get_string(row, "fragility") {
            None => Fragility::default(),
            Some(raw) => Fragility::parse(&raw).ok_or_else(|| ImportError::TypeConversionError {
                row: row_number,
                field: "fragility".to_string(),
                message: format!("未知易碎等级: {}", raw),
            })?,
        };

        Ok(StoredItem {
            id: self.require_string(row, "id", row_number)?,
            name: self.require_string(row, "name", row_number)?,
            category: self.get_string(row, "category").unwrap_or_default(),
            location,
            volume,
            priority,
            movable: self.parse_bool(row, "movable", row_number)?.unwrap_or(true),
            fragility,
            last_accessed: self.parse_date(row, "last_accessed", row_number)?,
            expiration_date: self.parse_date(row, "expiration_date", row_number)?,
        })
    }

    // ==========================================
    // 货舱行
    // ==========================================
    //
    // 列: id, name, capacity, used, sections ("Section 1;Section 2"), special_conditions
    pub fn map_to_zone(&self, row: &RawRecord, row_number: usize) -> ImportResult<StorageZone> {
        let name = self.require_string(row, "name", row_number)?;
        let capacity = self.require_f64(row, "capacity", row_number)?;
        let used = self.parse_f64(row, "used", row_number)?.unwrap_or(0.0);

        if capacity < 0.0 || used < 0.0 || used > capacity {
            return Err(ImportError::ValueRangeError {
                row: row_number,
                field: "used".to_string(),
                message: format!(
                    "需满足 0 <= used <= capacity, 实际 used={} capacity={}",
                    used, capacity
                ),
            });
        }

        let sections = self
            .get_string(row, "sections")
            .map(|raw| {
                raw.split(|c: char| c == ';' || c == '|')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(StorageZone {
            id: self
                .get_string(row, "id")
                .unwrap_or_else(|| name.to_ascii_lowercase().replace(' ', "-")),
            name,
            capacity,
            used,
            sections,
            special_conditions: self.get_string(row, "special_conditions"),
        })
    }

    // ==========================================
    // 通用提取
    // ==========================================

    /// 提取字符串字段（空值视为缺失）
    ///
    /// `last_accessed` 同时匹配 `lastAccessed` / `Last Accessed`
    fn get_string(&self, row: &RawRecord, key: &str) -> Option<String> {
        let wanted = normalize_header(key);
        row.iter()
            .find(|(header, value)| normalize_header(header) == wanted && !value.trim().is_empty())
            .map(|(_, value)| value.trim().to_string())
    }

    fn require_string(
        &self,
        row: &RawRecord,
        key: &str,
        row_number: usize,
    ) -> ImportResult<String> {
        self.get_string(row, key)
            .ok_or_else(|| ImportError::MissingField {
                row: row_number,
                field: key.to_string(),
            })
    }

    fn parse_f64(
        &self,
        row: &RawRecord,
        key: &str,
        row_number: usize,
    ) -> ImportResult<Option<f64>> {
        match self.get_string(row, key) {
            None => Ok(None),
            Some(value) => value
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(Some)
                .ok_or_else(|| ImportError::TypeConversionError {
                    row: row_number,
                    field: key.to_string(),
                    message: format!("无法解析为数值: {}", value),
                }),
        }
    }

    fn require_f64(&self, row: &RawRecord, key: &str, row_number: usize) -> ImportResult<f64> {
        self.parse_f64(row, key, row_number)?
            .ok_or_else(|| ImportError::MissingField {
                row: row_number,
                field: key.to_string(),
            })
    }

    fn parse_bool(
        &self,
        row: &RawRecord,
        key: &str,
        row_number: usize,
    ) -> ImportResult<Option<bool>> {
        match self.get_string(row, key) {
            None => Ok(None),
            Some(value) => match value.to_ascii_lowercase().as_str() {
                "true" | "yes" | "y" | "1" => Ok(Some(true)),
                "false" | "no" | "n" | "0" => Ok(Some(false)),
                _ => Err(ImportError::TypeConversionError {
                    row: row_number,
                    field: key.to_string(),
                    message: format!("无法解析为布尔值: {}", value),
                }),
            },
        }
    }

    /// 解析日期 (YYYY-MM-DD)
    fn parse_date(
        &self,
        row: &RawRecord,
        key: &str,
        row_number: usize,
    ) -> ImportResult<Option<NaiveDate>> {
        match self.get_string(row, key) {
            None => Ok(None),
            Some(value) if value.eq_ignore_ascii_case("n/a") => Ok(None),
            Some(value) => NaiveDate::parse_from_str(&value, "%Y-%m-%d")
                .map(Some)
                .map_err(|_| ImportError::DateFormatError {
                    row: row_number,
                    field: key.to_string(),
                    value,
                }),
        }
    }
}

/// 表头归一化: 去掉空格/下划线/连字符并转小写
fn normalize_header(header: &str) -> String {
    header
        .chars()
        .filter(|c| !matches!(*c, ' ' | '_' | '-'))
        .flat_map(|c| c.to_lowercase())
        .collect()
}
