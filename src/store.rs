// ==========================================
// 空间站货舱调度系统 - 本地 JSON 文件读写
// ==========================================
// 目标:
// - 统一所有落盘文件的读写行为 (快照 / 操作日志 / 配置)
// - 写入先落临时文件再 rename, 避免中途失败留下半截文件
// ==========================================

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::Path;

/// 读取 JSON 文件（文件不存在时返回 None）
pub fn read_json<T: DeserializeOwned>(path: &Path) -> io::Result<Option<T>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };

    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// 写入 JSON 文件（自动创建父目录）
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let body = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, body)?;
    fs::rename(&tmp, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_missing_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let value: Option<BTreeMap<String, String>> =
            read_json(&dir.path().join("absent.json")).unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_write_creates_parent_and_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("data.json");
        let mut map = BTreeMap::new();
        map.insert("bay".to_string(), "A".to_string());

        write_json(&path, &map).unwrap();
        let back: Option<BTreeMap<String, String>> = read_json(&path).unwrap();
        assert_eq!(back, Some(map));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_corrupt_file_is_invalid_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{not json").unwrap();
        let err = read_json::<BTreeMap<String, String>>(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
