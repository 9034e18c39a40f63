// ==========================================
// 空间站货舱调度系统 - 货物查询
// ==========================================
// 职责: 按名称/编号检索货物, 列出临期货物
// 红线: 只读快照, 结果保持目录顺序 (临期按剩余天数升序)
// ==========================================

use crate::domain::item::StoredItem;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 默认临期窗口 (天)
pub const DEFAULT_EXPIRY_WINDOW_DAYS: i64 = 7;

/// 检索命中的货物
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemMatch {
    pub item: StoredItem,
    pub days_to_expiry: Option<i64>, // 无保质期时为 None, 已过期为负数
    pub expiring_soon: bool,
}

/// 临期货物
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpiringItem {
    pub item: StoredItem,
    pub days_to_expiry: i64,
}

fn days_until(date: NaiveDate, today: NaiveDate) -> i64 {
    (date - today).num_days()
}

/// 按关键字检索货物
///
/// - 关键字对名称或编号做不区分大小写的子串匹配, 空关键字匹配全部
/// - `category` 给定时要求类别完全一致
/// - 剩余天数 <= DEFAULT_EXPIRY_WINDOW_DAYS 的货物标记为临期
pub fn search_items(
    items: &[StoredItem],
    query: &str,
    category: Option<&str>,
    today: NaiveDate,
) -> Vec<ItemMatch> {
    let needle = query.trim().to_lowercase();

    items
        .iter()
        .filter(|item| {
            needle.is_empty()
                || item.name.to_lowercase().contains(&needle)
                || item.id.to_lowercase().contains(&needle)
        })
        .filter(|item| category.map_or(true, |c| item.category == c))
        .map(|item| {
            let days_to_expiry = item.expiration_date.map(|d| days_until(d, today));
            ItemMatch {
                item: item.clone(),
                days_to_expiry,
                expiring_soon: days_to_expiry
                    .map_or(false, |d| d <= DEFAULT_EXPIRY_WINDOW_DAYS),
            }
        })
        .collect()
}

/// 列出 `within_days` 天内 (含当天) 到期的货物, 已过期的不列入
pub fn expiring_items(
    items: &[StoredItem],
    today: NaiveDate,
    within_days: i64,
) -> Vec<ExpiringItem> {
    let mut expiring: Vec<ExpiringItem> = items
        .iter()
        .filter_map(|item| {
            let days = days_until(item.expiration_date?, today);
            (0..=within_days).contains(&days).then(|| ExpiringItem {
                item: item.clone(),
                days_to_expiry: days,
            })
        })
        .collect();

    // 稳定排序, 同天到期保持目录顺序
    expiring.sort_by_key(|e| e.days_to_expiry);
    expiring
}
