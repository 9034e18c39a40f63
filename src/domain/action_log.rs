// ==========================================
// 空间站货舱调度系统 - 操作日志领域模型
// ==========================================
// 红线: 所有写入必须记录
// 用途: 审计追踪,活动日志页面
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

// ==========================================
// ActionLog - 操作日志
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionLog {
    // ===== 主键 =====
    pub action_id: String,          // 日志ID (UUID)
    pub action_type: String,        // 操作类型 (存储为字符串)
    pub action_ts: NaiveDateTime,   // 操作时间戳
    pub actor: String,              // 操作人

    // ===== 操作负载 =====
    pub payload_json: Option<JsonValue>, // 操作参数 (JSON)

    // ===== 扩展字段 =====
    pub detail: Option<String>, // 详细描述
}

// ==========================================
// ActionType - 操作类型
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionType {
    Seed,                  // 写入示例数据
    EvaluateShipment,      // 来货评估
    ApplyRearrangement,    // 执行重排
    CancelRearrangement,   // 取消重排
    ImportItems,           // 导入货物清单
    ImportZones,           // 导入货舱清单
    SetCapacity,           // 设定全局容量
    RetrieveItem,          // 取用货物
}

// ==========================================
// ActionType 辅助方法
// ==========================================
impl ActionType {
    /// 转换为字符串 (用于落盘)
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::Seed => "Seed",
            ActionType::EvaluateShipment => "EvaluateShipment",
            ActionType::ApplyRearrangement => "ApplyRearrangement",
            ActionType::CancelRearrangement => "CancelRearrangement",
            ActionType::ImportItems => "ImportItems",
            ActionType::ImportZones => "ImportZones",
            ActionType::SetCapacity => "SetCapacity",
            ActionType::RetrieveItem => "RetrieveItem",
        }
    }

    /// 从字符串解析
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Seed" => Some(ActionType::Seed),
            "EvaluateShipment" => Some(ActionType::EvaluateShipment),
            "ApplyRearrangement" => Some(ActionType::ApplyRearrangement),
            "CancelRearrangement" => Some(ActionType::CancelRearrangement),
            "ImportItems" => Some(ActionType::ImportItems),
            "ImportZones" => Some(ActionType::ImportZones),
            "SetCapacity" => Some(ActionType::SetCapacity),
            "RetrieveItem" => Some(ActionType::RetrieveItem),
            _ => None,
        }
    }
}

// ==========================================
// ActionLog 辅助方法
// ==========================================
impl ActionLog {
    /// 创建新的操作日志
    ///
    /// # 参数
    /// - `action_id`: 日志ID (通常使用UUID)
    /// - `action_type`: 操作类型
    /// - `actor`: 操作人
    pub fn new(action_id: String, action_type: ActionType, actor: String) -> Self {
        Self {
            action_id,
            action_type: action_type.as_str().to_string(),
            action_ts: chrono::Utc::now().naive_utc(),
            actor,
            payload_json: None,
            detail: None,
        }
    }

    /// 设置操作负载 (转换为JSON)
    pub fn with_payload<T: Serialize>(mut self, payload: &T) -> Self {
        self.payload_json = serde_json::to_value(payload).ok();
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// 解析后的操作类型
    pub fn kind(&self) -> Option<ActionType> {
        ActionType::from_str(&self.action_type)
    }

    /// 生成短ID (用于显示)
    pub fn get_display_id(&self) -> String {
        let short: String = self.action_id.chars().take(8).collect();
        format!("{}_{}", self.action_type, short)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_type_roundtrip_names() {
        for t in [
            ActionType::Seed,
            ActionType::EvaluateShipment,
            ActionType::ApplyRearrangement,
            ActionType::CancelRearrangement,
            ActionType::ImportItems,
            ActionType::ImportZones,
            ActionType::SetCapacity,
            ActionType::RetrieveItem,
        ] {
            assert_eq!(ActionType::from_str(t.as_str()), Some(t));
        }
        assert_eq!(ActionType::from_str("Recalc"), None);
    }

    #[test]
    fn test_display_id_handles_short_ids() {
        let log = ActionLog::new("abc".to_string(), ActionType::Seed, "tester".to_string());
        assert_eq!(log.get_display_id(), "Seed_abc");
        assert_eq!(log.kind(), Some(ActionType::Seed));
    }
}
