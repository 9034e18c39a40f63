// ==========================================
// 空间站货舱调度系统 - 货物重排建议引擎
// ==========================================
// 职责: 来货空间评估 + 待搬移货物挑选 + 目的货舱分配
// 输入: 全局容量 + 货舱快照 + 货物快照 + 来货
// 输出: ShipmentEvaluation + RelocationPlan
// 红线: 纯函数,不修改调用方目录; 无错误路径
// ==========================================
// 注意: 充足性判定只看全局容量口径 (StorageCapacity),
//       目的地选择只看各货舱剩余空间, 两者互不校正
// ==========================================

use crate::domain::item::{Location, StoredItem};
use crate::domain::relocation::{RearrangementSuggestion, RelocationPlan};
use crate::domain::shipment::{Shipment, ShipmentEvaluation};
use crate::domain::types::EvaluationOutcome;
use crate::domain::zone::{SpaceConstraint, StorageCapacity, StorageZone};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// 重排引擎配置
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RearrangementConfig {
    /// 入舱后使用率达到该值即给出建议性重排 (含等于)
    pub alert_threshold: f64,
}

impl RearrangementConfig {
    pub const DEFAULT_ALERT_THRESHOLD: f64 = 0.9;
}

impl Default for RearrangementConfig {
    fn default() -> Self {
        Self {
            alert_threshold: Self::DEFAULT_ALERT_THRESHOLD,
        }
    }
}

// ==========================================
// RearrangementEngine - 重排建议引擎
// ==========================================
pub struct RearrangementEngine {
    config: RearrangementConfig,
}

impl RearrangementEngine {
    /// 构造函数
    pub fn new(config: RearrangementConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RearrangementConfig {
        &self.config
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 评估来货是否放得下
    ///
    /// 规则：
    /// 1) 来货体积 <= 全局剩余空间: 空间充足
    ///    - 入舱后使用率 >= alert_threshold: 建议性重排 (is_required=false)
    ///    - 否则: 无需重排
    /// 2) 否则: 空间不足,强制重排 (is_required=true),缺口 = 来货体积 - 剩余空间
    pub fn evaluate_shipment(
        &self,
        capacity: &StorageCapacity,
        shipment: &Shipment,
    ) -> ShipmentEvaluation {
        let available_space = capacity.available();
        let projected_utilization = capacity.projected_utilization(shipment.volume);

        if shipment.volume <= available_space {
            let outcome = if projected_utilization >= self.config.alert_threshold {
                EvaluationOutcome::AdvisoryOptimization
            } else {
                EvaluationOutcome::NoRearrangementNeeded
            };

            ShipmentEvaluation {
                sufficient_space: true,
                is_required: false,
                shortfall: 0.0,
                available_space,
                projected_utilization,
                outcome,
            }
        } else {
            ShipmentEvaluation {
                sufficient_space: false,
                is_required: true,
                shortfall: shipment.volume - available_space,
                available_space,
                projected_utilization,
                outcome: EvaluationOutcome::RequiredOptimization,
            }
        }
    }

    /// 挑选待搬移货物并分配目的地
    ///
    /// 1) 过滤: 不可移动货物剔除; 非强制时关键货物 (Critical) 也剔除
    /// 2) 排序: 按优先级升序 (低优先级先搬), 同级保持目录顺序 (稳定排序)
    /// 3) 贪心选择: 有目的地即入方案; 强制重排时腾出体积 >= space_needed 即停
    ///
    /// 各候选的目的地查找都基于同一份货舱快照,不随已选搬移更新
    #[instrument(skip(self, items, zones), fields(
        items_count = items.len(),
        zones_count = zones.len()
    ))]
    pub fn select_items_to_relocate(
        &self,
        items: &[StoredItem],
        zones: &[StorageZone],
        space_needed: f64,
        is_required: bool,
    ) -> RelocationPlan {
        let mut candidates: Vec<&StoredItem> = items
            .iter()
            .filter(|item| item.is_relocation_candidate(is_required))
            .collect();
        // sort_by_key 为稳定排序
        candidates.sort_by_key(|item| item.priority.rank());

        let mut plan = RelocationPlan::empty(space_needed, is_required);

        for item in candidates {
            if is_required && plan.space_recovered >= space_needed {
                break;
            }

            match self.find_destination(item, item.current_zone(), zones) {
                Some(destination) => {
                    debug!(
                        item_id = %item.id,
                        from = %item.location,
                        to = %destination,
                        volume = item.volume,
                        "选中搬移货物"
                    );
                    plan.push(item, destination);
                }
                None => {
                    debug!(item_id = %item.id, volume = item.volume, "无可用目的货舱,跳过");
                }
            }
        }

        plan
    }

    /// 为单件货物查找目的地
    ///
    /// 候选 = 除当前货舱外、剩余空间 >= 货物体积的货舱;
    /// 按剩余空间降序 (同值保持目录顺序), 取首个货舱的首个分区。
    /// 没有分区的货舱不参与候选。
    pub fn find_destination(
        &self,
        item: &StoredItem,
        current_zone_name: &str,
        zones: &[StorageZone],
    ) -> Option<Location> {
        let mut candidates: Vec<&StorageZone> = zones
            .iter()
            .filter(|zone| zone.name != current_zone_name)
            .filter(|zone| zone.can_fit(item.volume))
            .filter(|zone| zone.first_section().is_some())
            .collect();

        // 降序; sort_by 为稳定排序, NaN 视为相等
        candidates.sort_by(|a, b| {
            b.available()
                .partial_cmp(&a.available())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let best = candidates.first()?;
        let section = best.first_section()?;
        Some(Location::new(best.name.clone(), section))
    }

    /// 评估来货并在需要时生成重排方案
    ///
    /// 来货体积 <= 0 时直接返回“无需重排”与空方案
    #[instrument(skip(self, capacity, zones, items), fields(
        shipment_volume = shipment.volume,
        shipment_priority = %shipment.priority
    ))]
    pub fn suggest(
        &self,
        capacity: &StorageCapacity,
        zones: &[StorageZone],
        items: &[StoredItem],
        shipment: &Shipment,
    ) -> RearrangementSuggestion {
        if shipment.volume <= 0.0 {
            let evaluation = ShipmentEvaluation {
                sufficient_space: true,
                is_required: false,
                shortfall: 0.0,
                available_space: capacity.available(),
                projected_utilization: capacity.projected_utilization(0.0),
                outcome: EvaluationOutcome::NoRearrangementNeeded,
            };
            return RearrangementSuggestion {
                evaluation,
                plan: RelocationPlan::empty(0.0, false),
            };
        }

        let evaluation = self.evaluate_shipment(capacity, shipment);

        let plan = if evaluation.needs_plan() {
            self.select_items_to_relocate(
                items,
                zones,
                evaluation.space_needed(),
                evaluation.is_required,
            )
        } else {
            RelocationPlan::empty(0.0, false)
        };

        debug!(
            outcome = %evaluation.outcome,
            moves = plan.len(),
            space_recovered = plan.space_recovered,
            "重排建议生成完成"
        );

        RearrangementSuggestion { evaluation, plan }
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for RearrangementEngine {
    fn default() -> Self {
        Self::new(RearrangementConfig::default())
    }
}
