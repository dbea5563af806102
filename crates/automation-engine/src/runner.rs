//! 动作执行器
//!
//! 条件满足时按 `order` 升序依次执行动作，单个动作失败不会中断其余动作；
//! 条件不满足时全部动作记为 skipped，不调用分发器。

use std::time::Instant;

use automation_shared::observability::metrics::record_rule_action;
use tracing::{debug, warn};

use crate::context::{ExecutionMode, TriggerData};
use crate::dispatcher::ActionDispatcher;
use crate::models::{Action, ActionResult};

/// 动作执行器
#[derive(Clone)]
pub struct ActionRunner {
    dispatcher: ActionDispatcher,
}

impl ActionRunner {
    pub fn new(dispatcher: ActionDispatcher) -> Self {
        Self { dispatcher }
    }

    /// 执行规则的全部动作
    ///
    /// 返回结果与输入动作一一对应（按执行顺序排列），每个动作 ID 恰好出现一次。
    pub async fn run(
        &self,
        actions: &[Action],
        data: &TriggerData,
        mode: ExecutionMode,
        conditions_met: bool,
    ) -> Vec<ActionResult> {
        if !conditions_met {
            debug!(action_count = actions.len(), "条件不满足，跳过全部动作");
            return Self::skip_all(actions);
        }

        // sort_by_key 是稳定排序，相同 order 保持原始位置
        let mut ordered: Vec<&Action> = actions.iter().collect();
        ordered.sort_by_key(|a| a.order);

        let mut results = Vec::with_capacity(ordered.len());
        for action in ordered {
            let result = self.run_one(action, data, mode).await;
            record_rule_action(action.action_type.as_str(), result.status.as_str());
            results.push(result);
        }
        results
    }

    /// 全部动作记为 skipped
    pub fn skip_all(actions: &[Action]) -> Vec<ActionResult> {
        actions
            .iter()
            .map(|a| ActionResult::skipped(a.id.clone()))
            .collect()
    }

    async fn run_one(
        &self,
        action: &Action,
        data: &TriggerData,
        mode: ExecutionMode,
    ) -> ActionResult {
        if !action.enabled {
            debug!(action_id = %action.id, "动作已禁用，跳过");
            return ActionResult::skipped(action.id.clone());
        }

        let start = Instant::now();
        let outcome = self.dispatcher.dispatch(action, data, mode).await;
        let duration = start.elapsed().as_millis() as u64;

        match outcome {
            Ok(result) => ActionResult::success(action.id.clone(), result, duration),
            Err(e) => {
                warn!(
                    action_id = %action.id,
                    action_type = %action.action_type,
                    error = %e,
                    "动作执行失败"
                );
                ActionResult::failed(action.id.clone(), e.to_string(), duration)
            }
        }
    }
}
