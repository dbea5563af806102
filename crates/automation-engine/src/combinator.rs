//! 逻辑组合器
//!
//! 按列表顺序逐个评估条件并短路：AND 遇到 false 停止，OR 遇到 true 停止。

use crate::context::TriggerData;
use crate::evaluator::ConditionEvaluator;
use crate::models::{Condition, ConditionResult};
use crate::operators::LogicalOperator;

/// 条件组合结果
#[derive(Debug, Clone)]
pub struct ConditionOutcome {
    /// 实际评估过的条件结果（短路后不足全部条件）
    pub results: Vec<ConditionResult>,
    /// 条件是否满足
    pub met: bool,
}

/// 逻辑组合器
pub struct LogicalCombinator;

impl LogicalCombinator {
    pub fn evaluate(
        conditions: &[Condition],
        operator: LogicalOperator,
        data: &TriggerData,
    ) -> ConditionOutcome {
        let mut results = Vec::with_capacity(conditions.len());

        for condition in conditions {
            let result = ConditionEvaluator::evaluate_condition(condition, data);
            let matched = result.result;
            results.push(result);

            match operator {
                LogicalOperator::And if !matched => break,
                LogicalOperator::Or if matched => break,
                _ => {}
            }
        }

        let met = Self::is_met(&results, operator);
        ConditionOutcome { results, met }
    }

    /// 根据已记录的结果计算是否满足
    ///
    /// 空条件列表在 AND 和 OR 下均视为不满足。
    fn is_met(results: &[ConditionResult], operator: LogicalOperator) -> bool {
        if results.is_empty() {
            return false;
        }

        match operator {
            LogicalOperator::And => results.iter().all(|r| r.result),
            LogicalOperator::Or => results.iter().any(|r| r.result),
        }
    }
}
