//! 自动化规则引擎
//!
//! 单次执行的流水线：解析触发数据 → 条件评估（短路）→ 执行或跳过动作 → 汇总记录。
//! 非测试模式的记录写入历史，测试模式的记录只返回给调用方。

use std::sync::Arc;
use std::time::Instant;

use automation_shared::observability::metrics::record_rule_execution;
use chrono::Utc;
use serde_json::Value;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::collaborators::Collaborators;
use crate::combinator::LogicalCombinator;
use crate::context::{ExecutionContext, ExecutionMode};
use crate::dispatcher::ActionDispatcher;
use crate::error::EngineError;
use crate::evaluator::ConditionEvaluator;
use crate::history::{HistoryStore, InMemoryHistoryStore};
use crate::models::{Execution, ExecutionStatus, Rule};
use crate::runner::ActionRunner;
use crate::stats::{ExecutionStats, latest_first};

/// 自动化规则引擎
///
/// 引擎是 `Send + Sync` 的，可放在 `Arc` 中供并发请求共享。
#[derive(Clone)]
pub struct AutomationEngine {
    runner: ActionRunner,
    history: Arc<dyn HistoryStore>,
}

impl AutomationEngine {
    pub fn new(collaborators: Collaborators, history: Arc<dyn HistoryStore>) -> Self {
        Self {
            runner: ActionRunner::new(ActionDispatcher::new(collaborators)),
            history,
        }
    }

    /// 默认协作服务 + 容量 1000 的内存历史
    pub fn with_defaults() -> Self {
        Self::new(
            Collaborators::with_defaults(),
            Arc::new(InMemoryHistoryStore::default()),
        )
    }

    pub fn history(&self) -> &Arc<dyn HistoryStore> {
        &self.history
    }

    /// 执行规则
    ///
    /// 总是返回一条执行记录；条件评估和动作中的错误都记录在结果里，不会向上传播。
    #[instrument(
        skip(self, rule, trigger_data, context),
        fields(rule_id = %rule.id, mode = context.mode().as_str())
    )]
    pub async fn execute_rule(
        &self,
        rule: &Rule,
        trigger_data: Value,
        context: &ExecutionContext,
    ) -> Execution {
        let start = Instant::now();
        let execution_id = Uuid::new_v4().to_string();
        let executed_at = Utc::now();
        let mode = context.mode();
        let payload = context.resolve_payload(trigger_data);

        let (conditions_evaluated, actions_executed, status, error) = if payload.is_object() {
            let outcome =
                LogicalCombinator::evaluate(&rule.conditions, rule.logical_operator, &payload);
            let actions = self
                .runner
                .run(&rule.actions, &payload, mode, outcome.met)
                .await;
            let status = ExecutionStatus::from_actions(&actions);
            (outcome.results, actions, status, None)
        } else {
            let err = EngineError::MalformedTriggerData(
                ConditionEvaluator::type_name(Some(payload.data())).to_string(),
            );
            warn!(error = %err, "触发数据无效，执行失败");
            (
                Vec::new(),
                ActionRunner::skip_all(&rule.actions),
                ExecutionStatus::Failed,
                Some(err.to_string()),
            )
        };

        let elapsed = start.elapsed();
        let execution = Execution {
            id: execution_id,
            rule_id: rule.id.clone(),
            status,
            executed_at,
            triggered_by: context.user_id().to_string(),
            trigger_data: payload.into_inner(),
            conditions_evaluated,
            actions_executed,
            duration: elapsed.as_millis() as u64,
            error,
        };

        record_rule_execution(mode.as_str(), status.as_str(), elapsed.as_secs_f64());
        info!(
            execution_id = %execution.id,
            status = status.as_str(),
            conditions = execution.conditions_evaluated.len(),
            actions = execution.actions_executed.len(),
            duration_ms = execution.duration,
            "规则执行完成"
        );

        if mode == ExecutionMode::Production {
            self.history.append(execution.clone());
        }

        execution
    }

    /// 查询执行历史，按执行时间倒序
    pub fn get_execution_history(&self, rule_id: Option<&str>, limit: usize) -> Vec<Execution> {
        latest_first(self.history.snapshot(rule_id), limit)
    }

    /// 查询执行统计
    pub fn get_execution_stats(&self, rule_id: Option<&str>) -> ExecutionStats {
        ExecutionStats::from_executions(&self.history.snapshot(rule_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Action, ActionStatus, Condition};
    use crate::operators::{ActionType, LogicalOperator, Operator};
    use serde_json::json;

    fn badge_rule() -> Rule {
        Rule::new("rule-001", LogicalOperator::And)
            .with_name("积分达标徽章")
            .with_conditions(vec![Condition::new(
                "c1",
                "member.points",
                Operator::GreaterEqual,
                100,
            )])
            .with_actions(vec![
                Action::new("a1", ActionType::AwardBadge, 1).with_config(json!({"badgeId": "B1"})),
            ])
    }

    #[tokio::test]
    async fn test_production_execution_is_recorded() {
        let engine = AutomationEngine::with_defaults();
        let execution = engine
            .execute_rule(
                &badge_rule(),
                json!({"member": {"id": "m-001", "points": 150}}),
                &ExecutionContext::production("system"),
            )
            .await;

        assert_eq!(execution.status, ExecutionStatus::Success);
        assert_eq!(execution.triggered_by, "system");
        assert_eq!(execution.actions_executed[0].status, ActionStatus::Success);
        assert_eq!(engine.history().len(), 1);
        assert_eq!(engine.get_execution_history(Some("rule-001"), 50)[0].id, execution.id);
    }

    #[tokio::test]
    async fn test_test_mode_is_not_recorded() {
        let engine = AutomationEngine::with_defaults();
        let execution = engine
            .execute_rule(
                &badge_rule(),
                json!({}),
                &ExecutionContext::test("admin", Some(json!({"member": {"points": 150}}))),
            )
            .await;

        assert_eq!(execution.trigger_data, json!({"member": {"points": 150}}));
        assert!(engine.history().is_empty());
        assert_eq!(engine.get_execution_stats(None).total_executions, 0);
    }

    #[tokio::test]
    async fn test_non_object_payload_fails_pipeline() {
        let engine = AutomationEngine::with_defaults();
        let execution = engine
            .execute_rule(
                &badge_rule(),
                json!([1, 2, 3]),
                &ExecutionContext::production("system"),
            )
            .await;

        assert_eq!(execution.status, ExecutionStatus::Failed);
        assert!(execution.error.as_deref().unwrap().contains("array"));
        assert!(execution.conditions_evaluated.is_empty());
        assert_eq!(execution.actions_executed.len(), 1);
        assert_eq!(execution.actions_executed[0].status, ActionStatus::Skipped);
        assert_eq!(engine.get_execution_stats(None).failed_executions, 1);
    }

    #[tokio::test]
    async fn test_execution_ids_are_unique() {
        let engine = AutomationEngine::with_defaults();
        let ctx = ExecutionContext::test("admin", None);
        let data = json!({"member": {"points": 1}});

        let first = engine.execute_rule(&badge_rule(), data.clone(), &ctx).await;
        let second = engine.execute_rule(&badge_rule(), data, &ctx).await;

        assert_ne!(first.id, second.id);
    }
}
