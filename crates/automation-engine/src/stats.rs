//! 执行统计与历史查询

use serde::{Deserialize, Serialize};

use crate::models::{Execution, ExecutionStatus};

/// 执行统计
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionStats {
    pub total_executions: usize,
    pub successful_executions: usize,
    pub failed_executions: usize,
    pub partial_executions: usize,
    /// 平均耗时（毫秒），无记录时为 0
    pub average_duration: f64,
}

impl ExecutionStats {
    pub fn from_executions(executions: &[Execution]) -> Self {
        let mut stats = Self {
            total_executions: executions.len(),
            ..Default::default()
        };

        let mut total_duration: u64 = 0;
        for execution in executions {
            match execution.status {
                ExecutionStatus::Success => stats.successful_executions += 1,
                ExecutionStatus::Failed => stats.failed_executions += 1,
                ExecutionStatus::Partial => stats.partial_executions += 1,
            }
            total_duration = total_duration.saturating_add(execution.duration);
        }

        if stats.total_executions > 0 {
            stats.average_duration = total_duration as f64 / stats.total_executions as f64;
        }

        stats
    }
}

/// 按执行时间倒序排列并截断
///
/// 输入为追加顺序（最旧在前）。执行时间相同时后追加的排在前面。
pub fn latest_first(mut executions: Vec<Execution>, limit: usize) -> Vec<Execution> {
    executions.reverse();
    // 稳定排序，保留反转后的追加顺序作为并列时的次序
    executions.sort_by(|a, b| b.executed_at.cmp(&a.executed_at));
    executions.truncate(limit);
    executions
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use serde_json::json;

    fn execution(id: &str, status: ExecutionStatus, duration: u64, offset_secs: i64) -> Execution {
        let base = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();
        Execution {
            id: id.to_string(),
            rule_id: "r1".to_string(),
            status,
            executed_at: base + Duration::seconds(offset_secs),
            triggered_by: "system".to_string(),
            trigger_data: json!({}),
            conditions_evaluated: vec![],
            actions_executed: vec![],
            duration,
            error: None,
        }
    }

    #[test]
    fn test_stats_empty() {
        let stats = ExecutionStats::from_executions(&[]);
        assert_eq!(stats, ExecutionStats::default());
        assert_eq!(stats.average_duration, 0.0);
    }

    #[test]
    fn test_stats_counts_and_mean() {
        let executions = vec![
            execution("e1", ExecutionStatus::Success, 10, 0),
            execution("e2", ExecutionStatus::Partial, 20, 1),
            execution("e3", ExecutionStatus::Failed, 30, 2),
            execution("e4", ExecutionStatus::Success, 40, 3),
        ];

        let stats = ExecutionStats::from_executions(&executions);
        assert_eq!(stats.total_executions, 4);
        assert_eq!(stats.successful_executions, 2);
        assert_eq!(stats.partial_executions, 1);
        assert_eq!(stats.failed_executions, 1);
        assert_eq!(stats.average_duration, 25.0);
    }

    #[test]
    fn test_stats_serialization() {
        let stats = ExecutionStats::from_executions(&[execution("e1", ExecutionStatus::Success, 5, 0)]);
        let value = serde_json::to_value(&stats).unwrap();
        assert_eq!(value["totalExecutions"], 1);
        assert_eq!(value["averageDuration"], 5.0);
    }

    #[test]
    fn test_latest_first_orders_and_truncates() {
        let executions = vec![
            execution("e1", ExecutionStatus::Success, 1, 0),
            execution("e2", ExecutionStatus::Success, 1, 5),
            execution("e3", ExecutionStatus::Success, 1, 2),
        ];

        let ids: Vec<String> = latest_first(executions, 2)
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec!["e2", "e3"]);
    }

    #[test]
    fn test_latest_first_ties_prefer_recently_appended() {
        let executions = vec![
            execution("older", ExecutionStatus::Success, 1, 0),
            execution("newer", ExecutionStatus::Success, 1, 0),
        ];

        let ids: Vec<String> = latest_first(executions, 10)
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec!["newer", "older"]);
    }
}
