//! API 处理器

use axum::{
    Json,
    extract::{Query, State},
};
use tracing::instrument;

use super::dto::{ApiResponse, ExecuteRuleRequest, HistoryQuery, StatsQuery};
use super::error::{ApiError, Result};
use super::state::AppState;
use crate::context::ExecutionContext;
use crate::models::Execution;
use crate::stats::ExecutionStats;

/// 执行规则
///
/// POST /api/rules/execute
#[instrument(skip(state, req), fields(rule_id = %req.rule.id))]
pub async fn execute_rule(
    State(state): State<AppState>,
    Json(req): Json<ExecuteRuleRequest>,
) -> Json<ApiResponse<Execution>> {
    let context = ExecutionContext::from(req.context);
    let execution = state
        .engine
        .execute_rule(&req.rule, req.trigger_data, &context)
        .await;

    Json(ApiResponse::success(execution))
}

/// 查询执行历史
///
/// GET /api/executions?ruleId=&limit=
#[instrument(skip(state))]
pub async fn list_executions(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<ApiResponse<Vec<Execution>>>> {
    let limit = query.limit.unwrap_or(state.default_history_limit);
    if limit == 0 {
        return Err(ApiError::Validation("limit 必须大于 0".to_string()));
    }

    let executions = state
        .engine
        .get_execution_history(query.rule_id.as_deref(), limit);
    Ok(Json(ApiResponse::success(executions)))
}

/// 查询执行统计
///
/// GET /api/executions/stats?ruleId=
#[instrument(skip(state))]
pub async fn get_stats(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> Json<ApiResponse<ExecutionStats>> {
    let stats = state.engine.get_execution_stats(query.rule_id.as_deref());
    Json(ApiResponse::success(stats))
}

/// 存活探针
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "automation-engine"
    }))
}
