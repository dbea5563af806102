//! 请求与响应 DTO

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::context::ExecutionContext;
use crate::models::Rule;

/// API 统一响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            code: "SUCCESS".to_string(),
            message: "操作成功".to_string(),
            data: Some(data),
        }
    }
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

fn default_user_id() -> String {
    "system".to_string()
}

/// 执行上下文
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionContextDto {
    #[serde(default = "default_user_id")]
    pub user_id: String,
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub test_mode: bool,
    pub test_data: Option<Value>,
}

impl Default for ExecutionContextDto {
    fn default() -> Self {
        Self {
            user_id: default_user_id(),
            timestamp: None,
            test_mode: false,
            test_data: None,
        }
    }
}

impl From<ExecutionContextDto> for ExecutionContext {
    fn from(dto: ExecutionContextDto) -> Self {
        ExecutionContext::from_parts(dto.user_id, dto.timestamp, dto.test_mode, dto.test_data)
    }
}

/// 执行规则请求
///
/// POST /api/rules/execute
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteRuleRequest {
    pub rule: Rule,
    #[serde(default = "empty_object")]
    pub trigger_data: Value,
    #[serde(default)]
    pub context: ExecutionContextDto,
}

/// 执行历史查询参数
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryQuery {
    pub rule_id: Option<String>,
    pub limit: Option<usize>,
}

/// 执行统计查询参数
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsQuery {
    pub rule_id: Option<String>,
}
