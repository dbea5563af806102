//! 规则引擎领域模型
//!
//! 规则定义由外部的规则管理子系统维护，这里只描述执行时需要的字段。
//! 所有记录以 camelCase 序列化，与前端和历史接口保持一致。

use crate::operators::{ActionType, LogicalOperator, Operator};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 规则定义
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub conditions: Vec<Condition>,
    pub logical_operator: LogicalOperator,
    #[serde(default)]
    pub actions: Vec<Action>,
}

impl Rule {
    pub fn new(id: impl Into<String>, logical_operator: LogicalOperator) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            conditions: Vec::new(),
            logical_operator,
            actions: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_conditions(mut self, conditions: Vec<Condition>) -> Self {
        self.conditions = conditions;
        self
    }

    pub fn with_actions(mut self, actions: Vec<Action>) -> Self {
        self.actions = actions;
        self
    }

    /// 从 JSON 字符串解析
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// 条件
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Condition {
    pub id: String,
    /// 点号分隔的字段路径，如 "member.points"
    pub field: String,
    pub operator: Operator,
    #[serde(default)]
    pub value: Value,
}

impl Condition {
    pub fn new(
        id: impl Into<String>,
        field: impl Into<String>,
        operator: Operator,
        value: impl Into<Value>,
    ) -> Self {
        Self {
            id: id.into(),
            field: field.into(),
            operator,
            value: value.into(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

/// 动作
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Action {
    pub id: String,
    #[serde(rename = "type")]
    pub action_type: ActionType,
    #[serde(default)]
    pub config: Map<String, Value>,
    /// 执行顺序，升序执行，相同顺序保持原始位置
    #[serde(default)]
    pub order: i64,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl Action {
    pub fn new(id: impl Into<String>, action_type: ActionType, order: i64) -> Self {
        Self {
            id: id.into(),
            action_type,
            config: Map::new(),
            order,
            enabled: true,
        }
    }

    /// 设置配置；非 object 的值会被忽略
    pub fn with_config(mut self, config: Value) -> Self {
        if let Value::Object(map) = config {
            self.config = map;
        }
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// 读取配置项
    pub fn config_value(&self, key: &str) -> Option<&Value> {
        self.config.get(key)
    }
}

/// 单个条件的评估结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionResult {
    pub condition_id: String,
    pub result: bool,
    /// 字段不存在时为空
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_value: Option<Value>,
    pub expected_value: Value,
    pub operator: Operator,
}

/// 动作执行状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    Success,
    Failed,
    Skipped,
}

impl ActionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failed => "failed",
            Self::Skipped => "skipped",
        }
    }
}

/// 单个动作的执行结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResult {
    pub action_id: String,
    pub status: ActionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// 耗时（毫秒）
    pub duration: u64,
}

impl ActionResult {
    pub fn success(action_id: impl Into<String>, result: Value, duration: u64) -> Self {
        Self {
            action_id: action_id.into(),
            status: ActionStatus::Success,
            result: Some(result),
            error: None,
            duration,
        }
    }

    pub fn failed(action_id: impl Into<String>, error: impl Into<String>, duration: u64) -> Self {
        Self {
            action_id: action_id.into(),
            status: ActionStatus::Failed,
            result: None,
            error: Some(error.into()),
            duration,
        }
    }

    pub fn skipped(action_id: impl Into<String>) -> Self {
        Self {
            action_id: action_id.into(),
            status: ActionStatus::Skipped,
            result: None,
            error: None,
            duration: 0,
        }
    }
}

/// 执行整体状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    Success,
    Failed,
    Partial,
}

impl ExecutionStatus {
    /// 根据动作结果推导状态：任一动作失败为 partial，否则为 success
    ///
    /// 条件不满足（全部 skipped）同样是 success。
    pub fn from_actions(actions: &[ActionResult]) -> Self {
        if actions.iter().any(|a| a.status == ActionStatus::Failed) {
            Self::Partial
        } else {
            Self::Success
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failed => "failed",
            Self::Partial => "partial",
        }
    }
}

/// 一次规则执行的完整记录，创建后不再修改
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Execution {
    pub id: String,
    pub rule_id: String,
    pub status: ExecutionStatus,
    pub executed_at: DateTime<Utc>,
    pub triggered_by: String,
    pub trigger_data: Value,
    pub conditions_evaluated: Vec<ConditionResult>,
    pub actions_executed: Vec<ActionResult>,
    /// 整个流水线耗时（毫秒）
    pub duration: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
