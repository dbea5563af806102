//! 条件操作符、逻辑操作符与动作类型定义
//!
//! 规则 JSON 中的字符串在反序列化时映射为封闭枚举；无法识别的字符串保留在
//! `Unsupported` / `Unknown` 变体中，由评估器和分发器在运行时报错。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 条件操作符
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Operator {
    // 通用比较
    Equals,
    NotEquals,

    // 数值比较
    GreaterThan,
    LessThan,
    GreaterEqual,
    LessEqual,

    // 包含检查
    Contains,
    NotContains,
    In,
    NotIn,

    // 字符串操作
    StartsWith,
    EndsWith,

    // 存在性检查
    Exists,
    NotExists,

    /// 无法识别的操作符，评估时视为错误
    Unsupported(String),
}

impl Operator {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Equals => "equals",
            Self::NotEquals => "not_equals",
            Self::GreaterThan => "greater_than",
            Self::LessThan => "less_than",
            Self::GreaterEqual => "greater_equal",
            Self::LessEqual => "less_equal",
            Self::Contains => "contains",
            Self::NotContains => "not_contains",
            Self::In => "in",
            Self::NotIn => "not_in",
            Self::StartsWith => "starts_with",
            Self::EndsWith => "ends_with",
            Self::Exists => "exists",
            Self::NotExists => "not_exists",
            Self::Unsupported(s) => s.as_str(),
        }
    }
}

impl From<String> for Operator {
    fn from(s: String) -> Self {
        match s.as_str() {
            "equals" => Self::Equals,
            "not_equals" => Self::NotEquals,
            "greater_than" => Self::GreaterThan,
            "less_than" => Self::LessThan,
            "greater_equal" => Self::GreaterEqual,
            "less_equal" => Self::LessEqual,
            "contains" => Self::Contains,
            "not_contains" => Self::NotContains,
            "in" => Self::In,
            "not_in" => Self::NotIn,
            "starts_with" => Self::StartsWith,
            "ends_with" => Self::EndsWith,
            "exists" => Self::Exists,
            "not_exists" => Self::NotExists,
            _ => Self::Unsupported(s),
        }
    }
}

impl From<Operator> for String {
    fn from(op: Operator) -> Self {
        match op {
            Operator::Unsupported(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 逻辑操作符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogicalOperator {
    #[serde(alias = "and")]
    And,
    #[serde(alias = "or")]
    Or,
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::And => write!(f, "AND"),
            Self::Or => write!(f, "OR"),
        }
    }
}

/// 动作类型
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActionType {
    SendEmail,
    SendNotification,
    UpdateField,
    CreateTask,
    AwardPoints,
    AwardBadge,
    TriggerWorkflow,
    Webhook,
    LogEvent,

    /// 无法识别的动作类型，分发时报错
    Unknown(String),
}

impl ActionType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::SendEmail => "send_email",
            Self::SendNotification => "send_notification",
            Self::UpdateField => "update_field",
            Self::CreateTask => "create_task",
            Self::AwardPoints => "award_points",
            Self::AwardBadge => "award_badge",
            Self::TriggerWorkflow => "trigger_workflow",
            Self::Webhook => "webhook",
            Self::LogEvent => "log_event",
            Self::Unknown(s) => s.as_str(),
        }
    }
}

impl From<String> for ActionType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "send_email" => Self::SendEmail,
            "send_notification" => Self::SendNotification,
            "update_field" => Self::UpdateField,
            "create_task" => Self::CreateTask,
            "award_points" => Self::AwardPoints,
            "award_badge" => Self::AwardBadge,
            "trigger_workflow" => Self::TriggerWorkflow,
            "webhook" => Self::Webhook,
            "log_event" => Self::LogEvent,
            _ => Self::Unknown(s),
        }
    }
}

impl From<ActionType> for String {
    fn from(action_type: ActionType) -> Self {
        match action_type {
            ActionType::Unknown(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_serde() {
        let op: Operator = serde_json::from_str(r#""greater_equal""#).unwrap();
        assert_eq!(op, Operator::GreaterEqual);
        assert_eq!(serde_json::to_string(&op).unwrap(), r#""greater_equal""#);
    }

    #[test]
    fn test_unsupported_operator_is_preserved() {
        let op: Operator = serde_json::from_str(r#""matches_regex""#).unwrap();
        assert_eq!(op, Operator::Unsupported("matches_regex".to_string()));
        assert_eq!(serde_json::to_string(&op).unwrap(), r#""matches_regex""#);
    }

    #[test]
    fn test_logical_operator_serde() {
        let op: LogicalOperator = serde_json::from_str(r#""OR""#).unwrap();
        assert_eq!(op, LogicalOperator::Or);
        let op: LogicalOperator = serde_json::from_str(r#""and""#).unwrap();
        assert_eq!(op, LogicalOperator::And);
        assert_eq!(serde_json::to_string(&op).unwrap(), r#""AND""#);
    }

    #[test]
    fn test_action_type_round_trip_names() {
        let types = [
            "send_email",
            "send_notification",
            "update_field",
            "create_task",
            "award_points",
            "award_badge",
            "trigger_workflow",
            "webhook",
            "log_event",
        ];
        for name in types {
            let action_type = ActionType::from(name.to_string());
            assert!(!matches!(action_type, ActionType::Unknown(_)), "{}", name);
            assert_eq!(action_type.to_string(), name);
        }
    }

    #[test]
    fn test_unknown_action_type() {
        let action_type: ActionType = serde_json::from_str(r#""send_fax""#).unwrap();
        assert_eq!(action_type, ActionType::Unknown("send_fax".to_string()));
    }
}
