//! 规则引擎错误类型

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("类型不匹配: 期望 {expected}, 实际 {actual}")]
    TypeMismatch { expected: String, actual: String },

    #[error("不支持的操作符: {0}")]
    UnsupportedOperator(String),

    #[error("未知的动作类型: {0}")]
    UnknownActionType(String),

    #[error("动作配置无效: {action_type} - {message}")]
    InvalidActionConfig {
        action_type: String,
        message: String,
    },

    #[error("外部服务错误: {service} - {message}")]
    Collaborator { service: String, message: String },

    #[error("触发数据格式错误: 期望 object, 实际 {0}")]
    MalformedTriggerData(String),

    #[error("JSON 序列化错误: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl EngineError {
    /// 构造外部服务错误
    pub fn collaborator(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Collaborator {
            service: service.into(),
            message: message.into(),
        }
    }

    /// 获取错误码
    pub fn code(&self) -> &'static str {
        match self {
            Self::TypeMismatch { .. } => "TYPE_MISMATCH",
            Self::UnsupportedOperator(_) => "UNSUPPORTED_OPERATOR",
            Self::UnknownActionType(_) => "UNKNOWN_ACTION_TYPE",
            Self::InvalidActionConfig { .. } => "INVALID_ACTION_CONFIG",
            Self::Collaborator { .. } => "COLLABORATOR_ERROR",
            Self::MalformedTriggerData(_) => "MALFORMED_TRIGGER_DATA",
            Self::JsonError(_) => "JSON_ERROR",
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
