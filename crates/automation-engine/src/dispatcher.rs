//! 动作分发器
//!
//! 按动作类型分发到对应的外部协作服务。
//!
//! 测试模式下不产生任何副作用，只返回按类型固定格式的模拟结果；
//! 生产模式下先把配置解析为各类型的强类型配置，再调用外部服务。

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, instrument};

use crate::collaborators::Collaborators;
use crate::context::{ExecutionMode, TriggerData};
use crate::error::{EngineError, Result};
use crate::models::Action;
use crate::operators::ActionType;
use crate::template::TemplateRenderer;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EmailConfig {
    to: String,
    subject: String,
    #[serde(default)]
    body: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NotificationConfig {
    member_id: Option<String>,
    title: String,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateFieldConfig {
    entity: String,
    field: String,
    value: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateTaskConfig {
    title: String,
    #[serde(default)]
    assignee: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AwardPointsConfig {
    member_id: Option<String>,
    amount: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AwardBadgeConfig {
    member_id: Option<String>,
    badge_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TriggerWorkflowConfig {
    workflow_id: String,
    payload: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WebhookConfig {
    url: String,
    payload: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LogEventConfig {
    payload: Option<Value>,
}

/// 动作分发器
#[derive(Clone)]
pub struct ActionDispatcher {
    collaborators: Collaborators,
}

impl ActionDispatcher {
    pub fn new(collaborators: Collaborators) -> Self {
        Self { collaborators }
    }

    /// 执行单个动作，返回动作结果数据
    #[instrument(skip(self, action, data), fields(action_id = %action.id, action_type = %action.action_type))]
    pub async fn dispatch(
        &self,
        action: &Action,
        data: &TriggerData,
        mode: ExecutionMode,
    ) -> Result<Value> {
        match mode {
            ExecutionMode::Test => Self::simulate(action),
            ExecutionMode::Production => self.execute(action, data).await,
        }
    }

    /// 测试模式的模拟结果
    fn simulate(action: &Action) -> Result<Value> {
        let param = |key: &str| action.config_value(key).cloned().unwrap_or(Value::Null);

        let result = match &action.action_type {
            ActionType::SendEmail => json!({
                "to": param("to"),
                "subject": param("subject"),
                "sent": true
            }),
            ActionType::SendNotification => json!({
                "title": param("title"),
                "sent": true
            }),
            ActionType::UpdateField => json!({
                "entity": param("entity"),
                "field": param("field"),
                "value": param("value"),
                "updated": true
            }),
            ActionType::CreateTask => json!({
                "title": param("title"),
                "taskId": "test-task",
                "created": true
            }),
            ActionType::AwardPoints => json!({
                "amount": param("amount"),
                "awarded": true
            }),
            ActionType::AwardBadge => json!({
                "badgeId": param("badgeId"),
                "awarded": true
            }),
            ActionType::TriggerWorkflow => json!({
                "workflowId": param("workflowId"),
                "triggered": true
            }),
            ActionType::Webhook => json!({
                "url": param("url"),
                "status": 200
            }),
            ActionType::LogEvent => json!({ "logged": true }),
            ActionType::Unknown(name) => {
                return Err(EngineError::UnknownActionType(name.clone()));
            }
        };

        debug!("测试模式，返回模拟结果");
        Ok(result)
    }

    async fn execute(&self, action: &Action, data: &TriggerData) -> Result<Value> {
        let c = &self.collaborators;

        match &action.action_type {
            ActionType::SendEmail => {
                let config: EmailConfig = parse_config(action)?;
                let to = TemplateRenderer::render(&config.to, data);
                let subject = TemplateRenderer::render(&config.subject, data);
                let body = TemplateRenderer::render(&config.body, data);

                let message_id = c.email.send_email(&to, &subject, &body).await?;
                Ok(json!({ "messageId": message_id, "to": to }))
            }
            ActionType::SendNotification => {
                let config: NotificationConfig = parse_config(action)?;
                let member_id = resolve_member_id(action, config.member_id, data)?;
                let title = TemplateRenderer::render(&config.title, data);
                let message = TemplateRenderer::render(&config.message, data);

                let notification_id = c
                    .notifications
                    .send_notification(&member_id, &title, &message)
                    .await?;
                Ok(json!({ "notificationId": notification_id, "memberId": member_id }))
            }
            ActionType::UpdateField => {
                let config: UpdateFieldConfig = parse_config(action)?;

                c.fields
                    .update_field(&config.entity, &config.field, &config.value)
                    .await?;
                Ok(json!({
                    "entity": config.entity,
                    "field": config.field,
                    "updated": true
                }))
            }
            ActionType::CreateTask => {
                let config: CreateTaskConfig = parse_config(action)?;
                let title = TemplateRenderer::render(&config.title, data);
                let assignee = config.assignee.unwrap_or_default();

                let task_id = c.tasks.create_task(&title, &assignee).await?;
                Ok(json!({ "taskId": task_id }))
            }
            ActionType::AwardPoints => {
                let config: AwardPointsConfig = parse_config(action)?;
                let member_id = resolve_member_id(action, config.member_id, data)?;

                c.points.award_points(&member_id, config.amount).await?;
                Ok(json!({
                    "memberId": member_id,
                    "amount": config.amount,
                    "awarded": true
                }))
            }
            ActionType::AwardBadge => {
                let config: AwardBadgeConfig = parse_config(action)?;
                let member_id = resolve_member_id(action, config.member_id, data)?;

                c.badges.award_badge(&member_id, &config.badge_id).await?;
                Ok(json!({
                    "memberId": member_id,
                    "badgeId": config.badge_id,
                    "awarded": true
                }))
            }
            ActionType::TriggerWorkflow => {
                let config: TriggerWorkflowConfig = parse_config(action)?;
                let payload = config.payload.unwrap_or_else(|| data.data().clone());

                c.workflows
                    .trigger_workflow(&config.workflow_id, &payload)
                    .await?;
                Ok(json!({ "workflowId": config.workflow_id, "triggered": true }))
            }
            ActionType::Webhook => {
                let config: WebhookConfig = parse_config(action)?;
                let payload = config.payload.unwrap_or_else(|| data.data().clone());

                let status = c.webhooks.call_webhook(&config.url, &payload).await?;
                Ok(json!({ "url": config.url, "status": status }))
            }
            ActionType::LogEvent => {
                let config: LogEventConfig = parse_config(action)?;
                let payload = config.payload.unwrap_or_else(|| data.data().clone());

                let log_id = c.events.log_event(&payload).await?;
                Ok(json!({ "logId": log_id }))
            }
            ActionType::Unknown(name) => Err(EngineError::UnknownActionType(name.clone())),
        }
    }
}

/// 将动作配置解析为强类型配置
fn parse_config<T: DeserializeOwned>(action: &Action) -> Result<T> {
    serde_json::from_value(Value::Object(action.config.clone())).map_err(|e| {
        EngineError::InvalidActionConfig {
            action_type: action.action_type.to_string(),
            message: e.to_string(),
        }
    })
}

/// 会员 ID：优先取配置，缺省时取触发数据中的 member.id
fn resolve_member_id(
    action: &Action,
    configured: Option<String>,
    data: &TriggerData,
) -> Result<String> {
    if let Some(member_id) = configured {
        return Ok(member_id);
    }

    match data.get_field("member.id") {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        _ => Err(EngineError::InvalidActionConfig {
            action_type: action.action_type.to_string(),
            message: "缺少 memberId，且触发数据中没有 member.id".to_string(),
        }),
    }
}
