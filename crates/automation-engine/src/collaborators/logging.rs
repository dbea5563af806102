//! 日志协作服务
//!
//! 各外部服务的默认实现：以结构化日志记录调用参数，并返回生成的 ID。
//! 实际投递由部署时注入的实现完成。

use async_trait::async_trait;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use super::{
    BadgeAwarder, EmailSender, EventLogger, FieldUpdater, NotificationService, PointsAwarder,
    TaskCreator, WorkflowTrigger,
};
use crate::error::Result;

/// 以日志形式记录调用的协作服务
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingCollaborator;

#[async_trait]
impl EmailSender for LoggingCollaborator {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<String> {
        let message_id = Uuid::new_v4().to_string();
        info!(
            message_id = %message_id,
            to = %to,
            subject = %subject,
            body_len = body.len(),
            "发送邮件"
        );
        Ok(message_id)
    }
}

#[async_trait]
impl NotificationService for LoggingCollaborator {
    async fn send_notification(
        &self,
        member_id: &str,
        title: &str,
        message: &str,
    ) -> Result<String> {
        let notification_id = Uuid::new_v4().to_string();
        info!(
            notification_id = %notification_id,
            member_id = %member_id,
            title = %title,
            message_len = message.len(),
            "发送通知"
        );
        Ok(notification_id)
    }
}

#[async_trait]
impl FieldUpdater for LoggingCollaborator {
    async fn update_field(&self, entity: &str, field: &str, value: &Value) -> Result<()> {
        info!(entity = %entity, field = %field, value = %value, "更新字段");
        Ok(())
    }
}

#[async_trait]
impl TaskCreator for LoggingCollaborator {
    async fn create_task(&self, title: &str, assignee: &str) -> Result<String> {
        let task_id = Uuid::new_v4().to_string();
        info!(task_id = %task_id, title = %title, assignee = %assignee, "创建任务");
        Ok(task_id)
    }
}

#[async_trait]
impl PointsAwarder for LoggingCollaborator {
    async fn award_points(&self, member_id: &str, amount: i64) -> Result<()> {
        info!(member_id = %member_id, amount, "发放积分");
        Ok(())
    }
}

#[async_trait]
impl BadgeAwarder for LoggingCollaborator {
    async fn award_badge(&self, member_id: &str, badge_id: &str) -> Result<()> {
        info!(member_id = %member_id, badge_id = %badge_id, "发放徽章");
        Ok(())
    }
}

#[async_trait]
impl WorkflowTrigger for LoggingCollaborator {
    async fn trigger_workflow(&self, workflow_id: &str, payload: &Value) -> Result<()> {
        info!(workflow_id = %workflow_id, payload = %payload, "触发工作流");
        Ok(())
    }
}

#[async_trait]
impl EventLogger for LoggingCollaborator {
    async fn log_event(&self, payload: &Value) -> Result<String> {
        let log_id = Uuid::new_v4().to_string();
        info!(log_id = %log_id, payload = %payload, "记录事件");
        Ok(log_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_generated_ids_are_unique() {
        let collaborator = LoggingCollaborator;
        let id1 = collaborator.send_email("a@club.org", "Hi", "Body").await.unwrap();
        let id2 = collaborator.send_email("a@club.org", "Hi", "Body").await.unwrap();
        assert_ne!(id1, id2);
    }

    #[tokio::test]
    async fn test_acknowledging_calls_succeed() {
        let collaborator = LoggingCollaborator;
        assert!(collaborator.award_points("m-001", 50).await.is_ok());
        assert!(collaborator.award_badge("m-001", "B1").await.is_ok());
        assert!(collaborator
            .update_field("member", "tier", &json!("gold"))
            .await
            .is_ok());
        assert!(collaborator
            .trigger_workflow("wf-onboarding", &json!({}))
            .await
            .is_ok());
        assert!(!collaborator.log_event(&json!({"k": "v"})).await.unwrap().is_empty());
    }
}
