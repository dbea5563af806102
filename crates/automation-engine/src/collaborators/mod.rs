//! 外部协作服务
//!
//! 动作分发器在生产模式下调用的外部服务接口。每个接口只描述调用契约，
//! 返回一个小的结构化结果或错误；错误由动作执行器统一转换为失败的动作结果。
//!
//! ## 默认实现
//!
//! - **LoggingCollaborator**: 邮件、通知、字段更新、任务、积分、徽章、工作流、事件日志，
//!   以结构化日志记录调用并返回生成的 ID
//! - **HttpWebhookCaller**: 通过 HTTP POST 调用 webhook

mod logging;
mod webhook;

pub use logging::LoggingCollaborator;
pub use webhook::HttpWebhookCaller;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// 邮件发送
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// 发送邮件，返回消息 ID
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<String>;
}

/// 站内通知
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationService: Send + Sync {
    /// 发送通知，返回通知 ID
    async fn send_notification(&self, member_id: &str, title: &str, message: &str)
        -> Result<String>;
}

/// 实体字段更新
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FieldUpdater: Send + Sync {
    async fn update_field(&self, entity: &str, field: &str, value: &Value) -> Result<()>;
}

/// 任务创建
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskCreator: Send + Sync {
    /// 创建任务，返回任务 ID
    async fn create_task(&self, title: &str, assignee: &str) -> Result<String>;
}

/// 积分发放
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PointsAwarder: Send + Sync {
    async fn award_points(&self, member_id: &str, amount: i64) -> Result<()>;
}

/// 徽章发放
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BadgeAwarder: Send + Sync {
    async fn award_badge(&self, member_id: &str, badge_id: &str) -> Result<()>;
}

/// 工作流触发
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WorkflowTrigger: Send + Sync {
    async fn trigger_workflow(&self, workflow_id: &str, payload: &Value) -> Result<()>;
}

/// Webhook 调用
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WebhookCaller: Send + Sync {
    /// 调用 webhook，返回 HTTP 状态码
    async fn call_webhook(&self, url: &str, payload: &Value) -> Result<u16>;
}

/// 事件日志
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventLogger: Send + Sync {
    /// 记录事件，返回日志 ID
    async fn log_event(&self, payload: &Value) -> Result<String>;
}

/// 外部协作服务集合
///
/// 所有服务通过 Arc 共享，可在多个引擎实例间复用。
#[derive(Clone)]
pub struct Collaborators {
    pub email: Arc<dyn EmailSender>,
    pub notifications: Arc<dyn NotificationService>,
    pub fields: Arc<dyn FieldUpdater>,
    pub tasks: Arc<dyn TaskCreator>,
    pub points: Arc<dyn PointsAwarder>,
    pub badges: Arc<dyn BadgeAwarder>,
    pub workflows: Arc<dyn WorkflowTrigger>,
    pub webhooks: Arc<dyn WebhookCaller>,
    pub events: Arc<dyn EventLogger>,
}

impl Collaborators {
    /// 默认实现：日志记录 + HTTP webhook
    pub fn with_defaults() -> Self {
        let logging = Arc::new(LoggingCollaborator);

        Self {
            email: logging.clone(),
            notifications: logging.clone(),
            fields: logging.clone(),
            tasks: logging.clone(),
            points: logging.clone(),
            badges: logging.clone(),
            workflows: logging.clone(),
            webhooks: Arc::new(HttpWebhookCaller::default()),
            events: logging,
        }
    }

    pub fn with_email(mut self, email: Arc<dyn EmailSender>) -> Self {
        self.email = email;
        self
    }

    pub fn with_notifications(mut self, notifications: Arc<dyn NotificationService>) -> Self {
        self.notifications = notifications;
        self
    }

    pub fn with_fields(mut self, fields: Arc<dyn FieldUpdater>) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_tasks(mut self, tasks: Arc<dyn TaskCreator>) -> Self {
        self.tasks = tasks;
        self
    }

    pub fn with_points(mut self, points: Arc<dyn PointsAwarder>) -> Self {
        self.points = points;
        self
    }

    pub fn with_badges(mut self, badges: Arc<dyn BadgeAwarder>) -> Self {
        self.badges = badges;
        self
    }

    pub fn with_workflows(mut self, workflows: Arc<dyn WorkflowTrigger>) -> Self {
        self.workflows = workflows;
        self
    }

    pub fn with_webhooks(mut self, webhooks: Arc<dyn WebhookCaller>) -> Self {
        self.webhooks = webhooks;
        self
    }

    pub fn with_events(mut self, events: Arc<dyn EventLogger>) -> Self {
        self.events = events;
        self
    }
}

impl Default for Collaborators {
    fn default() -> Self {
        Self::with_defaults()
    }
}
