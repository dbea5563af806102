//! HTTP Webhook 调用
//!
//! 以 JSON POST 调用目标地址。非 2xx 响应视为调用失败。

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::WebhookCaller;
use crate::error::{EngineError, Result};

/// 基于 reqwest 的 webhook 调用
#[derive(Debug, Clone, Default)]
pub struct HttpWebhookCaller {
    client: reqwest::Client,
}

impl HttpWebhookCaller {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl WebhookCaller for HttpWebhookCaller {
    #[instrument(skip(self, payload))]
    async fn call_webhook(&self, url: &str, payload: &Value) -> Result<u16> {
        let response = self
            .client
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(|e| EngineError::collaborator("webhook", e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "webhook 返回非成功状态");
            return Err(EngineError::collaborator(
                "webhook",
                format!("HTTP {}", status.as_u16()),
            ));
        }

        debug!(status = status.as_u16(), "webhook 调用成功");
        Ok(status.as_u16())
    }
}
