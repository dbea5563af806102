//! 应用状态定义

use std::sync::Arc;

use crate::engine::AutomationEngine;

/// Axum 应用共享状态
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<AutomationEngine>,
    /// 未指定 limit 时的历史查询条数
    pub default_history_limit: usize,
}

impl AppState {
    pub fn new(engine: Arc<AutomationEngine>, default_history_limit: usize) -> Self {
        Self {
            engine,
            default_history_limit,
        }
    }
}
