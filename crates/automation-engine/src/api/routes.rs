//! 路由配置

use automation_shared::observability::middleware as obs_middleware;
use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;

use super::handlers;
use super::state::AppState;

/// 规则执行路由
fn rule_routes() -> Router<AppState> {
    Router::new().route("/rules/execute", post(handlers::execute_rule))
}

/// 执行历史与统计路由
fn execution_routes() -> Router<AppState> {
    Router::new()
        .route("/executions", get(handlers::list_executions))
        .route("/executions/stats", get(handlers::get_stats))
}

/// 全部 API 路由（不含 /api 前缀）
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(rule_routes())
        .merge(execution_routes())
}

/// 构建完整应用：API 路由、健康检查、CORS 与可观测性中间件
pub fn build_app(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .route("/health", get(handlers::health_check))
        .layer(cors)
        .layer(middleware::from_fn(obs_middleware::http_tracing))
        .layer(middleware::from_fn(obs_middleware::request_id))
        .with_state(state)
}
