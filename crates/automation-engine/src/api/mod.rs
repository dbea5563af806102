//! HTTP 接口
//!
//! 提供规则执行、执行历史和统计查询的 REST API。

pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::build_app;
pub use state::AppState;
