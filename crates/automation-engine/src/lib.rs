//! 会员自动化规则引擎
//!
//! 对声明式规则（条件 + 逻辑操作符 + 有序动作）进行求值与执行：
//! - 点号路径字段解析与条件评估（失败即不满足）
//! - AND/OR 短路求值
//! - 按顺序执行动作，单个动作失败不影响其余动作
//! - 有界执行历史与统计
//! - HTTP 接口

pub mod api;
pub mod collaborators;
pub mod combinator;
pub mod context;
pub mod dispatcher;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod history;
pub mod models;
pub mod operators;
pub mod runner;
pub mod stats;
pub mod template;

pub use collaborators::Collaborators;
pub use combinator::{ConditionOutcome, LogicalCombinator};
pub use context::{ExecutionContext, ExecutionMode, ProductionContext, TestContext, TriggerData};
pub use dispatcher::ActionDispatcher;
pub use engine::AutomationEngine;
pub use error::{EngineError, Result};
pub use evaluator::ConditionEvaluator;
pub use history::{HistoryStore, InMemoryHistoryStore};
pub use models::{
    Action, ActionResult, ActionStatus, Condition, ConditionResult, Execution, ExecutionStatus,
    Rule,
};
pub use operators::{ActionType, LogicalOperator, Operator};
pub use runner::ActionRunner;
pub use stats::ExecutionStats;
