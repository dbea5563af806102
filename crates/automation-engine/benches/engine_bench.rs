//! 规则引擎性能基准测试
//!
//! 测试覆盖：
//! - 单个条件评估性能
//! - AND/OR 组合在不同条件数量下的性能
//! - 测试模式下的完整执行流水线

use automation_engine::{
    Action, ActionType, AutomationEngine, Condition, ConditionEvaluator, ExecutionContext,
    LogicalCombinator, LogicalOperator, Operator, Rule, TriggerData,
};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use serde_json::{Map, Value, json};
use std::hint::black_box;

fn member_data(fields: usize) -> TriggerData {
    let mut member = Map::new();
    member.insert("points".to_string(), json!(150));
    member.insert("tier".to_string(), json!("gold"));
    for i in 0..fields {
        member.insert(format!("field_{}", i), json!(format!("value_{}", i)));
    }
    TriggerData::new(json!({ "member": Value::Object(member) }))
}

/// 全部为真的条件列表
fn matching_conditions(count: usize) -> Vec<Condition> {
    (0..count)
        .map(|i| {
            Condition::new(
                format!("c{}", i),
                format!("member.field_{}", i),
                Operator::Equals,
                format!("value_{}", i),
            )
        })
        .collect()
}

fn bench_condition_evaluation(c: &mut Criterion) {
    let data = member_data(0);
    let mut group = c.benchmark_group("condition_evaluation");

    let cases = [
        ("equals", Condition::new("c1", "member.tier", Operator::Equals, "gold")),
        (
            "greater_equal",
            Condition::new("c1", "member.points", Operator::GreaterEqual, 100),
        ),
        (
            "in",
            Condition::new("c1", "member.tier", Operator::In, json!(["silver", "gold"])),
        ),
        (
            "type_mismatch",
            Condition::new("c1", "member.tier", Operator::GreaterThan, 100),
        ),
    ];

    for (name, condition) in cases {
        group.bench_function(name, |b| {
            b.iter(|| ConditionEvaluator::evaluate_condition(black_box(&condition), black_box(&data)))
        });
    }

    group.finish();
}

fn bench_logical_combinator(c: &mut Criterion) {
    let mut group = c.benchmark_group("logical_combinator");

    for count in [1, 5, 20, 50] {
        let data = member_data(count);
        let conditions = matching_conditions(count);
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("and", count), &conditions, |b, conditions| {
            b.iter(|| LogicalCombinator::evaluate(black_box(conditions), LogicalOperator::And, &data))
        });

        // OR 在第一个条件处短路
        group.bench_with_input(BenchmarkId::new("or", count), &conditions, |b, conditions| {
            b.iter(|| LogicalCombinator::evaluate(black_box(conditions), LogicalOperator::Or, &data))
        });
    }

    group.finish();
}

fn bench_test_mode_execution(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().expect("创建 tokio runtime 失败");
    let engine = AutomationEngine::with_defaults();
    let rule = Rule::new("rule-bench", LogicalOperator::And)
        .with_conditions(vec![
            Condition::new("c1", "member.points", Operator::GreaterEqual, 100),
            Condition::new("c2", "member.tier", Operator::Equals, "gold"),
        ])
        .with_actions(vec![
            Action::new("a1", ActionType::AwardBadge, 1).with_config(json!({"badgeId": "B1"})),
            Action::new("a2", ActionType::AwardPoints, 2).with_config(json!({"amount": 50})),
            Action::new("a3", ActionType::LogEvent, 3),
        ]);
    let context = ExecutionContext::test("bench", None);
    let payload = member_data(0).into_inner();

    c.bench_function("execute_rule_test_mode", |b| {
        b.iter(|| {
            runtime.block_on(engine.execute_rule(
                black_box(&rule),
                payload.clone(),
                &context,
            ))
        })
    });
}

criterion_group!(
    benches,
    bench_condition_evaluation,
    bench_logical_combinator,
    bench_test_mode_execution
);
criterion_main!(benches);
