//! 条件评估器
//!
//! 实现各操作符的评估逻辑。评估过程中的任何错误（操作符不支持、类型无法转换）
//! 都在 [`ConditionEvaluator::evaluate_condition`] 内被吸收并视为不满足。

use crate::context::TriggerData;
use crate::error::{EngineError, Result};
use crate::models::{Condition, ConditionResult};
use crate::operators::Operator;
use serde_json::Value;
use tracing::debug;

/// 条件评估器
pub struct ConditionEvaluator;

impl ConditionEvaluator {
    /// 评估单个条件，返回完整的评估记录
    ///
    /// 失败即不满足：评估错误不会向调用方传播。
    pub fn evaluate_condition(condition: &Condition, data: &TriggerData) -> ConditionResult {
        let actual_value = data.get_field(&condition.field);

        let result =
            match Self::evaluate(actual_value, &condition.operator, &condition.value) {
                Ok(matched) => matched,
                Err(e) => {
                    debug!(
                        condition_id = %condition.id,
                        field = %condition.field,
                        operator = %condition.operator,
                        error = %e,
                        "条件评估出错，按不满足处理"
                    );
                    false
                }
            };

        ConditionResult {
            condition_id: condition.id.clone(),
            result,
            actual_value: actual_value.cloned(),
            expected_value: condition.value.clone(),
            operator: condition.operator.clone(),
        }
    }

    /// 评估条件
    ///
    /// # Arguments
    /// * `field_value` - 从触发数据中解析的字段值，字段不存在时为 None
    /// * `operator` - 操作符
    /// * `expected_value` - 规则中定义的期望值
    pub fn evaluate(
        field_value: Option<&Value>,
        operator: &Operator,
        expected_value: &Value,
    ) -> Result<bool> {
        match operator {
            Operator::Exists => Ok(Self::exists(field_value)),
            Operator::NotExists => Ok(!Self::exists(field_value)),
            Operator::Equals => Ok(Self::equals(field_value, expected_value)),
            Operator::NotEquals => Ok(!Self::equals(field_value, expected_value)),
            Operator::GreaterThan => Self::compare(field_value, expected_value, |a, b| a > b),
            Operator::LessThan => Self::compare(field_value, expected_value, |a, b| a < b),
            Operator::GreaterEqual => Self::compare(field_value, expected_value, |a, b| a >= b),
            Operator::LessEqual => Self::compare(field_value, expected_value, |a, b| a <= b),
            Operator::Contains => Self::contains(field_value, expected_value),
            Operator::NotContains => Self::contains(field_value, expected_value).map(|r| !r),
            Operator::In => Self::in_list(field_value, expected_value),
            Operator::NotIn => Self::in_list(field_value, expected_value).map(|r| !r),
            Operator::StartsWith => {
                Self::string_match(field_value, expected_value, |s, p| s.starts_with(p))
            }
            Operator::EndsWith => {
                Self::string_match(field_value, expected_value, |s, p| s.ends_with(p))
            }
            Operator::Unsupported(name) => Err(EngineError::UnsupportedOperator(name.clone())),
        }
    }

    /// 字段存在且不为 null
    fn exists(value: Option<&Value>) -> bool {
        matches!(value, Some(v) if !v.is_null())
    }

    /// 相等比较
    ///
    /// 双方都能解析为数值时按数值比较（100 == 100.0 == "100"），否则按 JSON 结构比较。
    fn equals(field: Option<&Value>, expected: &Value) -> bool {
        let Some(field) = field else {
            return false;
        };
        Self::values_equal(field, expected)
    }

    fn values_equal(a: &Value, b: &Value) -> bool {
        if let (Some(f1), Some(f2)) = (Self::as_number(a), Self::as_number(b)) {
            return (f1 - f2).abs() < f64::EPSILON;
        }
        a == b
    }

    /// 数值比较，任一侧无法转换为数值时报类型错误
    fn compare<F>(field: Option<&Value>, expected: &Value, cmp: F) -> Result<bool>
    where
        F: Fn(f64, f64) -> bool,
    {
        let field_num = field.and_then(Self::coerce_f64).ok_or_else(|| {
            EngineError::TypeMismatch {
                expected: "number".to_string(),
                actual: Self::type_name(field).to_string(),
            }
        })?;

        let expected_num =
            Self::coerce_f64(expected).ok_or_else(|| EngineError::TypeMismatch {
                expected: "number".to_string(),
                actual: Self::type_name(Some(expected)).to_string(),
            })?;

        Ok(cmp(field_num, expected_num))
    }

    /// 数组成员检查或字符串子串检查
    fn contains(field: Option<&Value>, expected: &Value) -> Result<bool> {
        match field {
            Some(Value::Array(arr)) => Ok(arr.iter().any(|item| Self::values_equal(item, expected))),
            Some(Value::String(s)) => {
                let needle = Self::coerce_string(expected).ok_or_else(|| {
                    EngineError::TypeMismatch {
                        expected: "string".to_string(),
                        actual: Self::type_name(Some(expected)).to_string(),
                    }
                })?;
                Ok(s.contains(needle.as_str()))
            }
            other => Err(EngineError::TypeMismatch {
                expected: "string or array".to_string(),
                actual: Self::type_name(other).to_string(),
            }),
        }
    }

    /// 列表包含检查，期望值必须是数组
    fn in_list(field: Option<&Value>, expected: &Value) -> Result<bool> {
        let arr = expected.as_array().ok_or_else(|| EngineError::TypeMismatch {
            expected: "array".to_string(),
            actual: Self::type_name(Some(expected)).to_string(),
        })?;

        let Some(field) = field else {
            return Ok(false);
        };

        Ok(arr.iter().any(|item| Self::values_equal(field, item)))
    }

    /// 字符串前缀/后缀检查，双方先转换为字符串
    fn string_match<F>(field: Option<&Value>, expected: &Value, matcher: F) -> Result<bool>
    where
        F: Fn(&str, &str) -> bool,
    {
        let s = field.and_then(Self::coerce_string).ok_or_else(|| {
            EngineError::TypeMismatch {
                expected: "string".to_string(),
                actual: Self::type_name(field).to_string(),
            }
        })?;

        let pattern = Self::coerce_string(expected).ok_or_else(|| EngineError::TypeMismatch {
            expected: "string".to_string(),
            actual: Self::type_name(Some(expected)).to_string(),
        })?;

        Ok(matcher(&s, &pattern))
    }

    /// 相等比较使用的数值解析：数字或数字字符串
    fn as_number(value: &Value) -> Option<f64> {
        match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => Self::parse_numeric(s),
            _ => None,
        }
    }

    /// 数值比较使用的宽松转换：额外接受布尔值（1/0）
    fn coerce_f64(value: &Value) -> Option<f64> {
        match value {
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            other => Self::as_number(other),
        }
    }

    fn parse_numeric(s: &str) -> Option<f64> {
        s.trim().parse::<f64>().ok().filter(|n| n.is_finite())
    }

    /// 标量转字符串；null、数组和对象无法转换
    fn coerce_string(value: &Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// 获取值的类型名称
    pub(crate) fn type_name(value: Option<&Value>) -> &'static str {
        match value {
            None => "undefined",
            Some(Value::Null) => "null",
            Some(Value::Bool(_)) => "boolean",
            Some(Value::Number(_)) => "number",
            Some(Value::String(_)) => "string",
            Some(Value::Array(_)) => "array",
            Some(Value::Object(_)) => "object",
        }
    }
}
