//! 执行上下文与触发数据
//!
//! 调用方传入的上下文在入口处一次性解析为生产或测试两种变体，
//! 之后只向下传递 [`ExecutionMode`]，避免布尔开关在调用链深处改变行为。

use chrono::{DateTime, Utc};
use serde_json::Value;

/// 触发数据 - 规则条件评估和动作配置渲染所使用的数据
#[derive(Debug, Clone, Default)]
pub struct TriggerData {
    data: Value,
}

impl TriggerData {
    pub fn new(data: Value) -> Self {
        Self { data }
    }

    /// 从 JSON 对象创建
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let data: Value = serde_json::from_str(json)?;
        Ok(Self { data })
    }

    /// 获取字段值（点号分隔的路径，如 "member.points" 或 "event.venue.city"）
    ///
    /// 任一段缺失，或中间值不是 object 时返回 None；不会失败。
    pub fn get_field(&self, path: &str) -> Option<&Value> {
        path.split('.').try_fold(&self.data, |current, segment| match current {
            Value::Object(map) => map.get(segment),
            _ => None,
        })
    }

    /// 顶层是否为 object
    pub fn is_object(&self) -> bool {
        self.data.is_object()
    }

    /// 获取底层数据
    pub fn data(&self) -> &Value {
        &self.data
    }

    pub fn into_inner(self) -> Value {
        self.data
    }
}

/// 执行模式
///
/// 测试模式下动作只返回模拟结果，且执行记录不写入历史。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    Production,
    Test,
}

impl ExecutionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Test => "test",
        }
    }
}

/// 生产触发上下文
#[derive(Debug, Clone)]
pub struct ProductionContext {
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
}

/// 测试上下文（规则编辑面板的试运行）
#[derive(Debug, Clone)]
pub struct TestContext {
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
    /// 试运行使用的数据，缺省时沿用调用方传入的触发数据
    pub test_data: Option<Value>,
}

/// 执行上下文
#[derive(Debug, Clone)]
pub enum ExecutionContext {
    Production(ProductionContext),
    Test(TestContext),
}

impl ExecutionContext {
    pub fn production(user_id: impl Into<String>) -> Self {
        Self::Production(ProductionContext {
            user_id: user_id.into(),
            timestamp: Utc::now(),
        })
    }

    pub fn test(user_id: impl Into<String>, test_data: Option<Value>) -> Self {
        Self::Test(TestContext {
            user_id: user_id.into(),
            timestamp: Utc::now(),
            test_data,
        })
    }

    /// 从 `{ userId, timestamp, testMode, testData }` 形式的输入构建
    pub fn from_parts(
        user_id: impl Into<String>,
        timestamp: Option<DateTime<Utc>>,
        test_mode: bool,
        test_data: Option<Value>,
    ) -> Self {
        let user_id = user_id.into();
        let timestamp = timestamp.unwrap_or_else(Utc::now);

        if test_mode {
            Self::Test(TestContext {
                user_id,
                timestamp,
                test_data,
            })
        } else {
            Self::Production(ProductionContext { user_id, timestamp })
        }
    }

    pub fn mode(&self) -> ExecutionMode {
        match self {
            Self::Production(_) => ExecutionMode::Production,
            Self::Test(_) => ExecutionMode::Test,
        }
    }

    pub fn user_id(&self) -> &str {
        match self {
            Self::Production(ctx) => &ctx.user_id,
            Self::Test(ctx) => &ctx.user_id,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::Production(ctx) => ctx.timestamp,
            Self::Test(ctx) => ctx.timestamp,
        }
    }

    /// 确定本次执行实际使用的触发数据
    pub fn resolve_payload(&self, trigger_data: Value) -> TriggerData {
        match self {
            Self::Production(_) => TriggerData::new(trigger_data),
            Self::Test(ctx) => TriggerData::new(ctx.test_data.clone().unwrap_or(trigger_data)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn member_data() -> TriggerData {
        TriggerData::new(json!({
            "member": {
                "id": "m-001",
                "points": 150,
                "profile": {"tier": "gold", "tags": ["board", "volunteer"]},
                "nickname": null
            },
            "event": {"type": "check_in"}
        }))
    }

    #[test]
    fn test_get_field() {
        let data = member_data();

        assert_eq!(data.get_field("member.points"), Some(&json!(150)));
        assert_eq!(data.get_field("member.profile.tier"), Some(&json!("gold")));
        assert_eq!(data.get_field("event.type"), Some(&json!("check_in")));
        assert_eq!(data.get_field("member.nickname"), Some(&Value::Null));
    }

    #[test]
    fn test_get_field_absent() {
        let data = member_data();

        assert_eq!(data.get_field("member.missing"), None);
        assert_eq!(data.get_field("nonexistent.path"), None);
        // 中间值不是 object
        assert_eq!(data.get_field("member.points.value"), None);
        // 数组不按下标访问
        assert_eq!(data.get_field("member.profile.tags.0"), None);
        assert_eq!(data.get_field(""), None);
    }

    #[test]
    fn test_get_field_on_non_object_root() {
        let data = TriggerData::new(json!([1, 2, 3]));
        assert_eq!(data.get_field("0"), None);
        assert!(!data.is_object());
    }

    #[test]
    fn test_from_parts_resolves_variant() {
        let ctx = ExecutionContext::from_parts("admin", None, true, Some(json!({"a": 1})));
        assert_eq!(ctx.mode(), ExecutionMode::Test);
        assert_eq!(ctx.user_id(), "admin");

        let ctx = ExecutionContext::from_parts("system", None, false, Some(json!({"a": 1})));
        assert_eq!(ctx.mode(), ExecutionMode::Production);
    }

    #[test]
    fn test_resolve_payload() {
        let real = json!({"member": {"points": 10}});

        let production = ExecutionContext::production("system");
        assert_eq!(production.resolve_payload(real.clone()).data(), &real);

        let test_with_data = ExecutionContext::test("admin", Some(json!({"member": {"points": 99}})));
        assert_eq!(
            test_with_data
                .resolve_payload(real.clone())
                .get_field("member.points"),
            Some(&json!(99))
        );

        let test_without_data = ExecutionContext::test("admin", None);
        assert_eq!(test_without_data.resolve_payload(real.clone()).data(), &real);
    }
}
