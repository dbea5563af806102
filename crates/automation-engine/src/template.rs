//! 动作配置模板渲染
//!
//! 支持在字符串配置中使用 `{{member.name}}` 形式的占位符，从触发数据中取值替换。
//!
//! ```ignore
//! let data = TriggerData::new(json!({"member": {"name": "张三"}}));
//! let rendered = TemplateRenderer::render("欢迎 {{member.name}} 入会！", &data);
//! // 输出: "欢迎 张三 入会！"
//! ```

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::Value;
use tracing::warn;

use crate::context::TriggerData;

/// 匹配 {{path}}，路径支持字母、数字、下划线、连字符和点号
static VARIABLE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([\w.\-]+)\s*\}\}").expect("template variable regex is valid")
});

/// 模板渲染器
pub struct TemplateRenderer;

impl TemplateRenderer {
    /// 渲染模板
    ///
    /// 字符串原样替换，其他标量使用 JSON 文本；路径不存在时替换为空字符串。
    pub fn render(template: &str, data: &TriggerData) -> String {
        if !template.contains("{{") {
            return template.to_string();
        }

        VARIABLE_REGEX
            .replace_all(template, |caps: &Captures| {
                let path = &caps[1];
                match data.get_field(path) {
                    Some(Value::String(s)) => s.clone(),
                    Some(Value::Null) | None => {
                        warn!(path = %path, "模板变量未找到，替换为空字符串");
                        String::new()
                    }
                    Some(other) => other.to_string(),
                }
            })
            .into_owned()
    }

    /// 检查模板中是否包含变量
    pub fn has_variables(template: &str) -> bool {
        VARIABLE_REGEX.is_match(template)
    }
}
