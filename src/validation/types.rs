use serde_json::Value;

/// 单个测试失败的原因
///
/// `Display` 的结果就是写进报告的错误消息。
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TestFailure {
    #[error("Expected key '{0}' not found.")]
    MissingKey(String),

    #[error("Expected value '{}' at key '{key}' but got '{}'.", display_value(.expected), display_value(.actual))]
    ValueMismatch {
        key: String,
        expected: Value,
        actual: Value,
    },

    #[error("Invalid type at key '{key}'. Expected '{expected}' got '{actual}'.")]
    TypeMismatch {
        key: String,
        expected: String,
        actual: String,
    },

    #[error("Malformed test. {0}")]
    MalformedTest(String),

    #[error("Could not decode JSON from response.")]
    DecodeError,

    #[error("Request failed: {0}")]
    NetworkError(String),

    #[error("Test aborted: {0}")]
    Aborted(String),
}

impl TestFailure {
    /// 配置错误（用例本身写错了），区别于响应不符合期望
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Self::MalformedTest(_))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingKey(_) => "missing_key",
            Self::ValueMismatch { .. } => "value_mismatch",
            Self::TypeMismatch { .. } => "type_mismatch",
            Self::MalformedTest(_) => "malformed_test",
            Self::DecodeError => "decode_error",
            Self::NetworkError(_) => "network_error",
            Self::Aborted(_) => "aborted",
        }
    }
}

/// 校验开关
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationOptions {
    /// 为 true 时 "float" 只接受带小数部分或指数的数字
    pub strict_float: bool,
}

/// 字符串不加引号，其余按紧凑 JSON 输出
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// JSON 值的类型名
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::String(_) => "string",
        Value::Number(n) if n.is_i64() || n.is_u64() => "int",
        Value::Number(_) => "float",
        Value::Bool(_) => "bool",
        Value::Null => "null",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
