use serde_json::{Map, Value};
use std::fmt;

use crate::validation::TestFailure;

/// 单个测试用例
///
/// 从测试文件加载后不再修改。`method` 保留原始字符串，
/// 不支持的方法在执行时作为该用例的失败报告，而不是加载错误。
#[derive(Debug, Clone, PartialEq)]
pub struct TestCase {
    /// 测试名称（非空）
    pub name: String,

    /// 追加到 base URL 之后的路径
    pub endpoint: String,

    /// HTTP 方法原文，大小写不敏感
    pub method: String,

    /// POST 请求体（可选）
    pub payload: Option<Value>,

    /// 期望的字段值，保持声明顺序
    pub expected_values: Map<String, Value>,

    /// 期望的字段类型标签，保持声明顺序
    pub expected_types: Map<String, Value>,
}

impl TestCase {
    pub fn new(
        name: impl Into<String>,
        endpoint: impl Into<String>,
        method: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            endpoint: endpoint.into(),
            method: method.into(),
            payload: None,
            expected_values: Map::new(),
            expected_types: Map::new(),
        }
    }

    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn expect_value(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.expected_values.insert(key.into(), value.into());
        self
    }

    pub fn expect_type(mut self, key: impl Into<String>, tag: impl Into<String>) -> Self {
        self.expected_types
            .insert(key.into(), Value::String(tag.into()));
        self
    }

    /// 请求地址：base URL 与 endpoint 直接拼接，不做斜杠处理
    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url, self.endpoint)
    }

    /// 没有任何期望的用例只要请求和解码成功就会通过
    pub fn has_expectations(&self) -> bool {
        !self.expected_values.is_empty() || !self.expected_types.is_empty()
    }
}

/// 期望类型标签
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedType {
    String,
    Int,
    Float,
}

impl ExpectedType {
    /// 解析类型标签，未知标签属于用例配置错误
    pub fn parse(tag: &Value) -> Result<Self, TestFailure> {
        match tag.as_str() {
            Some("string") => Ok(Self::String),
            Some("int") => Ok(Self::Int),
            Some("float") => Ok(Self::Float),
            _ => Err(TestFailure::MalformedTest(
                "Expected types allowed: 'string', 'int', 'float'".to_string(),
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Float => "float",
        }
    }
}

impl fmt::Display for ExpectedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_url_is_plain_concatenation() {
        let case = TestCase::new("t", "/posts/1", "GET");
        assert_eq!(case.url("http://x.test"), "http://x.test/posts/1");
        assert_eq!(case.url("http://x.test/"), "http://x.test//posts/1");
    }

    #[test]
    fn test_expected_type_parse() {
        assert_eq!(
            ExpectedType::parse(&json!("string")).unwrap(),
            ExpectedType::String
        );
        assert_eq!(ExpectedType::parse(&json!("int")).unwrap(), ExpectedType::Int);
        assert_eq!(
            ExpectedType::parse(&json!("float")).unwrap(),
            ExpectedType::Float
        );
    }

    #[test]
    fn test_expected_type_unknown_tag() {
        for tag in [json!("str"), json!("INT"), json!(1), json!(null)] {
            assert!(matches!(
                ExpectedType::parse(&tag),
                Err(TestFailure::MalformedTest(_))
            ));
        }
    }

    #[test]
    fn test_builder_keeps_declaration_order() {
        let case = TestCase::new("t", "/", "GET")
            .expect_value("z", 1)
            .expect_value("a", 2)
            .expect_type("m", "int");
        let keys: Vec<_> = case.expected_values.keys().cloned().collect();
        assert_eq!(keys, vec!["z", "a"]);
        assert!(case.has_expectations());
        assert!(!TestCase::new("t", "/", "GET").has_expectations());
    }
}
