use serde::Deserialize;
use serde_json::{Map, Value};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

use crate::suite::types::TestCase;
use crate::{ApicheckError, Result};

/// 测试文件中的一条原始记录
///
/// 必填字段先读成 Option，缺失时给出指明字段名的错误。
#[derive(Debug, Deserialize)]
struct RawTestCase {
    name: Option<String>,

    /// 旧文档里叫 url
    #[serde(alias = "url")]
    endpoint: Option<String>,

    method: Option<String>,

    payload: Option<Value>,

    #[serde(default)]
    expected_response_values: Option<Map<String, Value>>,

    #[serde(default)]
    expected_response_types: Option<Map<String, Value>>,
}

/// 测试文件加载器
pub struct SuiteLoader;

impl SuiteLoader {
    /// 从文件加载所有测试用例
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Vec<TestCase>> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ApicheckError::FileNotFound(path.to_path_buf()),
            _ => ApicheckError::Io(e),
        })?;

        let root: Value =
            serde_json::from_str(&content).map_err(|e| ApicheckError::InvalidJson {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let entries = match root {
            Value::Array(entries) => entries,
            _ => return Err(ApicheckError::NotAnArray(path.to_path_buf())),
        };

        let cases = Self::from_entries(entries)?;
        debug!("Loaded {} tests from {}", cases.len(), path.display());
        Ok(cases)
    }

    /// 从字符串内容加载
    pub fn load_str(content: &str) -> Result<Vec<TestCase>> {
        match serde_json::from_str::<Value>(content)? {
            Value::Array(entries) => Self::from_entries(entries),
            _ => Err(ApicheckError::NotAnArray("<inline>".into())),
        }
    }

    /// 把 JSON 数组中的每个元素转换为 TestCase，序号从 1 开始
    fn from_entries(entries: Vec<Value>) -> Result<Vec<TestCase>> {
        entries
            .into_iter()
            .enumerate()
            .map(|(i, entry)| Self::convert(i + 1, entry))
            .collect()
    }

    fn convert(index: usize, entry: Value) -> Result<TestCase> {
        if !entry.is_object() {
            return Err(ApicheckError::InvalidTest {
                index,
                reason: "Each test must be a JSON object.".to_string(),
            });
        }

        let raw: RawTestCase =
            serde_json::from_value(entry).map_err(|e| ApicheckError::InvalidTest {
                index,
                reason: e.to_string(),
            })?;

        let missing = |key: &str| ApicheckError::MissingKey {
            index,
            key: key.to_string(),
        };

        let name = raw.name.ok_or_else(|| missing("name"))?;
        let endpoint = raw.endpoint.ok_or_else(|| missing("endpoint"))?;
        let method = raw.method.ok_or_else(|| missing("method"))?;

        if name.trim().is_empty() {
            return Err(ApicheckError::InvalidTest {
                index,
                reason: "'name' must not be empty.".to_string(),
            });
        }

        let case = TestCase {
            name,
            endpoint,
            method,
            payload: raw.payload,
            expected_values: raw.expected_response_values.unwrap_or_default(),
            expected_types: raw.expected_response_types.unwrap_or_default(),
        };
        if !case.has_expectations() {
            debug!("Test #{} '{}' has no expectations", index, case.name);
        }
        Ok(case)
    }
}
