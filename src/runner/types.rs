use serde::{Serialize, Serializer};
use std::fmt;
use std::time::Duration;

use crate::validation::TestFailure;

/// 测试状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TestStatus {
    Passed,
    Failed,
}

impl TestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TestStatus::Passed => "PASSED",
            TestStatus::Failed => "FAILED",
        }
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 单个测试的执行结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestResult {
    /// 测试名称
    pub name: String,

    pub status: TestStatus,

    /// 请求 + 解码 + 校验的耗时
    #[serde(rename = "elapsed_time", serialize_with = "duration_secs")]
    pub elapsed: Duration,

    /// 第一个失败原因，仅 FAILED 时存在
    #[serde(
        rename = "error_msg",
        skip_serializing_if = "Option::is_none",
        serialize_with = "failure_message"
    )]
    pub failure: Option<TestFailure>,
}

impl TestResult {
    pub fn passed(name: impl Into<String>, elapsed: Duration) -> Self {
        Self {
            name: name.into(),
            status: TestStatus::Passed,
            elapsed,
            failure: None,
        }
    }

    pub fn failed(name: impl Into<String>, failure: TestFailure, elapsed: Duration) -> Self {
        Self {
            name: name.into(),
            status: TestStatus::Failed,
            elapsed,
            failure: Some(failure),
        }
    }

    pub fn is_passed(&self) -> bool {
        self.status == TestStatus::Passed
    }

    pub fn error_message(&self) -> Option<String> {
        self.failure.as_ref().map(|f| f.to_string())
    }
}

/// 测试摘要
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestSummary {
    pub passed: usize,
    pub failed: usize,
    pub success_percentage: f64,

    /// 整个循环的墙钟耗时，不一定等于各测试耗时之和
    #[serde(rename = "total_elapsed_time", serialize_with = "duration_secs")]
    pub total_elapsed: Duration,
}

impl TestSummary {
    pub fn new(passed: usize, failed: usize, total_elapsed: Duration) -> Self {
        // 分母至少为 1，空集合得到 0%
        let total = (passed + failed).max(1);
        Self {
            passed,
            failed,
            success_percentage: passed as f64 / total as f64 * 100.0,
            total_elapsed,
        }
    }

    pub fn from_results(results: &[TestResult], total_elapsed: Duration) -> Self {
        let passed = results.iter().filter(|r| r.is_passed()).count();
        Self::new(passed, results.len() - passed, total_elapsed)
    }

    pub fn total(&self) -> usize {
        self.passed + self.failed
    }
}

/// 一次运行的全部输出
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub summary: TestSummary,

    #[serde(rename = "test_results")]
    pub results: Vec<TestResult>,
}

fn duration_secs<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64())
}

fn failure_message<S: Serializer>(
    failure: &Option<TestFailure>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match failure {
        Some(failure) => serializer.serialize_str(&failure.to_string()),
        None => serializer.serialize_none(),
    }
}
