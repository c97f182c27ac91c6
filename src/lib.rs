//! apicheck - 声明式 JSON API 测试工具
//!
//! 从 JSON 文件加载测试用例，依次请求 `base_url + endpoint`，
//! 按期望值和期望类型校验响应，并输出 JSON 或文本报告。

pub mod clock;
pub mod config;
pub mod error;
pub mod http;
pub mod logger;
pub mod runner;
pub mod suite;
pub mod validation;

// Re-export commonly used types
pub use error::{ApicheckError, Result};
pub use runner::{RunReport, TestExecutor, TestResult, TestRunner, TestStatus, TestSummary};
pub use suite::TestCase;
pub use validation::TestFailure;
