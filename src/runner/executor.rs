use std::sync::Arc;

use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::http::{Client, Method, Request};
use crate::runner::types::TestResult;
use crate::suite::TestCase;
use crate::validation::{self, TestFailure, ValidationOptions};

/// 执行选项
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecutorOptions {
    pub validation: ValidationOptions,

    /// 为 true 时非 2xx 响应照常解码校验，否则直接判为失败
    pub accept_error_status: bool,
}

pub struct TestExecutor {
    client: Client,
    clock: Arc<dyn Clock>,
    options: ExecutorOptions,
}

impl TestExecutor {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            clock: Arc::new(SystemClock::new()),
            options: ExecutorOptions::default(),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_options(mut self, options: ExecutorOptions) -> Self {
        self.options = options;
        self
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.clock)
    }

    /// 执行单个测试用例
    ///
    /// 任何阶段的失败都转换为 FAILED 结果，不会向上传播。
    pub async fn execute(&self, case: &TestCase, base_url: &str) -> TestResult {
        let start = self.clock.now();
        let outcome = self.run_case(case, base_url).await;
        let elapsed = self.clock.elapsed_since(start);

        match outcome {
            Ok(()) => {
                debug!("PASSED {} ({}ms)", case.name, elapsed.as_millis());
                TestResult::passed(&case.name, elapsed)
            }
            Err(failure) => {
                if failure.is_configuration_error() {
                    warn!("Test '{}' is malformed: {}", case.name, failure);
                } else {
                    debug!(kind = failure.kind(), "FAILED {}: {}", case.name, failure);
                }
                TestResult::failed(&case.name, failure, elapsed)
            }
        }
    }

    async fn run_case(&self, case: &TestCase, base_url: &str) -> Result<(), TestFailure> {
        // 不支持的方法在发请求之前失败
        let method = Method::parse(&case.method)?;
        let mut request = Request::new(method, &case.url(base_url))?;

        match (method, &case.payload) {
            (Method::Post, Some(payload)) => request = request.with_json(payload)?,
            (Method::Get, Some(_)) => {
                warn!("Test '{}': payload ignored for GET request", case.name)
            }
            _ => {}
        }

        let response = self.client.execute(request).await?;

        if !response.is_success() && !self.options.accept_error_status {
            return Err(TestFailure::NetworkError(format!(
                "HTTP status {}",
                response.status
            )));
        }

        let body = response.json()?;

        validation::validate(
            &body,
            &case.expected_values,
            &case.expected_types,
            self.options.validation,
        )
    }
}
