use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::info;

use crate::Result;
use crate::config::RunSettings;
use crate::http::Client;
use crate::runner::executor::TestExecutor;
use crate::runner::types::{RunReport, TestResult, TestSummary};
use crate::suite::TestCase;
use crate::validation::TestFailure;

/// 按顺序执行一组测试并汇总
pub struct TestRunner {
    executor: Arc<TestExecutor>,
    concurrency: usize,
}

impl TestRunner {
    pub fn new(executor: TestExecutor) -> Self {
        Self {
            executor: Arc::new(executor),
            concurrency: 1,
        }
    }

    /// 按合并后的设置构建 HTTP 客户端和执行器
    pub fn from_settings(settings: &RunSettings) -> Result<Self> {
        let client = Client::with_timeout(settings.timeout)?;
        let executor = TestExecutor::new(client).with_options(settings.executor);
        Ok(Self::new(executor).with_concurrency(settings.concurrency))
    }

    /// 大于 1 时启用有界并发，结果顺序仍与输入一致
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// 执行所有测试，单个测试失败不会中止后续测试
    pub async fn run(&self, base_url: &str, cases: &[TestCase]) -> RunReport {
        info!("Running {} tests against {}", cases.len(), base_url);

        let clock = self.executor.clock();
        let start = clock.now();

        let results = if self.concurrency > 1 {
            self.run_concurrent(base_url, cases).await
        } else {
            self.run_sequential(base_url, cases).await
        };

        let summary = TestSummary::from_results(&results, clock.elapsed_since(start));
        info!(
            "Finished: {} passed, {} failed ({:.2}%)",
            summary.passed, summary.failed, summary.success_percentage
        );

        RunReport { summary, results }
    }

    async fn run_sequential(&self, base_url: &str, cases: &[TestCase]) -> Vec<TestResult> {
        let mut results = Vec::with_capacity(cases.len());
        for case in cases {
            results.push(self.executor.execute(case, base_url).await);
        }
        results
    }

    async fn run_concurrent(&self, base_url: &str, cases: &[TestCase]) -> Vec<TestResult> {
        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let base_url: Arc<str> = Arc::from(base_url);

        let mut handles = Vec::with_capacity(cases.len());
        for case in cases {
            let semaphore = Arc::clone(&semaphore);
            let executor = Arc::clone(&self.executor);
            let base_url = Arc::clone(&base_url);
            let case = case.clone();

            handles.push(tokio::spawn(async move {
                // semaphore 不会被关闭，acquire 失败时直接执行
                let _permit = semaphore.acquire_owned().await.ok();
                executor.execute(&case, &base_url).await
            }));
        }

        // 按提交顺序收集，保证输出顺序确定
        let mut results = Vec::with_capacity(handles.len());
        for (handle, case) in handles.into_iter().zip(cases) {
            let result = match handle.await {
                Ok(result) => result,
                Err(e) => TestResult::failed(
                    &case.name,
                    TestFailure::Aborted(e.to_string()),
                    Default::default(),
                ),
            };
            results.push(result);
        }
        results
    }
}
