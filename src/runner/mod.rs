pub mod executor;
pub mod reporter;
pub mod test_runner;
pub mod types;

pub use executor::{ExecutorOptions, TestExecutor};
pub use reporter::{ReportFormat, TestReporter};
pub use test_runner::TestRunner;
pub use types::{RunReport, TestResult, TestStatus, TestSummary};
