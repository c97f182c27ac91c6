use tracing_subscriber::{EnvFilter, fmt};

/// 初始化日志系统
///
/// 日志写到 stderr，stdout 只留给测试报告。
/// RUST_LOG 优先；未设置时 verbose 为 debug，否则为 warn。
///
/// 示例:
/// - RUST_LOG=apicheck=debug apicheck http://localhost:8080 tests.json
pub fn init_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // 重复初始化（例如测试中）直接忽略
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();

    tracing::debug!("Logger initialized");
}
