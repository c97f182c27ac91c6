use std::fs::File;
use std::io::{self, BufWriter, IsTerminal};
use std::path::PathBuf;

use apicheck::config::{ConfigLoader, RunConfig};
use apicheck::runner::{ReportFormat, TestReporter, TestRunner};
use apicheck::{ApicheckError, suite};
use clap::Parser;

pub type Result<T> = std::result::Result<T, anyhow::Error>;

/// 测试文件缺省名
const TEST_FILE_NAME: &str = "tests.json";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// API 的 base URL，每个测试的 endpoint 直接拼接在其后
    pub api_base_url: String,

    /// 包含测试 JSON 数组的文件
    #[arg(default_value = TEST_FILE_NAME)]
    pub test_file_name: PathBuf,

    /// 输出格式
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,

    /// 把报告写到文件而不是 stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 配置文件路径（默认查找 apicheck.toml）
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 请求超时（秒）
    #[arg(long)]
    pub timeout: Option<u64>,

    /// 并发执行的测试数量，默认顺序执行
    #[arg(short = 'j', long)]
    pub concurrency: Option<usize>,

    /// "float" 不再接受整数
    #[arg(long)]
    pub strict_float: bool,

    /// 非 2xx 响应也进行解码和校验
    #[arg(long)]
    pub accept_error_status: bool,

    /// 输出调试日志
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// 命令行中显式给出的设置
    fn overrides(&self) -> RunConfig {
        RunConfig {
            format: self.format,
            timeout_secs: self.timeout,
            concurrency: self.concurrency,
            strict_float: self.strict_float.then_some(true),
            accept_error_status: self.accept_error_status.then_some(true),
        }
    }
}

pub async fn run(cli: Cli) -> Result<()> {
    // 在任何网络请求之前检查 base URL
    url::Url::parse(&cli.api_base_url)
        .map_err(|_| ApicheckError::InvalidBaseUrl(cli.api_base_url.clone()))?;

    let settings = ConfigLoader::load(cli.config.as_deref())?
        .merge(cli.overrides())
        .resolve();

    let cases = suite::load_file(&cli.test_file_name)?;

    let runner = TestRunner::from_settings(&settings)?;
    let report = runner.run(&cli.api_base_url, &cases).await;

    match &cli.output {
        Some(path) => {
            let file = File::create(path)?;
            TestReporter::new(settings.format).write_to(&report, BufWriter::new(file))?;
        }
        None => {
            let stdout = io::stdout();
            let color = stdout.is_terminal();
            TestReporter::new(settings.format)
                .with_color(color)
                .write_to(&report, stdout.lock())?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_positional_args() {
        let cli = Cli::parse_from(["apicheck", "http://localhost:8080", "suite.json"]);
        assert_eq!(cli.api_base_url, "http://localhost:8080");
        assert_eq!(cli.test_file_name, PathBuf::from("suite.json"));
        assert_eq!(cli.format, None);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_default_test_file() {
        let cli = Cli::parse_from(["apicheck", "http://localhost:8080"]);
        assert_eq!(cli.test_file_name, PathBuf::from(TEST_FILE_NAME));
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::parse_from([
            "apicheck",
            "-f",
            "text",
            "--timeout",
            "3",
            "-j",
            "4",
            "--strict-float",
            "http://localhost:8080",
            "suite.json",
        ]);
        let overrides = cli.overrides();
        assert_eq!(overrides.format, Some(ReportFormat::Text));
        assert_eq!(overrides.timeout_secs, Some(3));
        assert_eq!(overrides.concurrency, Some(4));
        assert_eq!(overrides.strict_float, Some(true));
        assert_eq!(overrides.accept_error_status, None);
    }

    #[test]
    fn test_rejects_unknown_format() {
        let result = Cli::try_parse_from(["apicheck", "--format", "xml", "http://localhost"]);
        assert!(result.is_err());
    }
}
