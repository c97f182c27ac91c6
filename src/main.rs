mod cli;

use clap::Parser;
use cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // 初始化日志系统
    apicheck::logger::init_logger(cli.verbose);

    // 加载或参数错误：一行诊断信息，退出码 1；单个测试失败不影响退出码
    if let Err(e) = cli::run(cli).await {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
