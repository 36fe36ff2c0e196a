use anyhow::Result;
use clap::Parser;

use exam_eval::cli::Cli;
use exam_eval::config::Config;
use exam_eval::orchestrator::App;
use exam_eval::utils::logging;

#[tokio::main]
async fn main() -> Result<()> {
    // 解析命令行
    let cli = Cli::parse();

    // 初始化日志
    logging::init(cli.verbose);

    // 加载配置（凭证缺失在此致命中止）
    let mut config = Config::from_env()?;
    cli.apply(&mut config);

    // 初始化并运行应用
    let _report_path = App::initialize(config)?.run().await?;

    Ok(())
}
