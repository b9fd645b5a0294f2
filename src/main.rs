use clap::Parser;
use colored::Colorize;

use pixel_pioneers::{cli::Cli, handler::run};

/// 程序的主入口点
///
/// 负责解析命令行参数、初始化日志，然后把整份配置交给 `run` 批量处理。
/// 任意一张图像失败时以错误状态退出，但其余图像仍会被处理。
fn main() -> anyhow::Result<()> {
    // 解析命令行参数，整次运行只构造这一次
    let cli = Cli::parse();

    simple_logger::init_with_level(cli.log_level())?;

    let report = run(cli)?;

    anyhow::ensure!(
        report.failed.is_empty(),
        "{} of {} image(s) could not be processed.",
        report.failed.len().to_string().red().bold(),
        report.total().to_string().green().bold()
    );
    Ok(())
}
