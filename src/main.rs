//! # rsmarts 命令行入口
//!
//! ## 子命令
//! - `run`       - 运行一次模拟
//! - `albedo`    - 地表材料光谱反照率
//! - `batch`     - 并行运行多个 JSON 算例
//! - `deck`      - 生成输入卡片文件
//! - `inspect`   - 查看输入卡片或光谱输出
//! - `materials` - 列出地表材料
//! - `outputs`   - 列出输出变量

use clap::Parser;
use rsmarts::cli::Cli;
use rsmarts::{commands, utils};
use tracing_subscriber::EnvFilter;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    let default_filter = if cli.global.verbose {
        "rsmarts=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = commands::run(cli) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
