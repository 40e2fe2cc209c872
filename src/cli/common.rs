//! # 共享参数
//!
//! 多个子命令共用的执行与输出参数。
//!
//! ## 依赖关系
//! - 被 `cli/run.rs`, `cli/albedo.rs`, `cli/batch.rs` 使用

use clap::Args;
use std::path::PathBuf;

/// SMARTS 进程参数
#[derive(Args, Debug, Clone)]
pub struct ExecArgs {
    /// Kill SMARTS after this many seconds
    #[arg(long)]
    pub timeout: Option<f64>,

    /// Copy the SMARTS input and output files under DIR, one subdirectory per run
    #[arg(long, value_name = "DIR")]
    pub keep_files: Option<PathBuf>,
}

/// 结果导出参数
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Write the spectrum to this CSV file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Plot the spectrum to this file (.png or .svg)
    #[arg(long)]
    pub plot: Option<PathBuf>,

    /// Plot title
    #[arg(long)]
    pub title: Option<String>,

    /// Plot width in pixels
    #[arg(long, default_value_t = 1200)]
    pub width: u32,

    /// Plot height in pixels
    #[arg(long, default_value_t = 800)]
    pub height: u32,
}
