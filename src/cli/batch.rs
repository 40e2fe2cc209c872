//! # batch 子命令 CLI 定义
//!
//! 并行运行多个 JSON 算例。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/batch.rs`

use super::common::ExecArgs;
use clap::Args;
use std::path::PathBuf;

/// batch 子命令参数
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Config file, directory, or glob pattern (e.g. 'cases/*.json')
    pub input: PathBuf,

    /// File name patterns when INPUT is a directory (comma-separated)
    #[arg(long, default_value = "*.json")]
    pub pattern: String,

    /// Search directories recursively
    #[arg(short, long)]
    pub recursive: bool,

    /// Number of parallel jobs (0 = all CPU cores)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// Directory for the per-case CSV files
    #[arg(long, default_value = "smarts_results")]
    pub output_dir: PathBuf,

    /// Skip cases whose CSV already exists
    #[arg(long)]
    pub skip_existing: bool,

    #[command(flatten)]
    pub exec: ExecArgs,
}
