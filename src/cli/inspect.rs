//! # inspect 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/inspect.rs`

use clap::Args;
use std::path::PathBuf;

/// inspect 子命令参数
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// smarts295.inp.txt, smarts295.ext.txt, smarts295.scn.txt or an exported CSV
    pub file: PathBuf,

    /// Print an input deck as a JSON config
    #[arg(long)]
    pub json: bool,

    /// Number of spectral rows to preview
    #[arg(long, default_value_t = 5)]
    pub rows: usize,
}
