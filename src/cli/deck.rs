//! # deck 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/deck.rs`

use clap::Args;
use std::path::PathBuf;

/// deck 子命令参数
#[derive(Args, Debug)]
pub struct DeckArgs {
    /// JSON simulation config
    pub config: PathBuf,

    /// Write the deck to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
