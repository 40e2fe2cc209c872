//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `run`: 运行一次模拟（JSON 配置或预设参数）
//! - `albedo`: 地表材料光谱反照率
//! - `batch`: 并行运行多个 JSON 算例
//! - `deck`: 只生成输入卡片文件
//! - `inspect`: 查看已有的输入或输出文件
//! - `materials` / `outputs`: 列出材料与输出变量表
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: common, run, albedo, batch, deck, inspect

pub mod albedo;
pub mod batch;
pub mod common;
pub mod deck;
pub mod inspect;
pub mod run;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// rsmarts - SMARTS 太阳光谱辐射传输模型调用工具
#[derive(Parser)]
#[command(name = "rsmarts")]
#[command(version)]
#[command(about = "Run the SMARTS 2.9.5 solar spectral irradiance model", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// 全局参数
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// SMARTS install directory or executable
    #[arg(long, env = "SMARTSPATH", global = true)]
    pub smarts_path: Option<PathBuf>,

    /// Print debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Run one simulation from a JSON config or the time/location preset
    Run(run::RunArgs),

    /// Compute the spectral albedo of a ground material
    Albedo(albedo::AlbedoArgs),

    /// Run many JSON configs in parallel
    Batch(batch::BatchArgs),

    /// Write the SMARTS input card deck for a config without running it
    Deck(deck::DeckArgs),

    /// Summarize an input deck, spreadsheet output or exported CSV
    Inspect(inspect::InspectArgs),

    /// List the ground materials usable as albedo
    Materials(MaterialsArgs),

    /// List the spreadsheet output variables (IOUT codes)
    Outputs,
}

/// materials 子命令参数
#[derive(Args, Debug)]
pub struct MaterialsArgs {
    /// Only show materials whose name or description contains this text
    #[arg(long)]
    pub filter: Option<String>,
}
