//! # albedo 子命令 CLI 定义
//!
//! 指定地表材料的光谱反照率（输出变量 30）。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/albedo.rs`

use super::common::{ExecArgs, OutputArgs};
use clap::Args;

/// albedo 子命令参数
#[derive(Args, Debug)]
pub struct AlbedoArgs {
    /// Ground material name (omit to list the available materials)
    #[arg(long)]
    pub material: Option<String>,

    /// Minimum wavelength in nm
    #[arg(long, default_value_t = 280.0)]
    pub min: f64,

    /// Maximum wavelength in nm
    #[arg(long, default_value_t = 4000.0)]
    pub max: f64,

    /// Output wavelength interval in nm
    #[arg(long, default_value_t = 0.5)]
    pub interval: f64,

    /// Solar zenith angle in degrees
    #[arg(long, default_value_t = 0.0)]
    pub zenith: f64,

    /// Solar azimuth in degrees from north
    #[arg(long, default_value_t = 180.0)]
    pub azimuth: f64,

    #[command(flatten)]
    pub exec: ExecArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}
