//! # run 子命令 CLI 定义
//!
//! 单次模拟：从 JSON 配置读取，或使用时间/地点、大气质量预设。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/run.rs`

use super::common::{ExecArgs, OutputArgs};
use clap::Args;
use std::path::PathBuf;

/// run 子命令参数
#[derive(Args, Debug)]
pub struct RunArgs {
    /// JSON simulation config (overrides the preset options)
    #[arg(long, conflicts_with = "air_mass")]
    pub config: Option<PathBuf>,

    /// Use the air-mass preset with this relative air mass instead of a date
    #[arg(long)]
    pub air_mass: Option<f64>,

    /// Output variable codes, space or comma separated (see `rsmarts outputs`)
    #[arg(long, default_value = "2 3 4")]
    pub outputs: String,

    /// Year
    #[arg(long, required_unless_present_any = ["config", "air_mass"])]
    pub year: Option<i32>,

    /// Month (1-12)
    #[arg(long, required_unless_present_any = ["config", "air_mass"])]
    pub month: Option<u32>,

    /// Day of month
    #[arg(long, required_unless_present_any = ["config", "air_mass"])]
    pub day: Option<u32>,

    /// Local standard time in decimal hours
    #[arg(long, required_unless_present_any = ["config", "air_mass"])]
    pub hour: Option<f64>,

    /// Site latitude in degrees (north positive)
    #[arg(long, allow_hyphen_values = true, required_unless_present_any = ["config", "air_mass"])]
    pub latitude: Option<f64>,

    /// Site longitude in degrees (east positive)
    #[arg(long, allow_hyphen_values = true, required_unless_present_any = ["config", "air_mass"])]
    pub longitude: Option<f64>,

    /// Site altitude in km
    #[arg(long, default_value_t = 0.0)]
    pub altitude: f64,

    /// Time zone in hours from UTC (east positive)
    #[arg(long, allow_hyphen_values = true, required_unless_present_any = ["config", "air_mass"])]
    pub zone: Option<f64>,

    /// Ground material for the air-mass preset
    #[arg(long, default_value = "LiteSoil")]
    pub material: String,

    /// Comment written to card 1
    #[arg(long)]
    pub comment: Option<String>,

    #[command(flatten)]
    pub exec: ExecArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}
