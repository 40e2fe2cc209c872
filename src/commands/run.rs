//! # run 命令实现
//!
//! 运行一次 SMARTS 模拟并汇总结果。
//!
//! ## 依赖关系
//! - 使用 `cli/run.rs` 定义的参数
//! - 使用 `pipeline.rs`, `models/presets.rs`
//! - 使用 `utils/output.rs`, `utils/progress.rs`

use super::{build_smarts, load_config, report};
use crate::cli::run::RunArgs;
use crate::cli::GlobalArgs;
use crate::error::{Result, SmartsError};
use crate::models::config::Comment;
use crate::models::{Material, OutputVariable, SimulationConfig};
use crate::utils::{output, progress};

/// 执行 run 命令
pub fn execute(args: RunArgs, global: &GlobalArgs) -> Result<()> {
    output::print_header("SMARTS Spectral Simulation");

    let config = build_config(&args)?;
    let smarts = build_smarts(global, &args.exec)?;

    let spinner = progress::create_spinner("Running SMARTS");
    let result = smarts.run(&config);
    spinner.finish_and_clear();
    let result = result?;

    report(
        &result,
        &args.output,
        config.comment.as_str(),
        "Spectral irradiance (W m⁻² nm⁻¹)",
    )
}

/// 按参数选择 JSON 配置或预设
fn build_config(args: &RunArgs) -> Result<SimulationConfig> {
    let mut config = if let Some(path) = &args.config {
        output::print_info(&format!("Config: {}", path.display()));
        load_config(path)?
    } else {
        let outputs = OutputVariable::parse_list(&args.outputs)?;
        if let Some(amass) = args.air_mass {
            let material = Material::from_name(&args.material)?;
            SimulationConfig::air_mass(outputs, amass, material)
        } else {
            let missing = |name: &str| SmartsError::InvalidArgument(format!("--{} is required", name));
            SimulationConfig::time_location(
                outputs,
                args.year.ok_or_else(|| missing("year"))?,
                args.month.ok_or_else(|| missing("month"))?,
                args.day.ok_or_else(|| missing("day"))?,
                args.hour.ok_or_else(|| missing("hour"))?,
                args.latitude.ok_or_else(|| missing("latitude"))?,
                args.longitude.ok_or_else(|| missing("longitude"))?,
                args.altitude,
                args.zone.ok_or_else(|| missing("zone"))?,
            )
        }
    };

    if let Some(comment) = &args.comment {
        config.comment = Comment::new(comment);
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use crate::models::config::SolarGeometry;
    use clap::Parser;

    fn parse(argv: &[&str]) -> RunArgs {
        match Cli::parse_from(argv).command {
            Commands::Run(args) => args,
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_time_location_from_flags() {
        let args = parse(&[
            "rsmarts", "run", "--year", "2001", "--month", "6", "--day", "21", "--hour", "12",
            "--latitude", "32", "--longitude", "-110.92", "--altitude", "0.805", "--zone", "-7",
            "--outputs", "2,3", "--comment", "Tucson noon",
        ]);
        let config = build_config(&args).unwrap();
        assert_eq!(config.comment.as_str(), "Tucson_noon");
        assert_eq!(
            config.print.spreadsheet_outputs().unwrap(),
            &[OutputVariable(2), OutputVariable(3)]
        );
        assert!(matches!(
            config.geometry,
            SolarGeometry::DateTime { year: 2001, month: 6, .. }
        ));
    }

    #[test]
    fn test_air_mass_from_flags() {
        let args = parse(&["rsmarts", "run", "--air-mass", "1.5", "--material", "Snow"]);
        let config = build_config(&args).unwrap();
        assert_eq!(config.geometry, SolarGeometry::AirMass { amass: 1.5 });
    }

    #[test]
    fn test_date_flags_required_without_config() {
        assert!(Cli::try_parse_from(["rsmarts", "run", "--year", "2001"]).is_err());
    }
}
