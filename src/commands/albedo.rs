//! # albedo 命令实现
//!
//! 计算指定地表材料的光谱反照率（输出变量 30）。未指定材料时列出材料表。
//!
//! ## 依赖关系
//! - 使用 `cli/albedo.rs` 定义的参数
//! - 使用 `pipeline.rs`, `models/presets.rs`
//! - 使用 `commands/catalog.rs`

use super::{build_smarts, catalog, report};
use crate::cli::albedo::AlbedoArgs;
use crate::cli::GlobalArgs;
use crate::error::Result;
use crate::models::config::{SolarGeometry, SpectralRange};
use crate::models::{Material, SimulationConfig};
use crate::utils::{output, progress};

/// 执行 albedo 命令
pub fn execute(args: AlbedoArgs, global: &GlobalArgs) -> Result<()> {
    let Some(name) = &args.material else {
        output::print_warning("No --material given; available materials:");
        return catalog::list_materials(None);
    };

    output::print_header("SMARTS Spectral Albedo");
    let material = Material::from_name(name)?;
    let config = build_config(&args, material);
    output::print_info(&format!("Material: {} ({})", material, material.description()));

    let smarts = build_smarts(global, &args.exec)?;
    let spinner = progress::create_spinner("Running SMARTS");
    let result = smarts.run(&config);
    spinner.finish_and_clear();
    let result = result?;

    report(
        &result,
        &args.output,
        &format!("Spectral albedo: {}", material),
        "Zonal surface reflectance",
    )
}

fn build_config(args: &AlbedoArgs, material: Material) -> SimulationConfig {
    let range = SpectralRange {
        min: args.min,
        max: args.max,
        ..SpectralRange::default()
    };
    let geometry = SolarGeometry::ZenithAzimuth {
        zenith: args.zenith,
        azimuth: args.azimuth,
    };
    SimulationConfig::albedo_spectrum(material, range, args.interval, geometry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use crate::models::config::Albedo;
    use clap::Parser;

    fn parse(argv: &[&str]) -> AlbedoArgs {
        match Cli::parse_from(argv).command {
            Commands::Albedo(args) => args,
            _ => panic!("expected albedo"),
        }
    }

    #[test]
    fn test_albedo_config_uses_material_and_range() {
        let args = parse(&["rsmarts", "albedo", "--material", "Snow", "--min", "300", "--max", "1700"]);
        let snow = Material::from_name("Snow").unwrap();
        let config = build_config(&args, snow);
        config.validate().unwrap();
        assert_eq!(config.albedo, Albedo::Spectral(snow));
        assert_eq!(config.range.min, 300.0);
        assert_eq!(config.print.window().unwrap().max, 1700.0);
    }

    #[test]
    fn test_interval_reaches_print_window() {
        let args = parse(&["rsmarts", "albedo", "--material", "Gravel", "--interval", "2"]);
        let config = build_config(&args, Material::from_name("Gravel").unwrap());
        assert_eq!(config.print.window().unwrap().interval, 2.0);
    }
}
