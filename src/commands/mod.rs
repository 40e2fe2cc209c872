//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `pipeline.rs`, `parsers/`, `models/`, `utils/`
//! - 子模块: run, albedo, batch, deck, inspect, catalog

pub mod albedo;
pub mod batch;
pub mod catalog;
pub mod deck;
pub mod inspect;
pub mod run;

use crate::cli::common::{ExecArgs, OutputArgs};
use crate::cli::{Cli, Commands, GlobalArgs};
use crate::error::{Result, SmartsError};
use crate::models::SimulationConfig;
use crate::pipeline::{SimulationOutput, Smarts};
use crate::process::{ProcessRunner, SmartsInstall};
use crate::utils::{export, output, plot, table};

use std::fs;
use std::path::Path;
use std::time::Duration;

/// 执行命令
pub fn run(cli: Cli) -> Result<()> {
    let global = cli.global;
    match cli.command {
        Commands::Run(args) => run::execute(args, &global),
        Commands::Albedo(args) => albedo::execute(args, &global),
        Commands::Batch(args) => batch::execute(args, &global),
        Commands::Deck(args) => deck::execute(args),
        Commands::Inspect(args) => inspect::execute(args),
        Commands::Materials(args) => catalog::list_materials(args.filter.as_deref()),
        Commands::Outputs => catalog::list_outputs(),
    }
}

// ─────────────────────────────────────────────────────────────
// 共享辅助函数
// ─────────────────────────────────────────────────────────────

/// 由全局参数和执行参数构造 SMARTS 调用入口
pub(crate) fn build_smarts(global: &GlobalArgs, exec: &ExecArgs) -> Result<Smarts> {
    let install = SmartsInstall::from_env_value(global.smarts_path.clone().map(Into::into))?;
    output::print_info(&format!("SMARTS executable: {}", install.executable.display()));

    let runner = ProcessRunner::new().with_timeout(parse_timeout(exec.timeout)?);
    Ok(Smarts::new(install)
        .with_runner(runner)
        .keep_outputs(exec.keep_files.clone()))
}

fn parse_timeout(seconds: Option<f64>) -> Result<Option<Duration>> {
    match seconds {
        None => Ok(None),
        Some(s) if s.is_finite() && s > 0.0 => Ok(Some(Duration::from_secs_f64(s))),
        Some(s) => Err(SmartsError::InvalidArgument(format!(
            "--timeout must be a positive number of seconds, got {}",
            s
        ))),
    }
}

/// 读取 JSON 模拟配置
pub(crate) fn load_config(path: &Path) -> Result<SimulationConfig> {
    let text = fs::read_to_string(path).map_err(|e| SmartsError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    serde_json::from_str(&text).map_err(|e| SmartsError::JsonError {
        path: path.display().to_string(),
        source: e,
    })
}

/// 打印汇总并按参数导出 CSV / 图表
pub(crate) fn report(
    result: &SimulationOutput,
    args: &OutputArgs,
    default_title: &str,
    y_label: &str,
) -> Result<()> {
    let spectrum = &result.spectrum;
    if let Some((lo, hi)) = spectrum.wavelength_range() {
        output::print_success(&format!(
            "{} spectral rows, {:.1}-{:.1} nm, {:.2} s",
            spectrum.len(),
            lo,
            hi,
            result.elapsed.as_secs_f64()
        ));
    }
    println!("{}", table::spectrum_summary(spectrum));

    if let Some(scan) = &result.scan {
        output::print_info(&format!("Scanned (smoothed) spectrum: {} rows", scan.len()));
    }
    output::print_kept(&result.kept);

    if let Some(csv_path) = &args.output {
        export::spectrum_to_csv(spectrum, csv_path)?;
        output::print_written("CSV", csv_path);
    }

    if let Some(plot_path) = &args.plot {
        let options = plot::PlotOptions {
            title: args.title.clone().unwrap_or_else(|| default_title.to_string()),
            y_label: y_label.to_string(),
            width: args.width,
            height: args.height,
        };
        plot::plot_spectrum(spectrum, plot_path, &options)?;
        output::print_written("plot", plot_path);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timeout() {
        assert_eq!(parse_timeout(None).unwrap(), None);
        assert_eq!(
            parse_timeout(Some(2.5)).unwrap(),
            Some(Duration::from_millis(2500))
        );
        assert!(parse_timeout(Some(0.0)).is_err());
        assert!(parse_timeout(Some(f64::NAN)).is_err());
    }

    #[test]
    fn test_load_config_reports_json_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("case.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            load_config(&path),
            Err(SmartsError::JsonError { .. })
        ));
    }

    #[test]
    fn test_load_config_reads_serialized_preset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("case.json");
        let config = SimulationConfig::air_mass(
            vec![crate::models::OutputVariable::GLOBAL_TILTED],
            1.5,
            crate::models::Material::LIGHT_SOIL,
        );
        fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();
        assert_eq!(load_config(&path).unwrap(), config);
    }
}
