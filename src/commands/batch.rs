//! # batch 命令实现
//!
//! 并行运行一组 JSON 算例，每个算例导出一个 CSV。
//!
//! ## 功能
//! - 支持单文件、目录和 glob 输入
//! - 并行运行（rayon），每个算例独立工作目录
//! - 可跳过已有结果
//! - 逐算例汇总表与失败列表
//!
//! ## 依赖关系
//! - 使用 `cli/batch.rs` 定义的参数
//! - 使用 `batch/` 模块进行批量处理
//! - 使用 `pipeline.rs`, `utils/export.rs`

use super::{build_smarts, load_config};
use crate::batch::{BatchRunner, CaseOutcome, FileCollector};
use crate::cli::batch::BatchArgs;
use crate::cli::GlobalArgs;
use crate::error::{Result, SmartsError};
use crate::pipeline::Smarts;
use crate::utils::{export, output, table};

use std::fs;
use std::path::{Path, PathBuf};

/// 执行 batch 命令
pub fn execute(args: BatchArgs, global: &GlobalArgs) -> Result<()> {
    output::print_header("SMARTS Batch Run");

    let files = FileCollector::new(args.input.clone())
        .with_pattern(&args.pattern)?
        .recursive(args.recursive)
        .collect()?;
    output::print_info(&format!("Found {} config files", files.len()));

    fs::create_dir_all(&args.output_dir).map_err(|e| SmartsError::FileWriteError {
        path: args.output_dir.display().to_string(),
        source: e,
    })?;

    let smarts = build_smarts(global, &args.exec)?;
    let runner = BatchRunner::new(args.jobs);
    output::print_info(&format!("Running with {} parallel jobs", runner.jobs()));

    let options = CaseOptions {
        output_dir: &args.output_dir,
        keep_root: args.exec.keep_files.as_deref(),
        skip_existing: args.skip_existing,
    };
    let result = runner.run(files, |file| run_case(file, &smarts, &options))?;

    println!("{}", table::batch_summary(&result));
    output::print_separator();
    output::print_success(&format!(
        "Batch complete: {} success, {} skipped, {} failed ({:.1} s SMARTS time)",
        result.success,
        result.skipped,
        result.failed,
        result.total_elapsed().as_secs_f64()
    ));

    if !result.failures.is_empty() {
        output::print_warning("Failed cases:");
        for (name, err) in result.failures.iter().take(10) {
            output::print_error(&format!("  {}: {}", name, err));
        }
        if result.failures.len() > 10 {
            output::print_warning(&format!("  ... and {} more", result.failures.len() - 10));
        }
    }

    Ok(())
}

struct CaseOptions<'a> {
    output_dir: &'a Path,
    keep_root: Option<&'a Path>,
    skip_existing: bool,
}

fn case_name(input: &Path) -> String {
    input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("case")
        .to_string()
}

/// 运行单个算例
fn run_case(input: &PathBuf, smarts: &Smarts, options: &CaseOptions<'_>) -> CaseOutcome {
    let name = case_name(input);
    let csv_path = options.output_dir.join(format!("{}.csv", name));

    if options.skip_existing && csv_path.exists() {
        return CaseOutcome::Skipped(name);
    }

    let keep = options.keep_root.map(|root| root.join(&name));
    let run = || -> Result<(usize, std::time::Duration)> {
        let config = load_config(input)?;
        let result = smarts.run_keeping(&config, keep.as_deref())?;
        export::spectrum_to_csv(&result.spectrum, &csv_path)?;
        Ok((result.spectrum.len(), result.elapsed))
    };

    match run() {
        Ok((rows, elapsed)) => CaseOutcome::Success(name, rows, elapsed),
        Err(e) => CaseOutcome::Failed(name, e.to_string()),
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::models::{Material, OutputVariable, SimulationConfig};
    use crate::process::runner::tests::fake_install;

    const FAKE_SMARTS: &str = "printf 'Wvlgth Global_tilted_irradiance\\n280.0 0.1\\n280.5 0.2\\n4000.0 0.3\\n' > smarts295.ext.txt";

    fn write_case(dir: &Path, name: &str, config: &SimulationConfig) -> PathBuf {
        let path = dir.join(format!("{}.json", name));
        fs::write(&path, serde_json::to_string(config).unwrap()).unwrap();
        path
    }

    #[test]
    fn test_run_case_outcomes() {
        let (_root, install) = fake_install(FAKE_SMARTS);
        let smarts = Smarts::new(install);
        let cases = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();

        let good = SimulationConfig::air_mass(
            vec![OutputVariable::GLOBAL_TILTED],
            1.5,
            Material::LIGHT_SOIL,
        );
        let mut bad = good.clone();
        bad.range.max = 9000.0;

        let good_path = write_case(cases.path(), "good", &good);
        let bad_path = write_case(cases.path(), "bad", &bad);

        let options = CaseOptions {
            output_dir: out.path(),
            keep_root: None,
            skip_existing: true,
        };

        match run_case(&good_path, &smarts, &options) {
            CaseOutcome::Success(name, rows, _) => {
                assert_eq!(name, "good");
                assert_eq!(rows, 3);
            }
            other => panic!("expected success, got {:?}", other),
        }
        assert!(out.path().join("good.csv").is_file());

        assert!(matches!(
            run_case(&good_path, &smarts, &options),
            CaseOutcome::Skipped(_)
        ));
        assert!(matches!(
            run_case(&bad_path, &smarts, &options),
            CaseOutcome::Failed(..)
        ));
    }
}
