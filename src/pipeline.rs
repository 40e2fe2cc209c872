//! # 模拟流水线
//!
//! 一次完整的 SMARTS 调用：校验 → 写输入卡片 → 运行 → 解析输出。
//!
//! 每次调用在独立的临时工作目录中进行，同一个 `Smarts` 可被多个线程
//! 同时使用。`keep_outputs` 为每次调用新建 `run-*` 子目录。
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs` 和 `commands/` 使用
//! - 使用 `process/`, `parsers/`, `models/`

use crate::error::{Result, SmartsError};
use crate::models::execution::{BROADBAND_FILE, SPREADSHEET_FILE};
use crate::models::{SimulationConfig, Spectrum};
use crate::parsers::{self, ExpectedLayout};
use crate::process::{ProcessRunner, SmartsInstall, Workspace};

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 一次模拟的解析结果
#[derive(Debug, Clone)]
pub struct SimulationOutput {
    /// File 17 表格光谱
    pub spectrum: Spectrum,
    /// File 18 扫描平滑光谱（启用 Card 14 时）
    pub scan: Option<Spectrum>,
    pub elapsed: Duration,
    /// SMARTS 标准输出
    pub stdout: String,
    /// `keep_outputs` 保留下来的文件
    pub kept: Vec<PathBuf>,
}

const FORMAT: &str = "SMARTS spectral output";

/// SMARTS 光谱数据覆盖的波长 (nm)
const SMARTS_WAVELENGTHS: (f64, f64) = (280.0, 4000.0);

/// SMARTS 调用入口
#[derive(Debug, Clone)]
pub struct Smarts {
    install: SmartsInstall,
    runner: ProcessRunner,
    keep_dir: Option<PathBuf>,
}

impl Smarts {
    pub fn new(install: SmartsInstall) -> Self {
        Smarts {
            install,
            runner: ProcessRunner::default(),
            keep_dir: None,
        }
    }

    /// 从 `SMARTSPATH` 定位安装
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(SmartsInstall::from_env()?))
    }

    pub fn with_runner(mut self, runner: ProcessRunner) -> Self {
        self.runner = runner;
        self
    }

    /// 释放工作目录前把 SMARTS 文件复制到 `dir` 下的 `run-*` 子目录
    pub fn keep_outputs(mut self, dir: Option<PathBuf>) -> Self {
        self.keep_dir = dir;
        self
    }

    pub fn install(&self) -> &SmartsInstall {
        &self.install
    }

    /// 运行一次模拟
    pub fn run(&self, config: &SimulationConfig) -> Result<SimulationOutput> {
        match &self.keep_dir {
            Some(dir) => {
                let dest = unique_keep_dir(dir)?;
                self.run_keeping(config, Some(&dest))
            }
            None => self.run_keeping(config, None),
        }
    }

    /// 运行一次模拟，并把文件原样保留到 `keep`
    ///
    /// 同一 `keep` 目录不可被并发调用共用。
    pub fn run_keeping(
        &self,
        config: &SimulationConfig,
        keep: Option<&Path>,
    ) -> Result<SimulationOutput> {
        config.validate()?;
        if config.print.spreadsheet_outputs().is_none() {
            return Err(SmartsError::invalid(
                "IPRT",
                "spreadsheet output (IPRT = 2 or 3) is required to parse results",
            ));
        }

        let workspace = Workspace::create(&self.install)?;
        parsers::write_input_file(config, &workspace.input_path())?;

        let executed = self.runner.run_in(&workspace);

        // 失败时也保留文件以便排查
        let kept = match keep {
            Some(dir) => workspace.keep_outputs(dir)?,
            None => Vec::new(),
        };
        let execution = executed?;

        let Some(spreadsheet) = execution.outputs.spreadsheet.as_deref() else {
            return Err(missing_output(&workspace));
        };
        let spectrum =
            parsers::parse_spectrum_file(spreadsheet, ExpectedLayout::for_config(config))?;
        check_coverage(config, &spectrum)?;

        let scan = match (&config.scan, execution.outputs.scan.as_deref()) {
            (Some(_), Some(path)) => Some(parsers::read_spectrum(path)?),
            _ => None,
        };

        tracing::info!(
            rows = spectrum.len(),
            elapsed_ms = execution.elapsed.as_millis() as u64,
            "SMARTS simulation finished"
        );

        Ok(SimulationOutput {
            spectrum,
            scan,
            elapsed: execution.elapsed,
            stdout: execution.stdout,
            kept,
        })
    }
}

/// 在 `dir` 下为一次调用新建唯一子目录
fn unique_keep_dir(dir: &Path) -> Result<PathBuf> {
    let write_err = |e: std::io::Error| SmartsError::FileWriteError {
        path: dir.display().to_string(),
        source: e,
    };
    fs::create_dir_all(dir).map_err(write_err)?;
    let run = tempfile::Builder::new()
        .prefix("run-")
        .tempdir_in(dir)
        .map_err(write_err)?;
    Ok(run.keep())
}

/// 给定波长处 SMARTS 的原生光谱分辨率 (nm)
fn native_step(wavelength: f64) -> f64 {
    if wavelength < 400.0 {
        0.5
    } else if wavelength < 1702.0 {
        1.0
    } else {
        5.0
    }
}

/// File 17 必须覆盖打印窗口，在行边界处截断的文件在此被发现
fn check_coverage(config: &SimulationConfig, spectrum: &Spectrum) -> Result<()> {
    let (Some(window), Some((first, last))) =
        (config.print.window(), spectrum.wavelength_range())
    else {
        return Ok(());
    };

    let lo = window.min.max(config.range.min).max(SMARTS_WAVELENGTHS.0);
    let hi = window.max.min(config.range.max).min(SMARTS_WAVELENGTHS.1);
    let tolerance = |w: f64| window.interval.max(native_step(w));

    if first > lo + tolerance(lo) || last < hi - tolerance(hi) {
        return Err(SmartsError::parse(
            FORMAT,
            spectrum.source.clone(),
            format!(
                "spectrum covers {}..{} nm but the print window is {}..{} nm",
                first, last, lo, hi
            ),
        ));
    }
    Ok(())
}

/// File 17 缺失时，从 File 16 摘取 SMARTS 的错误信息
fn missing_output(workspace: &Workspace) -> SmartsError {
    let path = workspace.path().join(SPREADSHEET_FILE);
    let messages: Vec<String> = fs::read_to_string(workspace.path().join(BROADBAND_FILE))
        .map(|text| {
            text.lines()
                .filter(|l| l.contains("ERROR"))
                .map(|l| l.trim().to_string())
                .collect()
        })
        .unwrap_or_default();

    let reason = if messages.is_empty() {
        "SMARTS did not produce the spreadsheet output".to_string()
    } else {
        format!(
            "SMARTS did not produce the spreadsheet output: {}",
            messages.join("; ")
        )
    };
    SmartsError::parse(FORMAT, path.display().to_string(), reason)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::models::config::{Comment, PrintMode, PrintWindow};
    use crate::models::{OutputVariable, SpectralRecord};
    use crate::process::runner::tests::fake_install;
    use std::os::unix::fs::PermissionsExt;
    use std::thread;

    /// 把注释写成输出列名，以便区分不同调用
    const ECHO_COMMENT: &str = "c=$(head -n 1 smarts295.inp.txt | tr -d \"'\")\n\
                                sleep 0.2\n\
                                printf 'Wvlgth %s\\n280.0 1.0\\n280.5 2.0\\n4000.0 0.5\\n' \"$c\" > smarts295.ext.txt";

    fn config(comment: &str) -> SimulationConfig {
        let mut cfg = SimulationConfig::air_mass(
            vec![OutputVariable::DIRECT_NORMAL],
            1.5,
            crate::models::Material::LIGHT_SOIL,
        );
        cfg.comment = Comment::new(comment);
        cfg
    }

    #[test]
    fn test_concurrent_invocations_are_independent() {
        let (_root, install) = fake_install(ECHO_COMMENT);
        let smarts = Smarts::new(install);

        let results: Vec<_> = thread::scope(|s| {
            let handles: Vec<_> = ["case_a", "case_b"]
                .iter()
                .map(|name| {
                    let smarts = &smarts;
                    s.spawn(move || smarts.run(&config(name)))
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let a = results[0].as_ref().unwrap();
        let b = results[1].as_ref().unwrap();
        assert_eq!(a.spectrum.columns, vec!["case_a"]);
        assert_eq!(b.spectrum.columns, vec!["case_b"]);
        assert_eq!(a.spectrum.len(), 3);
    }

    #[test]
    fn test_invalid_config_never_spawns() {
        let (root, install) = fake_install("touch ran.marker");
        let mut cfg = config("invalid");
        cfg.range.min = 100.0;

        let result = Smarts::new(install).run(&cfg);
        assert!(matches!(result, Err(SmartsError::ValidationError { .. })));
        assert!(!root.path().join("ran.marker").exists());
    }

    #[test]
    fn test_broadband_only_is_rejected() {
        let (_root, install) = fake_install("exit 0");
        let mut cfg = config("broadband");
        cfg.print = PrintMode::Broadband;
        assert!(matches!(
            Smarts::new(install).run(&cfg),
            Err(SmartsError::ValidationError { .. })
        ));
    }

    #[test]
    fn test_missing_spreadsheet_reports_smarts_errors() {
        let (_root, install) =
            fake_install("echo '*** ERROR: Wavelength limits are out of range' > smarts295.out.txt");

        match Smarts::new(install).run(&config("missing")) {
            Err(SmartsError::ParseError { reason, .. }) => {
                assert!(reason.contains("Wavelength limits"), "{}", reason)
            }
            other => panic!("expected ParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_keep_outputs_copies_files() {
        let (_root, install) = fake_install(ECHO_COMMENT);
        let dest = tempfile::tempdir().unwrap();
        let smarts = Smarts::new(install).keep_outputs(Some(dest.path().to_path_buf()));

        let out = smarts.run(&config("kept")).unwrap();
        assert_eq!(out.kept.len(), 2);
        let run_dir = out.kept[0].parent().unwrap();
        assert_eq!(run_dir.parent().unwrap(), dest.path());
        assert!(run_dir.join(SPREADSHEET_FILE).is_file());
        assert!(run_dir.join("smarts295.inp.txt").is_file());
    }

    #[test]
    fn test_concurrent_runs_keep_separate_files() {
        let (_root, install) = fake_install(ECHO_COMMENT);
        let dest = tempfile::tempdir().unwrap();
        let smarts = Smarts::new(install).keep_outputs(Some(dest.path().to_path_buf()));

        let outputs: Vec<SimulationOutput> = thread::scope(|s| {
            let handles: Vec<_> = ["keep_a", "keep_b"]
                .iter()
                .map(|name| {
                    let smarts = &smarts;
                    s.spawn(move || smarts.run(&config(name)).unwrap())
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let dir_a = outputs[0].kept[0].parent().unwrap();
        let dir_b = outputs[1].kept[0].parent().unwrap();
        assert_ne!(dir_a, dir_b);
        for (out, name) in outputs.iter().zip(["keep_a", "keep_b"]) {
            let kept = out.kept[0].parent().unwrap().join(SPREADSHEET_FILE);
            let header = fs::read_to_string(kept).unwrap();
            assert!(header.starts_with(&format!("Wvlgth {}", name)), "{}", header);
        }
    }

    #[test]
    fn test_output_truncated_at_row_boundary_fails() {
        let (_root, install) =
            fake_install("printf 'Wvlgth x\\n280.0 1.0\\n' > smarts295.ext.txt");

        match Smarts::new(install).run(&config("truncated")) {
            Err(SmartsError::ParseError { reason, .. }) => {
                assert!(reason.contains("print window"), "{}", reason)
            }
            other => panic!("expected ParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_relative_install_runs_with_data_dirs() {
        let dir = tempfile::Builder::new()
            .prefix("rsmarts-rel-")
            .tempdir_in(".")
            .unwrap();
        fs::create_dir(dir.path().join("Solar")).unwrap();
        fs::write(dir.path().join("Solar").join("Spctrm_0.dat"), "1 2\n").unwrap();
        let exe = dir.path().join("smarts295bat");
        fs::write(
            &exe,
            "#!/bin/sh\ncat Solar/Spctrm_0.dat > /dev/null || exit 4\n\
             printf 'Wvlgth x\\n280.0 1.0\\n4000.0 2.0\\n' > smarts295.ext.txt\n",
        )
        .unwrap();
        fs::set_permissions(&exe, fs::Permissions::from_mode(0o755)).unwrap();

        let relative = PathBuf::from(dir.path().file_name().unwrap());
        let install = SmartsInstall::from_env_value(Some(relative.into_os_string())).unwrap();
        let out = Smarts::new(install).run(&config("relative")).unwrap();
        assert_eq!(out.spectrum.len(), 2);
    }

    #[test]
    fn test_coverage_tolerates_native_step() {
        let mut cfg = config("coverage");
        cfg.print = PrintMode::Spreadsheet {
            window: PrintWindow {
                min: 300.0,
                max: 2000.0,
                interval: 0.5,
            },
            outputs: vec![OutputVariable::DIRECT_NORMAL],
        };
        let spectrum = |first: f64, last: f64| Spectrum {
            source: "cov".into(),
            wavelength_label: "Wvlgth".into(),
            columns: vec!["x".into()],
            records: vec![
                SpectralRecord { wavelength: first, values: vec![1.0] },
                SpectralRecord { wavelength: last, values: vec![1.0] },
            ],
        };

        // 1702 nm 以上原生步长为 5 nm
        assert!(check_coverage(&cfg, &spectrum(300.0, 1996.0)).is_ok());
        assert!(check_coverage(&cfg, &spectrum(300.0, 1900.0)).is_err());
        assert!(check_coverage(&cfg, &spectrum(302.0, 2000.0)).is_err());
    }
}
