//! # inspect 命令实现
//!
//! 读取已有的 SMARTS 输入卡片、表格输出或导出的 CSV 并打印摘要。
//!
//! ## 依赖关系
//! - 使用 `cli/inspect.rs` 定义的参数
//! - 使用 `parsers/`, `utils/export.rs`, `utils/table.rs`

use crate::cli::inspect::InspectArgs;
use crate::error::{Result, SmartsError};
use crate::models::{SimulationConfig, Spectrum};
use crate::parsers::{self, FileKind};
use crate::utils::{export, output, table};

/// 执行 inspect 命令
pub fn execute(args: InspectArgs) -> Result<()> {
    if !args.file.exists() {
        return Err(SmartsError::FileNotFound {
            path: args.file.display().to_string(),
        });
    }

    let is_csv = args
        .file
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));

    if is_csv {
        return show_spectrum(&export::spectrum_from_csv(&args.file)?, args.rows);
    }

    match parsers::detect_kind(&args.file) {
        FileKind::InputDeck => {
            let config = parsers::parse_input_file(&args.file)?;
            if args.json {
                let json = serde_json::to_string_pretty(&config).map_err(|e| {
                    SmartsError::JsonError {
                        path: args.file.display().to_string(),
                        source: e,
                    }
                })?;
                println!("{}", json);
                Ok(())
            } else {
                show_config(&config);
                Ok(())
            }
        }
        FileKind::Spectrum => show_spectrum(&parsers::read_spectrum(&args.file)?, args.rows),
    }
}

fn show_config(config: &SimulationConfig) {
    output::print_header("SMARTS Input Deck");
    println!("  Comment      : {}", config.comment.as_str());
    println!("  Atmosphere   : IATMOS = {}", config.atmosphere.code());
    println!("  Aerosol      : {}", config.aerosol.name());
    println!(
        "  Range        : {}-{} nm",
        config.range.min, config.range.max
    );
    println!("  IPRT         : {}", config.print.code());
    if let Some(outputs) = config.print.spreadsheet_outputs() {
        for out in outputs {
            println!("    IOUT {:>2}    : {}", out, out.description());
        }
    }
    println!("  IMASS        : {}", config.geometry.code());

    match config.validate() {
        Ok(()) => output::print_success("Deck is valid"),
        Err(e) => output::print_warning(&e.to_string()),
    }
}

fn show_spectrum(spectrum: &Spectrum, preview: usize) -> Result<()> {
    output::print_header("SMARTS Spectrum");
    output::print_info(&format!("Source: {}", spectrum.source));
    if let Some((lo, hi)) = spectrum.wavelength_range() {
        output::print_info(&format!(
            "{} rows, {} columns, {:.1}-{:.1} nm",
            spectrum.len(),
            spectrum.columns.len(),
            lo,
            hi
        ));
    }
    println!("{}", table::spectrum_summary(spectrum));

    if preview > 0 {
        output::print_separator();
        println!("{} {}", spectrum.wavelength_label, spectrum.columns.join(" "));
        for record in spectrum.iter().take(preview) {
            let values: Vec<String> = record.values.iter().map(|v| format!("{:.4e}", v)).collect();
            println!("{} {}", record.wavelength, values.join(" "));
        }
    }
    Ok(())
}
