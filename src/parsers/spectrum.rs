//! # SMARTS 表格输出解析器
//!
//! 解析 `smarts295.ext.txt`（File 17）与 `smarts295.scn.txt`（File 18）。
//!
//! ## 格式
//! ```text
//! Wvlgth Direct_normal_irradiance Difuse_horizn_irradiance
//! 280.0  0.0000E+00 0.0000E+00
//! 280.5  0.0000E+00 0.0000E+00
//! ...
//! ```
//! 空白分隔，一行表头，其余为数值行。
//!
//! ## 依赖关系
//! - 被 `pipeline.rs`, `commands/inspect.rs` 使用
//! - 使用 `models/spectrum.rs`

use crate::error::{Result, SmartsError};
use crate::models::config::SimulationConfig;
use crate::models::{SpectralRecord, Spectrum};
use std::fs;
use std::path::Path;

const FORMAT: &str = "SMARTS spectral output";

/// 调用方期望的输出布局
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExpectedLayout {
    /// 含波长列在内的总列数
    pub columns: Option<usize>,
    pub rows: Option<usize>,
}

impl ExpectedLayout {
    /// 由 IOUT 列表推出 File 17 的列数（1 + IOTOT）
    pub fn for_config(config: &SimulationConfig) -> Self {
        ExpectedLayout {
            columns: config.print.spreadsheet_outputs().map(|o| o.len() + 1),
            rows: None,
        }
    }

    pub fn with_rows(mut self, rows: usize) -> Self {
        self.rows = Some(rows);
        self
    }
}

fn is_wavelength_label(label: &str) -> bool {
    let lower = label.to_ascii_lowercase();
    lower.starts_with("wvl") || lower.starts_with("wave")
}

/// 解析表格输出内容
pub fn parse_spectrum_content(
    content: &str,
    source: &str,
    expected: ExpectedLayout,
) -> Result<Spectrum> {
    let err = |reason: String| SmartsError::parse(FORMAT, source, reason);

    // lines() 已处理 \r\n
    let mut lines = content
        .lines()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty());

    let (_, header) = lines.next().ok_or_else(|| err("file is empty".to_string()))?;
    let header: Vec<String> = header.split_whitespace().map(String::from).collect();

    if let Some(columns) = expected.columns {
        if header.len() != columns {
            return Err(err(format!(
                "header has {} columns, expected {}",
                header.len(),
                columns
            )));
        }
        if !is_wavelength_label(&header[0]) {
            return Err(err(format!(
                "first column '{}' is not the wavelength",
                header[0]
            )));
        }
    }

    let mut records = Vec::new();
    for (idx, line) in lines {
        let cells: Vec<&str> = line.split_whitespace().collect();
        if cells.len() != header.len() {
            return Err(err(format!(
                "line {} has {} columns, header has {}",
                idx + 1,
                cells.len(),
                header.len()
            )));
        }

        let mut values = Vec::with_capacity(cells.len());
        for cell in &cells {
            let v = cell.parse::<f64>().map_err(|_| {
                err(format!("line {}: '{}' is not a number", idx + 1, cell))
            })?;
            values.push(v);
        }

        let wavelength = values.remove(0);
        if let Some(prev) = records.last().map(|r: &SpectralRecord| r.wavelength) {
            if wavelength <= prev {
                return Err(err(format!(
                    "line {}: wavelength {} does not increase (previous {})",
                    idx + 1,
                    wavelength,
                    prev
                )));
            }
        }
        records.push(SpectralRecord { wavelength, values });
    }

    if records.is_empty() {
        return Err(err("no data rows".to_string()));
    }

    if let Some(rows) = expected.rows {
        if records.len() != rows {
            return Err(err(format!(
                "row count mismatch: found {} rows, expected {}",
                records.len(),
                rows
            )));
        }
    }

    let mut header = header.into_iter();
    let wavelength_label = header.next().unwrap_or_default();

    tracing::debug!(
        source,
        rows = records.len(),
        columns = header.len(),
        "parsed spectral output"
    );

    Ok(Spectrum {
        source: source.to_string(),
        wavelength_label,
        columns: header.collect(),
        records,
    })
}

/// 解析表格输出文件
pub fn parse_spectrum_file(path: &Path, expected: ExpectedLayout) -> Result<Spectrum> {
    if !path.exists() {
        return Err(SmartsError::parse(
            FORMAT,
            path.display().to_string(),
            "file is missing",
        ));
    }
    let content = fs::read_to_string(path).map_err(|e| SmartsError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_spectrum_content(&content, &path.display().to_string(), expected)
}
