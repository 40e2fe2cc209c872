//! # 光谱数据导出
//!
//! 导出 SMARTS 光谱到 CSV 格式。
//!
//! ## 依赖关系
//! - 被 `commands/run.rs`, `commands/albedo.rs`, `commands/batch.rs` 调用
//! - 使用 `models/spectrum.rs` 的 Spectrum 结构
//! - 使用 `csv` 库写入 CSV 文件

use crate::error::{Result, SmartsError};
use crate::models::Spectrum;

use std::path::Path;

/// 导出光谱为 CSV，首列为波长
pub fn spectrum_to_csv(spectrum: &Spectrum, output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    let mut header = Vec::with_capacity(spectrum.columns.len() + 1);
    header.push(spectrum.wavelength_label.as_str());
    header.extend(spectrum.columns.iter().map(String::as_str));
    wtr.write_record(&header)?;

    for record in spectrum {
        let mut row = Vec::with_capacity(record.values.len() + 1);
        row.push(record.wavelength.to_string());
        row.extend(record.values.iter().map(|v| format!("{:e}", v)));
        wtr.write_record(&row)?;
    }

    wtr.flush().map_err(|e| SmartsError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    tracing::debug!(path = %output_path.display(), rows = spectrum.len(), "exported CSV");
    Ok(())
}

/// 读回 CSV（用于校验导出结果）
pub fn spectrum_from_csv(input_path: &Path) -> Result<Spectrum> {
    let mut rdr = csv::Reader::from_path(input_path)?;
    let header: Vec<String> = rdr.headers()?.iter().map(String::from).collect();
    let Some((wavelength_label, columns)) = header.split_first() else {
        return Err(SmartsError::parse(
            "CSV",
            input_path.display().to_string(),
            "missing header",
        ));
    };

    let mut records = Vec::new();
    for row in rdr.records() {
        let row = row?;
        let values = row
            .iter()
            .map(|cell| {
                cell.parse::<f64>().map_err(|_| {
                    SmartsError::parse(
                        "CSV",
                        input_path.display().to_string(),
                        format!("'{}' is not a number", cell),
                    )
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        let mut values = values.into_iter();
        let wavelength = values.next().unwrap_or_default();
        records.push(crate::models::SpectralRecord {
            wavelength,
            values: values.collect(),
        });
    }

    Ok(Spectrum {
        source: input_path.display().to_string(),
        wavelength_label: wavelength_label.clone(),
        columns: columns.to_vec(),
        records,
    })
}
