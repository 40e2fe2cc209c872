//! # 终端汇总表
//!
//! 使用 `tabled` 打印光谱与批量运行的汇总。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `models/spectrum.rs`, `batch/runner.rs`

use crate::batch::{BatchResult, CaseOutcome};
use crate::models::Spectrum;

use tabled::{Table, Tabled};

#[derive(Tabled)]
struct ColumnRow {
    #[tabled(rename = "Column")]
    name: String,
    #[tabled(rename = "Min")]
    min: String,
    #[tabled(rename = "Max")]
    max: String,
    #[tabled(rename = "Peak λ (nm)")]
    peak_at: String,
    #[tabled(rename = "Integrated")]
    integrated: String,
}

#[derive(Tabled)]
struct CaseRow {
    #[tabled(rename = "Case")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Rows")]
    rows: String,
    #[tabled(rename = "Time (s)")]
    seconds: String,
}

/// 每列的最小值、最大值、峰值波长与积分
pub fn spectrum_summary(spectrum: &Spectrum) -> String {
    let rows: Vec<ColumnRow> = spectrum
        .columns
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let values = spectrum.column_at(idx);
            let min = values.iter().copied().fold(f64::INFINITY, f64::min);
            let (peak_idx, max) = values
                .iter()
                .copied()
                .enumerate()
                .fold((0, f64::NEG_INFINITY), |acc, (i, v)| {
                    if v > acc.1 {
                        (i, v)
                    } else {
                        acc
                    }
                });
            ColumnRow {
                name: name.clone(),
                min: format!("{:.4e}", min),
                max: format!("{:.4e}", max),
                peak_at: format!("{:.1}", spectrum.records[peak_idx].wavelength),
                integrated: format!("{:.4}", spectrum.integrate(idx)),
            }
        })
        .collect();

    Table::new(rows).to_string()
}

/// 批量运行的逐算例结果
pub fn batch_summary(result: &BatchResult) -> String {
    let rows: Vec<CaseRow> = result
        .outcomes
        .iter()
        .map(|o| match o {
            CaseOutcome::Success(name, rows, elapsed) => CaseRow {
                name: name.clone(),
                status: "ok".to_string(),
                rows: rows.to_string(),
                seconds: format!("{:.2}", elapsed.as_secs_f64()),
            },
            CaseOutcome::Skipped(name) => CaseRow {
                name: name.clone(),
                status: "skipped".to_string(),
                rows: "-".to_string(),
                seconds: "-".to_string(),
            },
            CaseOutcome::Failed(name, _) => CaseRow {
                name: name.clone(),
                status: "failed".to_string(),
                rows: "-".to_string(),
                seconds: "-".to_string(),
            },
        })
        .collect();

    Table::new(rows).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SpectralRecord;
    use std::time::Duration;

    #[test]
    fn test_spectrum_summary_lists_columns() {
        let spectrum = Spectrum {
            source: "t".into(),
            wavelength_label: "Wvlgth".into(),
            columns: vec!["Global_horizn_irradiance".into()],
            records: vec![
                SpectralRecord {
                    wavelength: 500.0,
                    values: vec![1.2],
                },
                SpectralRecord {
                    wavelength: 501.0,
                    values: vec![1.5],
                },
            ],
        };
        let table = spectrum_summary(&spectrum);
        assert!(table.contains("Global_horizn_irradiance"));
        assert!(table.contains("501.0"));
    }

    #[test]
    fn test_batch_summary_statuses() {
        let mut result = BatchResult::default();
        result.merge(CaseOutcome::Success("a".into(), 7421, Duration::from_millis(250)));
        result.merge(CaseOutcome::Failed("b".into(), "boom".into()));
        let table = batch_summary(&result);
        assert!(table.contains("7421"));
        assert!(table.contains("failed"));
    }
}
