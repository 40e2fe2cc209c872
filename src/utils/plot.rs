//! # 光谱图表生成
//!
//! 使用 `plotters` 绘制 SMARTS 光谱曲线。
//!
//! ## 功能
//! - 每个输出变量一条曲线
//! - 支持 PNG 和 SVG 输出
//!
//! ## 依赖关系
//! - 被 `commands/run.rs`, `commands/albedo.rs` 调用
//! - 使用 `models/spectrum.rs` 的 Spectrum 结构
//! - 使用 `plotters` 渲染图表

use crate::error::{Result, SmartsError};
use crate::models::Spectrum;

use plotters::prelude::*;
use std::path::Path;

/// 图表参数
#[derive(Debug, Clone)]
pub struct PlotOptions {
    pub title: String,
    pub y_label: String,
    pub width: u32,
    pub height: u32,
}

impl Default for PlotOptions {
    fn default() -> Self {
        PlotOptions {
            title: "SMARTS spectrum".to_string(),
            y_label: "Spectral irradiance (W m⁻² nm⁻¹)".to_string(),
            width: 1200,
            height: 800,
        }
    }
}

const PALETTE: [RGBColor; 6] = [
    RGBColor(0, 102, 204),
    RGBColor(204, 51, 0),
    RGBColor(0, 153, 76),
    RGBColor(153, 0, 153),
    RGBColor(230, 138, 0),
    RGBColor(90, 90, 90),
];

/// 绘制光谱，按扩展名选择 PNG 或 SVG
pub fn plot_spectrum(spectrum: &Spectrum, output_path: &Path, options: &PlotOptions) -> Result<()> {
    if spectrum.is_empty() || spectrum.columns.is_empty() {
        return Err(SmartsError::InvalidArgument(
            "cannot plot an empty spectrum".to_string(),
        ));
    }

    let use_svg = output_path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"));

    let size = (options.width, options.height);
    if use_svg {
        let root = SVGBackend::new(output_path, size).into_drawing_area();
        draw_spectrum_chart(&root, spectrum, options)?;
        root.present()
            .map_err(|e| SmartsError::Other(e.to_string()))?;
    } else {
        let root = BitMapBackend::new(output_path, size).into_drawing_area();
        draw_spectrum_chart(&root, spectrum, options)?;
        root.present()
            .map_err(|e| SmartsError::Other(e.to_string()))?;
    }
    Ok(())
}

/// 纵轴范围，上下各留 5% 余量
fn value_range(spectrum: &Spectrum) -> (f64, f64) {
    let (lo, hi) = spectrum
        .iter()
        .flat_map(|r| r.values.iter().copied())
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if !lo.is_finite() {
        return (0.0, 1.0);
    }
    let lo = lo.min(0.0);
    let span = if hi > lo { hi - lo } else { 1.0 };
    (lo, hi + 0.05 * span)
}

fn draw_spectrum_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    spectrum: &Spectrum,
    options: &PlotOptions,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)
        .map_err(|e| SmartsError::Other(format!("{:?}", e)))?;

    let (x_min, x_max) = spectrum.wavelength_range().unwrap_or((280.0, 4000.0));
    let (y_min, y_max) = value_range(spectrum);

    let mut chart = ChartBuilder::on(root)
        .caption(&options.title, ("sans-serif", 28).into_font())
        .margin(30)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(|e| SmartsError::Other(format!("{:?}", e)))?;

    chart
        .configure_mesh()
        .x_desc("Wavelength (nm)")
        .y_desc(options.y_label.as_str())
        .x_label_style(("sans-serif", 16))
        .y_label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .draw()
        .map_err(|e| SmartsError::Other(format!("{:?}", e)))?;

    for (idx, name) in spectrum.columns.iter().enumerate() {
        let color = PALETTE[idx % PALETTE.len()];
        chart
            .draw_series(LineSeries::new(
                spectrum.iter().map(|r| (r.wavelength, r.values[idx])),
                color.stroke_width(2),
            ))
            .map_err(|e| SmartsError::Other(format!("{:?}", e)))?
            .label(name.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font(("sans-serif", 14))
        .draw()
        .map_err(|e| SmartsError::Other(format!("{:?}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SpectralRecord;

    fn spectrum(values: &[f64]) -> Spectrum {
        Spectrum {
            source: "t".into(),
            wavelength_label: "Wvlgth".into(),
            columns: vec!["Direct_normal_irradiance".into()],
            records: values
                .iter()
                .enumerate()
                .map(|(i, v)| SpectralRecord {
                    wavelength: 300.0 + i as f64,
                    values: vec![*v],
                })
                .collect(),
        }
    }

    #[test]
    fn test_value_range_includes_zero_and_margin() {
        let (lo, hi) = value_range(&spectrum(&[0.5, 1.0, 1.5]));
        assert_eq!(lo, 0.0);
        assert!((hi - 1.575).abs() < 1e-12);
        assert_eq!(value_range(&spectrum(&[])), (0.0, 1.0));
    }

    #[test]
    fn test_empty_spectrum_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let result = plot_spectrum(
            &spectrum(&[]),
            &dir.path().join("empty.png"),
            &PlotOptions::default(),
        );
        assert!(matches!(result, Err(SmartsError::InvalidArgument(_))));
    }
}
