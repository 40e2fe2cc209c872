//! # 光谱数据模型
//!
//! 存储从 SMARTS 表格输出文件解析得到的光谱记录。
//!
//! ## 依赖关系
//! - 由 `parsers/spectrum.rs` 创建
//! - 被 `utils/export.rs`, `utils/plot.rs` 和 `commands/` 使用

use serde::Serialize;

/// 单个波长处的模拟结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpectralRecord {
    /// 波长 (nm)
    pub wavelength: f64,
    /// 各输出列的值，顺序与 `Spectrum::columns` 一致
    pub values: Vec<f64>,
}

/// 一个输出文件中的完整光谱
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Spectrum {
    /// 来源文件
    pub source: String,
    /// 波长列的表头（通常为 `Wvlgth`）
    pub wavelength_label: String,
    /// 其余列的表头
    pub columns: Vec<String>,
    pub records: Vec<SpectralRecord>,
}

impl Spectrum {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SpectralRecord> {
        self.records.iter()
    }

    /// 按表头查找列号（不区分大小写）
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.eq_ignore_ascii_case(name))
    }

    /// 取出一列的所有值
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let idx = self.column_index(name)?;
        Some(self.column_at(idx))
    }

    pub fn column_at(&self, idx: usize) -> Vec<f64> {
        self.records.iter().map(|r| r.values[idx]).collect()
    }

    pub fn wavelengths(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.wavelength).collect()
    }

    /// 波长范围 (最小, 最大)
    pub fn wavelength_range(&self) -> Option<(f64, f64)> {
        Some((self.records.first()?.wavelength, self.records.last()?.wavelength))
    }

    /// 用梯形法对一列按波长积分
    pub fn integrate(&self, idx: usize) -> f64 {
        self.records
            .windows(2)
            .map(|w| {
                let dx = w[1].wavelength - w[0].wavelength;
                0.5 * dx * (w[0].values[idx] + w[1].values[idx])
            })
            .sum()
    }
}

impl<'a> IntoIterator for &'a Spectrum {
    type Item = &'a SpectralRecord;
    type IntoIter = std::slice::Iter<'a, SpectralRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spectrum() -> Spectrum {
        Spectrum {
            source: "test".into(),
            wavelength_label: "Wvlgth".into(),
            columns: vec!["Direct_normal_irradiance".into(), "Global".into()],
            records: vec![
                SpectralRecord {
                    wavelength: 400.0,
                    values: vec![1.0, 2.0],
                },
                SpectralRecord {
                    wavelength: 401.0,
                    values: vec![3.0, 4.0],
                },
                SpectralRecord {
                    wavelength: 403.0,
                    values: vec![3.0, 6.0],
                },
            ],
        }
    }

    #[test]
    fn test_column_access() {
        let s = spectrum();
        assert_eq!(s.len(), 3);
        assert_eq!(s.column_index("global"), Some(1));
        assert_eq!(s.column("Global").unwrap(), vec![2.0, 4.0, 6.0]);
        assert!(s.column("Missing").is_none());
        assert_eq!(s.wavelength_range(), Some((400.0, 403.0)));
    }

    #[test]
    fn test_trapezoidal_integration() {
        let s = spectrum();
        // 0.5*1*(1+3) + 0.5*2*(3+3)
        assert!((s.integrate(0) - 8.0).abs() < 1e-12);
    }
}
