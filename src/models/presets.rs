//! # 预设配置
//!
//! 常用模拟场景的默认参数集合：
//! - `time_location`: 指定时间与地点的标准光谱
//! - `albedo_spectrum`: 指定地表材料的光谱反照率
//! - `air_mass`: 指定大气质量的光谱
//!
//! 三者共享 USSA 参考大气、S&F_TROPO 气溶胶、TAU5 = 0 等默认值。
//!
//! ## 依赖关系
//! - 被 `commands/run.rs`, `commands/albedo.rs` 使用
//! - 使用 `models/config.rs`, `models/catalog.rs`

use crate::models::catalog::{Material, OutputVariable};
use crate::models::config::*;

const STANDARD_COMMENT: &str = "ASTMG173-03 (AM1.5 Standard)";

/// 默认输出步长 (nm)
pub const DEFAULT_INTERVAL: f64 = 0.5;

impl SimulationConfig {
    /// 预设公共部分：海平面标准气压、USSA 参考大气、无污染、对流层气溶胶
    fn standard(
        altitude: f64,
        albedo: Albedo,
        range: SpectralRange,
        interval: f64,
        outputs: Vec<OutputVariable>,
        geometry: SolarGeometry,
    ) -> Self {
        let window = PrintWindow {
            min: range.min,
            max: range.max,
            interval,
        };
        SimulationConfig {
            comment: Comment::new(STANDARD_COMMENT),
            pressure: SitePressure::PressureAltitude {
                spr: 1013.25,
                altitude,
                height: 0.0,
            },
            atmosphere: Atmosphere::Reference(ReferenceAtmosphere::Ussa),
            water_vapor: WaterVapor::FromReference,
            ozone: Ozone::FromReference,
            gas: GasAbsorption::Load(PollutionLoad::Pristine),
            co2: 0.0,
            spectrum: SolarSpectrum::Gueymard2004,
            aerosol: Aerosol::Model(AerosolModel::ShettleFennTropospheric),
            turbidity: Turbidity::Tau5(0.0),
            albedo,
            tilt: None,
            range,
            print: PrintMode::Spreadsheet { window, outputs },
            circumsolar: None,
            scan: None,
            illuminance: Illuminance::Off,
            uv: false,
            geometry,
        }
    }

    /// 指定日期、时刻与地点的标准光谱
    ///
    /// 远场与前景反照率均为浅色土壤，倾斜面倾角等于纬度、朝南 (180°)。
    #[allow(clippy::too_many_arguments)]
    pub fn time_location(
        outputs: Vec<OutputVariable>,
        year: i32,
        month: u32,
        day: u32,
        hour: f64,
        latitude: f64,
        longitude: f64,
        altitude: f64,
        zone: f64,
    ) -> Self {
        let albedo = Albedo::Spectral(Material::LIGHT_SOIL);
        let mut config = Self::standard(
            altitude,
            albedo,
            SpectralRange::default(),
            DEFAULT_INTERVAL,
            outputs,
            SolarGeometry::DateTime {
                year,
                month,
                day,
                hour,
                latitude,
                longitude,
                zone,
            },
        );
        config.tilt = Some(TiltedSurface {
            albedo,
            tilt: latitude,
            azimuth: 180.0,
        });
        config
    }

    /// 指定材料的光谱反照率（输出变量 30，不计算倾斜面）
    pub fn albedo_spectrum(
        material: Material,
        range: SpectralRange,
        interval: f64,
        geometry: SolarGeometry,
    ) -> Self {
        Self::standard(
            0.0,
            Albedo::Spectral(material),
            range,
            interval,
            vec![OutputVariable::ZONAL_REFLECTANCE],
            geometry,
        )
    }

    /// 指定大气质量的光谱
    pub fn air_mass(outputs: Vec<OutputVariable>, amass: f64, material: Material) -> Self {
        Self::standard(
            0.0,
            Albedo::Spectral(material),
            SpectralRange::default(),
            DEFAULT_INTERVAL,
            outputs,
            SolarGeometry::AirMass { amass },
        )
    }
}
