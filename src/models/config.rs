//! # 模拟参数数据模型
//!
//! 将 SMARTS 2.9.5 输入卡片（Card 1 - Card 17a）建模为强类型结构。
//!
//! 每个带选项开关的卡片都是一个枚举，变体只携带该选项需要的字段，
//! 因而"所选模式的必需字段"在构造时即已齐全；数值范围由
//! [`SimulationConfig::validate`] 检查。
//!
//! ## 依赖关系
//! - 被 `parsers/input_deck.rs` 序列化为输入文件
//! - 被 `pipeline.rs` 在调用前校验
//! - 使用 `models/catalog.rs` 的 Material, OutputVariable

use crate::error::{Result, SmartsError};
use crate::models::catalog::{Material, OutputVariable};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// 表示"跟踪太阳"的倾角/方位角取值
pub const SUN_TRACKING: f64 = -999.0;

/// Card 1 注释的最大长度
const COMMENT_MAX: usize = 62;

// ─────────────────────────────────────────────────────────────
// Card 1: 注释
// ─────────────────────────────────────────────────────────────

/// 模拟注释（Card 1）
///
/// 构造时规范化：空白替换为 `_`，去除单引号，超过 62 个字符截断为 61 个。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Comment(String);

impl Comment {
    pub fn new(text: &str) -> Self {
        let cleaned: String = text
            .chars()
            .filter(|c| *c != '\'')
            .map(|c| if c.is_whitespace() { '_' } else { c })
            .collect();
        let cleaned = if cleaned.chars().count() > COMMENT_MAX {
            cleaned.chars().take(COMMENT_MAX - 1).collect()
        } else {
            cleaned
        };
        Comment(cleaned)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Comment {
    fn from(value: String) -> Self {
        Comment::new(&value)
    }
}

impl From<Comment> for String {
    fn from(value: Comment) -> Self {
        value.0
    }
}

// ─────────────────────────────────────────────────────────────
// Card 2: 站点气压
// ─────────────────────────────────────────────────────────────

/// 站点气压输入方式（ISPR）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SitePressure {
    /// ISPR = 0: 仅输入地面气压 (mb)
    Pressure { spr: f64 },
    /// ISPR = 1: 气压、海拔 (km)、离地高度 (km)
    PressureAltitude { spr: f64, altitude: f64, height: f64 },
    /// ISPR = 2: 纬度、海拔、离地高度，气压由程序计算
    LatitudeAltitude {
        latitude: f64,
        altitude: f64,
        height: f64,
    },
}

impl SitePressure {
    pub fn code(&self) -> u8 {
        match self {
            SitePressure::Pressure { .. } => 0,
            SitePressure::PressureAltitude { .. } => 1,
            SitePressure::LatitudeAltitude { .. } => 2,
        }
    }
}

// ─────────────────────────────────────────────────────────────
// Card 3: 大气
// ─────────────────────────────────────────────────────────────

/// 季节，用于可降水量与平流层温度计算
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Season {
    Winter,
    Summer,
}

impl Season {
    pub fn as_str(self) -> &'static str {
        match self {
            Season::Winter => "WINTER",
            Season::Summer => "SUMMER",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_uppercase().as_str() {
            "WINTER" => Some(Season::Winter),
            "SUMMER" => Some(Season::Summer),
            _ => None,
        }
    }
}

/// 参考大气（ATMOS）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReferenceAtmosphere {
    /// U.S. Standard Atmosphere
    Ussa,
    /// Mid-Latitude Summer
    Mls,
    /// Mid-Latitude Winter
    Mlw,
    /// Sub-Arctic Summer
    Sas,
    /// Sub-Arctic Winter
    Saw,
    /// Tropical
    Trl,
    /// Sub-Tropical Summer
    Sts,
    /// Sub-Tropical Winter
    Stw,
    /// Arctic Summer
    As,
    /// Arctic Winter
    Aw,
}

impl ReferenceAtmosphere {
    const ALL: [ReferenceAtmosphere; 10] = [
        ReferenceAtmosphere::Ussa,
        ReferenceAtmosphere::Mls,
        ReferenceAtmosphere::Mlw,
        ReferenceAtmosphere::Sas,
        ReferenceAtmosphere::Saw,
        ReferenceAtmosphere::Trl,
        ReferenceAtmosphere::Sts,
        ReferenceAtmosphere::Stw,
        ReferenceAtmosphere::As,
        ReferenceAtmosphere::Aw,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ReferenceAtmosphere::Ussa => "USSA",
            ReferenceAtmosphere::Mls => "MLS",
            ReferenceAtmosphere::Mlw => "MLW",
            ReferenceAtmosphere::Sas => "SAS",
            ReferenceAtmosphere::Saw => "SAW",
            ReferenceAtmosphere::Trl => "TRL",
            ReferenceAtmosphere::Sts => "STS",
            ReferenceAtmosphere::Stw => "STW",
            ReferenceAtmosphere::As => "AS",
            ReferenceAtmosphere::Aw => "AW",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(name.trim()))
    }
}

/// 大气定义方式（IATMOS）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Atmosphere {
    /// IATMOS = 0: 实际大气 (TAIR, RH, SEASON, TDAY)
    Realistic {
        air_temperature: f64,
        relative_humidity: f64,
        season: Season,
        daily_temperature: f64,
    },
    /// IATMOS = 1: 参考大气
    Reference(ReferenceAtmosphere),
}

impl Atmosphere {
    pub fn code(&self) -> u8 {
        match self {
            Atmosphere::Realistic { .. } => 0,
            Atmosphere::Reference(_) => 1,
        }
    }
}

// ─────────────────────────────────────────────────────────────
// Card 4 - 7: 水汽、臭氧、气体
// ─────────────────────────────────────────────────────────────

/// 水汽输入方式（IH2O）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaterVapor {
    /// IH2O = 0: 可降水量 W (cm)
    Precipitable { w: f64 },
    /// IH2O = 1: 由参考大气和海拔确定
    FromReference,
    /// IH2O = 2: 由 TAIR 和 RH 计算
    FromTemperatureHumidity,
}

impl WaterVapor {
    pub fn code(&self) -> u8 {
        match self {
            WaterVapor::Precipitable { .. } => 0,
            WaterVapor::FromReference => 1,
            WaterVapor::FromTemperatureHumidity => 2,
        }
    }
}

/// 臭氧输入方式（IO3）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ozone {
    /// IO3 = 0: IALT 与臭氧柱总量 AbO3 (atm-cm)
    User {
        altitude_correction: bool,
        abundance: f64,
    },
    /// IO3 = 1: 参考大气默认值
    FromReference,
}

impl Ozone {
    pub fn code(&self) -> u8 {
        match self {
            Ozone::User { .. } => 0,
            Ozone::FromReference => 1,
        }
    }
}

/// 对流层 1 km 污染层中的 10 种污染物浓度 (ppmv)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pollutants {
    pub ch2o: f64,
    pub ch4: f64,
    pub co: f64,
    pub hno2: f64,
    pub hno3: f64,
    pub no: f64,
    pub no2: f64,
    pub no3: f64,
    pub o3: f64,
    pub so2: f64,
}

impl Pollutants {
    /// Card 6b 的书写顺序
    pub fn values(&self) -> [f64; 10] {
        [
            self.ch2o, self.ch4, self.co, self.hno2, self.hno3, self.no, self.no2, self.no3,
            self.o3, self.so2,
        ]
    }

    pub fn from_values(v: [f64; 10]) -> Self {
        Pollutants {
            ch2o: v[0],
            ch4: v[1],
            co: v[2],
            hno2: v[3],
            hno3: v[4],
            no: v[5],
            no2: v[6],
            no3: v[7],
            o3: v[8],
            so2: v[9],
        }
    }
}

/// 对流层污染程度（ILOAD）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PollutionLoad {
    /// ILOAD = 0: 用户给定浓度 (Card 6b)
    Custom(Pollutants),
    /// ILOAD = 1
    Pristine,
    /// ILOAD = 2
    Light,
    /// ILOAD = 3
    Moderate,
    /// ILOAD = 4
    Severe,
}

impl PollutionLoad {
    pub fn code(&self) -> u8 {
        match self {
            PollutionLoad::Custom(_) => 0,
            PollutionLoad::Pristine => 1,
            PollutionLoad::Light => 2,
            PollutionLoad::Moderate => 3,
            PollutionLoad::Severe => 4,
        }
    }
}

/// 气体吸收条件（IGAS）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GasAbsorption {
    /// IGAS = 0: 读取 ILOAD
    Load(PollutionLoad),
    /// IGAS = 1: 使用平均垂直廓线
    Default,
}

impl GasAbsorption {
    pub fn code(&self) -> u8 {
        match self {
            GasAbsorption::Load(_) => 0,
            GasAbsorption::Default => 1,
        }
    }
}

/// 地外太阳光谱文件（ISPCTR）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolarSpectrum {
    /// -1: Spctrm_U.dat
    User,
    /// 0: Gueymard 2004 (1366.10)
    Gueymard2004,
    /// 1: Gueymard unpublished (1367.00)
    GueymardUnpublished,
    /// 2: MODTRAN Cebula/Chance/Kurucz (1362.12)
    CebulaChanceKurucz,
    /// 3: MODTRAN Chance/Kurucz (1359.75)
    ChanceKurucz,
    /// 4: MODTRAN New Kurucz (1368.00)
    NewKurucz,
    /// 5: MODTRAN Old Kurucz (1373.16)
    OldKurucz,
    /// 6: MODTRAN Thuillier/Kurucz (1376.23)
    ThuillierKurucz,
    /// 7: Wehrli/WRC/WMO 1985 (1367.00)
    Wehrli,
    /// 8: ASTM E490 2000 (1366.10)
    AstmE490,
}

impl SolarSpectrum {
    const ALL: [SolarSpectrum; 10] = [
        SolarSpectrum::User,
        SolarSpectrum::Gueymard2004,
        SolarSpectrum::GueymardUnpublished,
        SolarSpectrum::CebulaChanceKurucz,
        SolarSpectrum::ChanceKurucz,
        SolarSpectrum::NewKurucz,
        SolarSpectrum::OldKurucz,
        SolarSpectrum::ThuillierKurucz,
        SolarSpectrum::Wehrli,
        SolarSpectrum::AstmE490,
    ];

    pub fn code(self) -> i32 {
        match self {
            SolarSpectrum::User => -1,
            SolarSpectrum::Gueymard2004 => 0,
            SolarSpectrum::GueymardUnpublished => 1,
            SolarSpectrum::CebulaChanceKurucz => 2,
            SolarSpectrum::ChanceKurucz => 3,
            SolarSpectrum::NewKurucz => 4,
            SolarSpectrum::OldKurucz => 5,
            SolarSpectrum::ThuillierKurucz => 6,
            SolarSpectrum::Wehrli => 7,
            SolarSpectrum::AstmE490 => 8,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.code() == code)
    }
}

// ─────────────────────────────────────────────────────────────
// Card 8 - 9: 气溶胶与浊度
// ─────────────────────────────────────────────────────────────

/// 预定义气溶胶模型（AEROS）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AerosolModel {
    #[serde(rename = "S&F_RURAL")]
    ShettleFennRural,
    #[serde(rename = "S&F_URBAN")]
    ShettleFennUrban,
    #[serde(rename = "S&F_MARIT")]
    ShettleFennMaritime,
    #[serde(rename = "S&F_TROPO")]
    ShettleFennTropospheric,
    #[serde(rename = "SRA_CONTL")]
    SraContinental,
    #[serde(rename = "SRA_URBAN")]
    SraUrban,
    #[serde(rename = "SRA_MARIT")]
    SraMaritime,
    #[serde(rename = "B&D_C")]
    BraslauDaveC,
    #[serde(rename = "B&D_C1")]
    BraslauDaveC1,
    #[serde(rename = "DESERT_MIN")]
    DesertMin,
    #[serde(rename = "DESERT_MAX")]
    DesertMax,
}

impl AerosolModel {
    const ALL: [AerosolModel; 11] = [
        AerosolModel::ShettleFennRural,
        AerosolModel::ShettleFennUrban,
        AerosolModel::ShettleFennMaritime,
        AerosolModel::ShettleFennTropospheric,
        AerosolModel::SraContinental,
        AerosolModel::SraUrban,
        AerosolModel::SraMaritime,
        AerosolModel::BraslauDaveC,
        AerosolModel::BraslauDaveC1,
        AerosolModel::DesertMin,
        AerosolModel::DesertMax,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AerosolModel::ShettleFennRural => "S&F_RURAL",
            AerosolModel::ShettleFennUrban => "S&F_URBAN",
            AerosolModel::ShettleFennMaritime => "S&F_MARIT",
            AerosolModel::ShettleFennTropospheric => "S&F_TROPO",
            AerosolModel::SraContinental => "SRA_CONTL",
            AerosolModel::SraUrban => "SRA_URBAN",
            AerosolModel::SraMaritime => "SRA_MARIT",
            AerosolModel::BraslauDaveC => "B&D_C",
            AerosolModel::BraslauDaveC1 => "B&D_C1",
            AerosolModel::DesertMin => "DESERT_MIN",
            AerosolModel::DesertMax => "DESERT_MAX",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(name.trim()))
    }
}

/// 气溶胶（Card 8 / 8a）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aerosol {
    Model(AerosolModel),
    /// AEROS = 'USER': 宽带平均 Ångström 指数、单次散射反照率、不对称因子
    User {
        alpha1: f64,
        alpha2: f64,
        omegl: f64,
        gg: f64,
    },
}

impl Aerosol {
    pub fn name(&self) -> &'static str {
        match self {
            Aerosol::Model(m) => m.as_str(),
            Aerosol::User { .. } => "USER",
        }
    }
}

/// 浊度输入（ITURB）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Turbidity {
    /// ITURB = 0: 500 nm 气溶胶光学厚度
    Tau5(f64),
    /// ITURB = 1: Ångström 浊度系数 β
    Beta(f64),
    /// ITURB = 2: Schüepp 系数 B
    SchuepfB(f64),
    /// ITURB = 3: 气象能见距离 (km)
    Range(f64),
    /// ITURB = 4: 能见度 (km)
    Visibility(f64),
    /// ITURB = 5: 550 nm 气溶胶光学厚度
    Tau550(f64),
}

impl Turbidity {
    pub fn code(&self) -> u8 {
        match self {
            Turbidity::Tau5(_) => 0,
            Turbidity::Beta(_) => 1,
            Turbidity::SchuepfB(_) => 2,
            Turbidity::Range(_) => 3,
            Turbidity::Visibility(_) => 4,
            Turbidity::Tau550(_) => 5,
        }
    }

    pub fn value(&self) -> f64 {
        match *self {
            Turbidity::Tau5(v)
            | Turbidity::Beta(v)
            | Turbidity::SchuepfB(v)
            | Turbidity::Range(v)
            | Turbidity::Visibility(v)
            | Turbidity::Tau550(v) => v,
        }
    }

    pub fn from_code(code: i32, value: f64) -> Option<Self> {
        match code {
            0 => Some(Turbidity::Tau5(value)),
            1 => Some(Turbidity::Beta(value)),
            2 => Some(Turbidity::SchuepfB(value)),
            3 => Some(Turbidity::Range(value)),
            4 => Some(Turbidity::Visibility(value)),
            5 => Some(Turbidity::Tau550(value)),
            _ => None,
        }
    }
}

// ─────────────────────────────────────────────────────────────
// Card 10: 反照率与倾斜面
// ─────────────────────────────────────────────────────────────

/// 地表反照率（IALBDX / IALBDG）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Albedo {
    /// 代码 -1: 固定宽带 Lambertian 反照率
    Broadband(f64),
    /// 材料光谱反射率
    Spectral(Material),
}

impl Albedo {
    pub fn code(&self) -> i32 {
        match self {
            Albedo::Broadband(_) => -1,
            Albedo::Spectral(m) => i32::from(m.code()),
        }
    }
}

/// 倾斜接收面（Card 10c / 10d）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TiltedSurface {
    /// 前景局地反照率 (IALBDG)
    pub albedo: Albedo,
    /// 倾角 (0..90°)，-999 表示跟踪
    pub tilt: f64,
    /// 方位角 (0..360°，自北顺时针)，-999 表示跟踪
    pub azimuth: f64,
}

// ─────────────────────────────────────────────────────────────
// Card 11 - 16: 光谱范围、输出与附加计算
// ─────────────────────────────────────────────────────────────

/// 计算光谱范围（Card 11）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpectralRange {
    /// WLMN (nm)
    pub min: f64,
    /// WLMX (nm)
    pub max: f64,
    /// 日地距离修正因子
    pub suncor: f64,
    /// 太阳常数 (W m-2)
    pub solar_constant: f64,
}

impl Default for SpectralRange {
    fn default() -> Self {
        SpectralRange {
            min: 280.0,
            max: 4000.0,
            suncor: 1.0,
            solar_constant: 1367.0,
        }
    }
}

/// 输出光谱窗口（Card 12a）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintWindow {
    pub min: f64,
    pub max: f64,
    pub interval: f64,
}

/// 输出选择（IPRT）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrintMode {
    /// IPRT = 0: 仅宽带结果 (File 16)
    Broadband,
    /// IPRT = 1: 光谱结果写入 File 16
    Spectral16 { window: PrintWindow },
    /// IPRT = 2: 光谱结果写入表格文件 File 17
    Spreadsheet {
        window: PrintWindow,
        outputs: Vec<OutputVariable>,
    },
    /// IPRT = 3: 同时写入 File 16 和 File 17
    Both {
        window: PrintWindow,
        outputs: Vec<OutputVariable>,
    },
}

impl PrintMode {
    pub fn code(&self) -> u8 {
        match self {
            PrintMode::Broadband => 0,
            PrintMode::Spectral16 { .. } => 1,
            PrintMode::Spreadsheet { .. } => 2,
            PrintMode::Both { .. } => 3,
        }
    }

    pub fn window(&self) -> Option<&PrintWindow> {
        match self {
            PrintMode::Broadband => None,
            PrintMode::Spectral16 { window }
            | PrintMode::Spreadsheet { window, .. }
            | PrintMode::Both { window, .. } => Some(window),
        }
    }

    /// File 17 的输出变量；仅 IPRT = 2/3 有值
    pub fn spreadsheet_outputs(&self) -> Option<&[OutputVariable]> {
        match self {
            PrintMode::Spreadsheet { outputs, .. } | PrintMode::Both { outputs, .. } => {
                Some(outputs)
            }
            _ => None,
        }
    }
}

/// 环日辐射计算（Card 13a）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circumsolar {
    /// 斜角 (°)
    pub slope: f64,
    /// 视场半角 (°)
    pub aperture: f64,
    /// 极限角 (°)
    pub limit: f64,
}

/// 扫描滤波器形状（IFILT）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterShape {
    Rectangular,
    Triangular,
    Gaussian,
}

impl FilterShape {
    pub fn code(self) -> u8 {
        match self {
            FilterShape::Rectangular => 0,
            FilterShape::Triangular => 1,
            FilterShape::Gaussian => 2,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(FilterShape::Rectangular),
            1 => Some(FilterShape::Triangular),
            2 => Some(FilterShape::Gaussian),
            _ => None,
        }
    }
}

/// 扫描/平滑后处理（Card 14a），结果写入 File 18
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanFilter {
    pub filter: FilterShape,
    /// WV1 (nm)
    pub min: f64,
    /// WV2 (nm)
    pub max: f64,
    pub step: f64,
    pub fwhm: f64,
}

/// 照度与光效计算（ILLUM）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Illuminance {
    #[default]
    Off,
    /// -1: CIE 1924 明视觉曲线
    Cie1924,
    /// 1: CIE 1924，附加光效计算
    Cie1924Efficacy,
    /// -2: CIE 1988 修订曲线
    Cie1988,
    /// 2: CIE 1988，附加光效计算
    Cie1988Efficacy,
}

impl Illuminance {
    pub fn code(self) -> i32 {
        match self {
            Illuminance::Off => 0,
            Illuminance::Cie1924 => -1,
            Illuminance::Cie1924Efficacy => 1,
            Illuminance::Cie1988 => -2,
            Illuminance::Cie1988Efficacy => 2,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Illuminance::Off),
            -1 => Some(Illuminance::Cie1924),
            1 => Some(Illuminance::Cie1924Efficacy),
            -2 => Some(Illuminance::Cie1988),
            2 => Some(Illuminance::Cie1988Efficacy),
            _ => None,
        }
    }
}

// ─────────────────────────────────────────────────────────────
// Card 17: 太阳位置
// ─────────────────────────────────────────────────────────────

/// 太阳位置与大气质量（IMASS）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolarGeometry {
    /// IMASS = 0
    ZenithAzimuth { zenith: f64, azimuth: f64 },
    /// IMASS = 1
    ElevationAzimuth { elevation: f64, azimuth: f64 },
    /// IMASS = 2
    AirMass { amass: f64 },
    /// IMASS = 3: 由日期、时间与经纬度计算
    DateTime {
        year: i32,
        month: u32,
        day: u32,
        hour: f64,
        latitude: f64,
        longitude: f64,
        zone: f64,
    },
    /// IMASS = 4: 日积分计算，DSTEP 为时间步长 (min)
    Daily { month: u32, latitude: f64, step: f64 },
}

impl SolarGeometry {
    pub fn code(&self) -> u8 {
        match self {
            SolarGeometry::ZenithAzimuth { .. } => 0,
            SolarGeometry::ElevationAzimuth { .. } => 1,
            SolarGeometry::AirMass { .. } => 2,
            SolarGeometry::DateTime { .. } => 3,
            SolarGeometry::Daily { .. } => 4,
        }
    }
}

// ─────────────────────────────────────────────────────────────
// 完整配置
// ─────────────────────────────────────────────────────────────

/// 一次 SMARTS 调用的全部输入参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub comment: Comment,
    pub pressure: SitePressure,
    pub atmosphere: Atmosphere,
    pub water_vapor: WaterVapor,
    pub ozone: Ozone,
    pub gas: GasAbsorption,
    /// CO2 柱浓度 (ppmv)
    pub co2: f64,
    pub spectrum: SolarSpectrum,
    pub aerosol: Aerosol,
    pub turbidity: Turbidity,
    pub albedo: Albedo,
    #[serde(default)]
    pub tilt: Option<TiltedSurface>,
    #[serde(default)]
    pub range: SpectralRange,
    pub print: PrintMode,
    #[serde(default)]
    pub circumsolar: Option<Circumsolar>,
    #[serde(default)]
    pub scan: Option<ScanFilter>,
    #[serde(default)]
    pub illuminance: Illuminance,
    #[serde(default)]
    pub uv: bool,
    pub geometry: SolarGeometry,
}

impl SimulationConfig {
    /// 检查所有字段是否在 SMARTS 文档给出的有效范围内
    pub fn validate(&self) -> Result<()> {
        if self.comment.as_str().is_empty() {
            return Err(SmartsError::invalid("CMNT", "comment must not be empty"));
        }

        self.validate_pressure()?;
        self.validate_atmosphere()?;

        if let WaterVapor::Precipitable { w } = self.water_vapor {
            in_range("W", w, 0.0, 12.0)?;
        }
        if let Ozone::User { abundance, .. } = self.ozone {
            non_negative("AbO3", abundance)?;
        }
        if let GasAbsorption::Load(PollutionLoad::Custom(p)) = &self.gas {
            let names = [
                "ApCH2O", "ApCH4", "ApCO", "ApHNO2", "ApHNO3", "ApNO", "ApNO2", "ApNO3", "ApO3",
                "ApSO2",
            ];
            for (name, value) in names.iter().zip(p.values()) {
                non_negative(name, value)?;
            }
        }
        non_negative("qCO2", self.co2)?;

        if let Aerosol::User {
            alpha1,
            alpha2,
            omegl,
            gg,
        } = self.aerosol
        {
            finite("ALPHA1", alpha1)?;
            finite("ALPHA2", alpha2)?;
            if !(omegl > 0.0 && omegl <= 1.0) {
                return Err(SmartsError::invalid("OMEGL", format!("{} not in (0, 1]", omegl)));
            }
            if !(gg > -1.0 && gg < 1.0) {
                return Err(SmartsError::invalid("GG", format!("{} not in (-1, 1)", gg)));
            }
        }

        self.validate_turbidity()?;
        validate_albedo("RHOX", &self.albedo)?;

        if let Some(tilt) = &self.tilt {
            validate_albedo("RHOG", &tilt.albedo)?;
            angle_or_tracking("TILT", tilt.tilt, 90.0)?;
            angle_or_tracking("WAZIM", tilt.azimuth, 360.0)?;
        }

        self.validate_spectral()?;

        if let Some(c) = &self.circumsolar {
            non_negative("SLOPE", c.slope)?;
            non_negative("APERT", c.aperture)?;
            non_negative("LIMIT", c.limit)?;
        }

        if let Some(scan) = &self.scan {
            finite("WV1", scan.min)?;
            finite("WV2", scan.max)?;
            if scan.min >= scan.max {
                return Err(SmartsError::invalid(
                    "WV2",
                    format!("scan range {}..{} is empty", scan.min, scan.max),
                ));
            }
            positive("STEP", scan.step)?;
            positive("FWHM", scan.fwhm)?;
        }

        self.validate_geometry()
    }

    fn validate_pressure(&self) -> Result<()> {
        let (spr, altitude, height, latitude) = match self.pressure {
            SitePressure::Pressure { spr } => (Some(spr), None, None, None),
            SitePressure::PressureAltitude {
                spr,
                altitude,
                height,
            } => (Some(spr), Some(altitude), Some(height), None),
            SitePressure::LatitudeAltitude {
                latitude,
                altitude,
                height,
            } => (None, Some(altitude), Some(height), Some(latitude)),
        };

        if let Some(spr) = spr {
            positive("SPR", spr)?;
        }
        if let Some(latitude) = latitude {
            in_range("LATIT", latitude, -90.0, 90.0)?;
        }
        if let (Some(altitude), Some(height)) = (altitude, height) {
            finite("ALTIT", altitude)?;
            if altitude > 100.0 {
                return Err(SmartsError::invalid("ALTIT", format!("{} km exceeds 100 km", altitude)));
            }
            in_range("HEIGHT", height, 0.0, 100.0)?;
            if altitude + height > 100.0 {
                return Err(SmartsError::invalid(
                    "HEIGHT",
                    format!("ALTIT + HEIGHT = {} km exceeds 100 km", altitude + height),
                ));
            }
        }
        Ok(())
    }

    fn validate_atmosphere(&self) -> Result<()> {
        if let Atmosphere::Realistic {
            air_temperature,
            relative_humidity,
            daily_temperature,
            ..
        } = self.atmosphere
        {
            open_range("TAIR", air_temperature, -120.0, 50.0)?;
            in_range("RH", relative_humidity, 0.0, 100.0)?;
            open_range("TDAY", daily_temperature, -120.0, 50.0)?;
        }
        Ok(())
    }

    fn validate_turbidity(&self) -> Result<()> {
        match self.turbidity {
            Turbidity::Tau5(v) => non_negative("TAU5", v),
            Turbidity::Beta(v) => non_negative("BETA", v),
            Turbidity::SchuepfB(v) => non_negative("BCHUEP", v),
            Turbidity::Range(v) => positive("RANGE", v),
            Turbidity::Visibility(v) => positive("VISI", v),
            Turbidity::Tau550(v) => non_negative("TAU550", v),
        }
    }

    fn validate_spectral(&self) -> Result<()> {
        let r = &self.range;
        in_range("WLMN", r.min, 280.0, 4000.0)?;
        in_range("WLMX", r.max, 280.0, 4000.0)?;
        if r.min >= r.max {
            return Err(SmartsError::invalid(
                "WLMX",
                format!("calculation range {}..{} nm is empty", r.min, r.max),
            ));
        }
        in_range("SUNCOR", r.suncor, 0.966, 1.034)?;
        positive("SOLARC", r.solar_constant)?;

        if let Some(w) = self.print.window() {
            in_range("WPMN", w.min, r.min, r.max)?;
            in_range("WPMX", w.max, r.min, r.max)?;
            if w.min >= w.max {
                return Err(SmartsError::invalid(
                    "WPMX",
                    format!("print range {}..{} nm is empty", w.min, w.max),
                ));
            }
            positive("INTVL", w.interval)?;
        }

        if let Some(outputs) = self.print.spreadsheet_outputs() {
            if outputs.is_empty() {
                return Err(SmartsError::invalid("IOUT", "at least one output is required"));
            }
            let mut seen = HashSet::new();
            for out in outputs {
                if !out.is_known() {
                    return Err(SmartsError::invalid(
                        "IOUT",
                        format!("{} is not in 1..{}", out, OutputVariable::MAX_CODE),
                    ));
                }
                if !seen.insert(*out) {
                    return Err(SmartsError::invalid("IOUT", format!("{} is listed twice", out)));
                }
            }
        }
        Ok(())
    }

    fn validate_geometry(&self) -> Result<()> {
        match self.geometry {
            SolarGeometry::ZenithAzimuth { zenith, azimuth } => {
                in_range("ZENIT", zenith, 0.0, 90.0)?;
                in_range("AZIM", azimuth, 0.0, 360.0)
            }
            SolarGeometry::ElevationAzimuth { elevation, azimuth } => {
                in_range("ELEV", elevation, -90.0, 90.0)?;
                in_range("AZIM", azimuth, 0.0, 360.0)
            }
            SolarGeometry::AirMass { amass } => {
                finite("AMASS", amass)?;
                if amass < 1.0 {
                    return Err(SmartsError::invalid("AMASS", format!("{} is below 1", amass)));
                }
                Ok(())
            }
            SolarGeometry::DateTime {
                month,
                day,
                hour,
                latitude,
                longitude,
                zone,
                ..
            } => {
                month_in_range(month)?;
                if !(1..=31).contains(&day) {
                    return Err(SmartsError::invalid("DAY", format!("{} not in 1..31", day)));
                }
                in_range("HOUR", hour, 0.0, 24.0)?;
                in_range("LATIT", latitude, -90.0, 90.0)?;
                in_range("LONGIT", longitude, -180.0, 180.0)?;
                in_range("ZONE", zone, -12.0, 14.0)
            }
            SolarGeometry::Daily {
                month,
                latitude,
                step,
            } => {
                month_in_range(month)?;
                in_range("LATIT", latitude, -90.0, 90.0)?;
                positive("DSTEP", step)
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────
// 范围检查工具
// ─────────────────────────────────────────────────────────────

fn finite(field: &str, v: f64) -> Result<()> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(SmartsError::invalid(field, format!("{} is not a finite number", v)))
    }
}

fn in_range(field: &str, v: f64, min: f64, max: f64) -> Result<()> {
    finite(field, v)?;
    if v < min || v > max {
        return Err(SmartsError::invalid(
            field,
            format!("{} not in [{}, {}]", v, min, max),
        ));
    }
    Ok(())
}

fn open_range(field: &str, v: f64, min: f64, max: f64) -> Result<()> {
    finite(field, v)?;
    if v <= min || v >= max {
        return Err(SmartsError::invalid(
            field,
            format!("{} not in ({}, {})", v, min, max),
        ));
    }
    Ok(())
}

fn non_negative(field: &str, v: f64) -> Result<()> {
    finite(field, v)?;
    if v < 0.0 {
        return Err(SmartsError::invalid(field, format!("{} is negative", v)));
    }
    Ok(())
}

fn positive(field: &str, v: f64) -> Result<()> {
    finite(field, v)?;
    if v <= 0.0 {
        return Err(SmartsError::invalid(field, format!("{} must be positive", v)));
    }
    Ok(())
}

fn angle_or_tracking(field: &str, v: f64, max: f64) -> Result<()> {
    if v == SUN_TRACKING {
        return Ok(());
    }
    in_range(field, v, 0.0, max)
}

fn month_in_range(month: u32) -> Result<()> {
    if (1..=12).contains(&month) {
        Ok(())
    } else {
        Err(SmartsError::invalid("MONTH", format!("{} not in 1..12", month)))
    }
}

fn validate_albedo(field: &str, albedo: &Albedo) -> Result<()> {
    match *albedo {
        Albedo::Broadband(rho) => in_range(field, rho, 0.0, 1.0),
        Albedo::Spectral(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SimulationConfig {
        SimulationConfig::time_location(
            OutputVariable::parse_list("2 3 4").unwrap(),
            2001,
            6,
            21,
            12.0,
            32.0,
            -110.92,
            0.805,
            -7.0,
        )
    }

    fn field_of(err: SmartsError) -> String {
        match err {
            SmartsError::ValidationError { field, .. } => field,
            other => panic!("expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_comment_normalization() {
        let c = Comment::new("ASTMG173-03 (AM1.5 Standard)");
        assert_eq!(c.as_str(), "ASTMG173-03_(AM1.5_Standard)");
        assert_eq!(Comment::new(c.as_str()), c);

        let long = "x".repeat(70);
        assert_eq!(Comment::new(&long).as_str().len(), 61);
        assert_eq!(Comment::new("it's").as_str(), "its");
    }

    #[test]
    fn test_valid_preset_passes() {
        sample().validate().unwrap();
    }

    #[test]
    fn test_altitude_plus_height_limit() {
        let mut cfg = sample();
        cfg.pressure = SitePressure::PressureAltitude {
            spr: 1013.25,
            altitude: 60.0,
            height: 50.0,
        };
        assert_eq!(field_of(cfg.validate().unwrap_err()), "HEIGHT");
    }

    #[test]
    fn test_realistic_atmosphere_ranges() {
        let mut cfg = sample();
        cfg.atmosphere = Atmosphere::Realistic {
            air_temperature: 55.0,
            relative_humidity: 40.0,
            season: Season::Summer,
            daily_temperature: 20.0,
        };
        assert_eq!(field_of(cfg.validate().unwrap_err()), "TAIR");
    }

    #[test]
    fn test_outputs_must_be_unique_and_known() {
        let mut cfg = sample();
        cfg.print = PrintMode::Spreadsheet {
            window: PrintWindow {
                min: 280.0,
                max: 4000.0,
                interval: 0.5,
            },
            outputs: vec![OutputVariable(2), OutputVariable(2)],
        };
        assert_eq!(field_of(cfg.validate().unwrap_err()), "IOUT");

        cfg.print = PrintMode::Spreadsheet {
            window: PrintWindow {
                min: 280.0,
                max: 4000.0,
                interval: 0.5,
            },
            outputs: vec![OutputVariable(44)],
        };
        assert_eq!(field_of(cfg.validate().unwrap_err()), "IOUT");
    }

    #[test]
    fn test_print_window_inside_calculation_range() {
        let mut cfg = sample();
        cfg.range.min = 300.0;
        assert_eq!(field_of(cfg.validate().unwrap_err()), "WPMN");
    }

    #[test]
    fn test_sun_tracking_tilt_is_accepted() {
        let mut cfg = sample();
        cfg.tilt = Some(TiltedSurface {
            albedo: Albedo::Broadband(0.2),
            tilt: SUN_TRACKING,
            azimuth: SUN_TRACKING,
        });
        cfg.validate().unwrap();

        cfg.tilt = Some(TiltedSurface {
            albedo: Albedo::Broadband(1.5),
            tilt: 30.0,
            azimuth: 180.0,
        });
        assert_eq!(field_of(cfg.validate().unwrap_err()), "RHOG");
    }

    #[test]
    fn test_geometry_ranges() {
        let mut cfg = sample();
        cfg.geometry = SolarGeometry::AirMass { amass: 0.5 };
        assert_eq!(field_of(cfg.validate().unwrap_err()), "AMASS");

        cfg.geometry = SolarGeometry::Daily {
            month: 13,
            latitude: 10.0,
            step: 60.0,
        };
        assert_eq!(field_of(cfg.validate().unwrap_err()), "MONTH");
    }

    #[test]
    fn test_code_tables() {
        assert_eq!(SolarSpectrum::User.code(), -1);
        assert_eq!(SolarSpectrum::AstmE490.code(), 8);
        assert_eq!(SolarSpectrum::from_code(0), Some(SolarSpectrum::Gueymard2004));
        assert_eq!(SolarSpectrum::from_code(9), None);
        assert_eq!(AerosolModel::from_name("s&f_tropo"), Some(AerosolModel::ShettleFennTropospheric));
        assert_eq!(ReferenceAtmosphere::from_name("MLW"), Some(ReferenceAtmosphere::Mlw));
        assert_eq!(Illuminance::from_code(-2), Some(Illuminance::Cie1988));
    }

    #[test]
    fn test_json_round_trip() {
        let cfg = sample();
        let text = serde_json::to_string_pretty(&cfg).unwrap();
        assert!(text.contains("\"USSA\""));
        assert!(text.contains("\"LiteSoil\""));
        let back: SimulationConfig = serde_json::from_str(&text).unwrap();
        assert_eq!(back, cfg);
    }
}
