//! # SMARTS 代码表
//!
//! 地表材料（IALBDX / IALBDG）和输出变量（IOUT）的编号对照表。
//!
//! ## 依赖关系
//! - 被 `models/config.rs`, `models/presets.rs` 使用
//! - 被 `commands/catalog.rs` 用于列表输出

use crate::error::{Result, SmartsError};
use serde::{Deserialize, Serialize};

/// 材料表: (名称, IALBDX 代码, 描述)
const MATERIALS: &[(&str, u8, &str)] = &[
    ("UsrLamb", 0, "User-defined spectral reflectance, Lambertian"),
    ("UsrNLamb", 1, "User-defined spectral reflectance, non-Lambertian"),
    ("Water", 2, "Water or calm ocean (calculated)"),
    ("Snow", 3, "Fresh dry snow"),
    ("Neve", 4, "Snow on a mountain neve"),
    ("Basalt", 5, "Basalt rock"),
    ("Dry_sand", 6, "Dry sand"),
    ("WiteSand", 7, "Sand from White Sands, NM"),
    ("Soil", 8, "Bare soil"),
    ("Dry_clay", 9, "Dry clay soil"),
    ("Wet_clay", 10, "Wet clay soil"),
    ("Alfalfa", 11, "Alfalfa"),
    ("Grass", 12, "Green grass"),
    ("RyeGrass", 13, "Perennial rye grass"),
    ("Meadow1", 14, "Alpine meadow"),
    ("Meadow2", 15, "Lush meadow"),
    ("Wheat", 16, "Wheat crop"),
    ("PineTree", 17, "Ponderosa pine tree"),
    ("Concrete", 18, "Concrete slab"),
    ("BlckLoam", 19, "Black loam"),
    ("BrwnLoam", 20, "Brown loam"),
    ("BrwnSand", 21, "Brown sand"),
    ("Conifers", 22, "Conifer trees"),
    ("DarkLoam", 23, "Dark loam"),
    ("DarkSand", 24, "Dark sand"),
    ("Decidous", 25, "Decidous trees"),
    ("DryGrass", 26, "Dry grass (sod)"),
    ("DuneSand", 27, "Dune sand"),
    ("FineSnow", 28, "Fresh fine snow"),
    ("GrnGrass", 29, "Green rye grass (sod)"),
    ("GrnlSnow", 30, "Granular snow"),
    ("LiteClay", 31, "Light clay"),
    ("LiteLoam", 32, "Light loam"),
    ("LiteSand", 33, "Light sand"),
    ("PaleLoam", 34, "Pale loam"),
    ("Seawater", 35, "Sea water"),
    ("SolidIce", 36, "Solid ice"),
    ("Dry_Soil", 37, "Dry soil"),
    ("LiteSoil", 38, "Light soil"),
    ("RConcrte", 39, "Old runway concrete"),
    ("RoofTile", 40, "Terracota roofing clay tile"),
    ("RedBrick", 41, "Red construction brick"),
    ("Asphalt", 42, "Old runway asphalt"),
    ("TallCorn", 43, "Tall green corn"),
    ("SndGravl", 44, "Sand & gravel"),
    ("Fallow", 45, "Fallow field"),
    ("Birch", 46, "Birch leaves"),
    ("WetSoil", 47, "Wet sandy soil"),
    ("Gravel", 48, "Gravel"),
    ("WetClay2", 49, "Wet red clay"),
    ("WetSilt", 50, "Wet silt"),
    ("LngGrass", 51, "Dry long grass"),
    ("LwnGrass", 52, "Lawn grass (generic bluegrass)"),
    ("OakTree", 53, "Deciduous oak tree leaves"),
    ("Pinion", 54, "Pinion pinetree needles"),
    ("MeltSnow", 55, "Melting snow (slush)"),
    ("Plywood", 56, "Plywood sheet (new, pine, 4-ply)"),
    ("WiteVinl", 57, "White vinyl plastic sheet, 0.15 mm"),
    ("FibrGlss", 58, "Clear fiberglass greenhouse roofing"),
    ("ShtMetal", 59, "Galvanized corrugated sheet metal, new"),
    ("Wetland", 60, "Wetland vegetation canopy, Yellowstone"),
    ("SageBrsh", 61, "Sagebrush canopy, Yellowstone"),
    ("FirTrees", 62, "Fir trees, Colorado"),
    ("CSeaWatr", 63, "Coastal seawater, Pacific"),
    ("OSeaWatr", 64, "Open ocean seawater, Atlantic"),
    ("GrazingField", 65, "Grazing field (unfertilized)"),
    ("Spruce", 66, "Young Norway spruce tree (needles)"),
];

/// 输出变量表: (IOUT 代码, 描述, 单位)
const OUTPUT_VARIABLES: &[(u8, &str, &str)] = &[
    (1, "Extraterrestrial spectrum", "W m-2"),
    (2, "Direct normal irradiance", "W m-2"),
    (3, "Diffuse horizontal irradiance", "W m-2"),
    (4, "Global horizontal irradiance", "W m-2"),
    (5, "Direct horizontal irradiance", "W m-2"),
    (6, "Direct tilted irradiance", "W m-2"),
    (7, "Diffuse tilted irradiance", "W m-2"),
    (8, "Global tilted irradiance", "W m-2"),
    (9, "Experimental direct normal irradiance (with circumsolar)", "W m-2"),
    (10, "Experimental diffuse horizontal irradiance", "W m-2"),
    (11, "Circumsolar irradiance within radiometer field of view", "W m-2"),
    (12, "Global tilted photon flux per wavelength", "cm-2 s-1 nm-1"),
    (13, "Direct normal photon flux per wavelength", "cm-2 s-1 nm-1"),
    (14, "Diffuse horizontal photon flux per wavelength", "cm-2 s-1 nm-1"),
    (15, "Rayleigh transmittance", ""),
    (16, "Ozone transmittance", ""),
    (17, "Transmittance from all trace gases", ""),
    (18, "Water vapor transmittance", ""),
    (19, "Mixed gas transmittance", ""),
    (20, "Aerosol transmittance", ""),
    (21, "Beam radiation transmittance", ""),
    (22, "Rayleigh optical thickness", ""),
    (23, "Ozone optical thickness", ""),
    (24, "Optical thickness from all trace gases", ""),
    (25, "Water vapor optical thickness", ""),
    (26, "Mixed gas optical thickness", ""),
    (27, "Aerosol optical thickness", ""),
    (28, "Aerosol single scattering albedo", ""),
    (29, "Aerosol asymmetry factor", ""),
    (30, "Zonal surface reflectance", ""),
    (31, "Local ground reflectance", ""),
    (32, "Atmospheric reflectance", ""),
    (33, "Global foreground reflected irradiance on tilted surface", "W m-2"),
    (34, "Upward hemispheric ground-reflected irradiance", "W m-2"),
    (35, "Global horizontal photosynthetic photon flux", "umol m-2 s-1 nm-1"),
    (36, "Direct normal photosynthetic photon flux", "umol m-2 s-1 nm-1"),
    (37, "Diffuse horizontal photosynthetic photon flux", "umol m-2 s-1 nm-1"),
    (38, "Global tilted photosynthetic photon flux", "umol m-2 s-1 nm-1"),
    (39, "Spectral photonic energy", "eV"),
    (40, "Global horizontal photon flux per eV", "cm-2 s-1 eV-1"),
    (41, "Direct normal photon flux per eV", "cm-2 s-1 eV-1"),
    (42, "Diffuse horizontal photon flux per eV", "cm-2 s-1 eV-1"),
    (43, "Global tilted photon flux per eV", "cm-2 s-1 eV-1"),
];

// ─────────────────────────────────────────────────────────────
// 地表材料
// ─────────────────────────────────────────────────────────────

/// 地表材料（SMARTS 反射率文件）
///
/// 序列化为材料名称，例如 `"LiteSoil"`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Material(u8);

impl Material {
    /// 浅色土壤，`SMARTSSpectra` 的默认远场反照率
    pub const LIGHT_SOIL: Material = Material(38);

    /// 按名称查找（不区分大小写）
    pub fn from_name(name: &str) -> Result<Self> {
        MATERIALS
            .iter()
            .find(|(n, _, _)| n.eq_ignore_ascii_case(name.trim()))
            .map(|(_, code, _)| Material(*code))
            .ok_or_else(|| {
                SmartsError::invalid("material", format!("unknown material '{}'", name))
            })
    }

    /// 按 IALBDX 代码查找
    pub fn from_code(code: i32) -> Result<Self> {
        MATERIALS
            .iter()
            .find(|(_, c, _)| i32::from(*c) == code)
            .map(|(_, c, _)| Material(*c))
            .ok_or_else(|| {
                SmartsError::invalid("IALBDX", format!("no material with code {}", code))
            })
    }

    pub fn code(self) -> u8 {
        self.0
    }

    pub fn name(self) -> &'static str {
        self.entry().0
    }

    pub fn description(self) -> &'static str {
        self.entry().2
    }

    /// 所有材料，按代码排序
    pub fn all() -> impl Iterator<Item = Material> {
        MATERIALS.iter().map(|(_, code, _)| Material(*code))
    }

    fn entry(self) -> &'static (&'static str, u8, &'static str) {
        // 构造函数保证代码一定在表中
        &MATERIALS[usize::from(self.0)]
    }
}

impl std::fmt::Display for Material {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl TryFrom<String> for Material {
    type Error = SmartsError;

    fn try_from(value: String) -> Result<Self> {
        Material::from_name(&value)
    }
}

impl From<Material> for String {
    fn from(value: Material) -> Self {
        value.name().to_string()
    }
}

// ─────────────────────────────────────────────────────────────
// 输出变量
// ─────────────────────────────────────────────────────────────

/// SMARTS 输出变量（Card 12c 的 IOUT 代码）
///
/// 有效范围为 1..=43，由 `SimulationConfig::validate` 检查。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutputVariable(pub u8);

impl OutputVariable {
    pub const EXTRATERRESTRIAL: OutputVariable = OutputVariable(1);
    pub const DIRECT_NORMAL: OutputVariable = OutputVariable(2);
    pub const DIFFUSE_HORIZONTAL: OutputVariable = OutputVariable(3);
    pub const GLOBAL_HORIZONTAL: OutputVariable = OutputVariable(4);
    pub const GLOBAL_TILTED: OutputVariable = OutputVariable(8);
    pub const ZONAL_REFLECTANCE: OutputVariable = OutputVariable(30);

    pub const MAX_CODE: u8 = 43;

    pub fn code(self) -> u8 {
        self.0
    }

    pub fn is_known(self) -> bool {
        (1..=Self::MAX_CODE).contains(&self.0)
    }

    pub fn description(self) -> &'static str {
        self.entry().map(|e| e.1).unwrap_or("Unknown output")
    }

    pub fn unit(self) -> &'static str {
        self.entry().map(|e| e.2).unwrap_or("")
    }

    /// 所有输出变量
    pub fn all() -> impl Iterator<Item = OutputVariable> {
        OUTPUT_VARIABLES.iter().map(|(code, _, _)| OutputVariable(*code))
    }

    /// 解析空格或逗号分隔的代码列表，如 `"2 3 4"`
    pub fn parse_list(text: &str) -> Result<Vec<OutputVariable>> {
        text.split(|c: char| c.is_whitespace() || c == ',')
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<u8>().map(OutputVariable).map_err(|_| {
                    SmartsError::invalid("IOUT", format!("'{}' is not an output code", s))
                })
            })
            .collect()
    }

    fn entry(self) -> Option<&'static (u8, &'static str, &'static str)> {
        OUTPUT_VARIABLES.iter().find(|(code, _, _)| *code == self.0)
    }
}

impl std::fmt::Display for OutputVariable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_table_is_indexed_by_code() {
        for (i, (_, code, _)) in MATERIALS.iter().enumerate() {
            assert_eq!(i, usize::from(*code));
        }
        assert_eq!(Material::all().count(), 67);
    }

    #[test]
    fn test_material_lookup() {
        let m = Material::from_name("drygrass").unwrap();
        assert_eq!(m.code(), 26);
        assert_eq!(m.name(), "DryGrass");
        assert_eq!(Material::from_code(38).unwrap(), Material::LIGHT_SOIL);
        assert!(Material::from_name("Lava").is_err());
        assert!(Material::from_code(67).is_err());
    }

    #[test]
    fn test_output_list_parsing() {
        let outs = OutputVariable::parse_list("2 3, 4").unwrap();
        assert_eq!(outs, vec![OutputVariable(2), OutputVariable(3), OutputVariable(4)]);
        assert!(OutputVariable::parse_list("2 x").is_err());
        assert!(!OutputVariable(44).is_known());
        assert_eq!(OutputVariable::GLOBAL_HORIZONTAL.unit(), "W m-2");
    }
}
