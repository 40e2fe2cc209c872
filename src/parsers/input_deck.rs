//! # SMARTS 输入卡片文件
//!
//! 生成与解析 `smarts295.inp.txt`。
//!
//! ## 格式
//! - 每张卡片一行，按 Card 1 - Card 17a 顺序
//! - 被选项跳过的卡片不输出任何行
//! - 字符串用单引号括起，实数总带小数点（`32` 写作 `32.`）
//! - IMASS = 4 的 Card 17a 用逗号分隔
//! - 文件末尾附加一个空行
//!
//! 解析按 Fortran 表控格式读取：引号字符串、空白或逗号分隔。
//!
//! ## 依赖关系
//! - 被 `pipeline.rs`, `commands/deck.rs`, `commands/inspect.rs` 使用
//! - 使用 `models/config.rs`
//! - 使用 `regex` 切分卡片字段

use crate::error::{Result, SmartsError};
use crate::models::catalog::{Material, OutputVariable};
use crate::models::config::*;

use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

const FORMAT: &str = "SMARTS input";

// ─────────────────────────────────────────────────────────────
// 写出
// ─────────────────────────────────────────────────────────────

/// 实数格式化，保证带小数点
pub fn fmt_real(x: f64) -> String {
    let s = format!("{}", x);
    if s.contains('.') || s.contains('e') || !x.is_finite() {
        s
    } else {
        format!("{}.", s)
    }
}

fn reals(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| fmt_real(*v))
        .collect::<Vec<_>>()
        .join(" ")
}

fn quoted(s: &str) -> String {
    format!("'{}'", s)
}

/// 生成输入卡片文件内容
pub fn to_input_string(config: &SimulationConfig) -> String {
    let mut lines: Vec<String> = Vec::new();

    // Card 1
    lines.push(quoted(config.comment.as_str()));

    // Card 2 / 2a
    lines.push(config.pressure.code().to_string());
    lines.push(match config.pressure {
        SitePressure::Pressure { spr } => fmt_real(spr),
        SitePressure::PressureAltitude {
            spr,
            altitude,
            height,
        } => reals(&[spr, altitude, height]),
        SitePressure::LatitudeAltitude {
            latitude,
            altitude,
            height,
        } => reals(&[latitude, altitude, height]),
    });

    // Card 3 / 3a
    lines.push(config.atmosphere.code().to_string());
    lines.push(match &config.atmosphere {
        Atmosphere::Realistic {
            air_temperature,
            relative_humidity,
            season,
            daily_temperature,
        } => format!(
            "{} {} {} {}",
            fmt_real(*air_temperature),
            fmt_real(*relative_humidity),
            season.as_str(),
            fmt_real(*daily_temperature)
        ),
        Atmosphere::Reference(atmos) => quoted(atmos.as_str()),
    });

    // Card 4 / 4a
    lines.push(config.water_vapor.code().to_string());
    if let WaterVapor::Precipitable { w } = config.water_vapor {
        lines.push(fmt_real(w));
    }

    // Card 5 / 5a
    lines.push(config.ozone.code().to_string());
    if let Ozone::User {
        altitude_correction,
        abundance,
    } = config.ozone
    {
        lines.push(format!(
            "{} {}",
            u8::from(altitude_correction),
            fmt_real(abundance)
        ));
    }

    // Card 6 / 6a / 6b
    lines.push(config.gas.code().to_string());
    if let GasAbsorption::Load(load) = &config.gas {
        lines.push(load.code().to_string());
        if let PollutionLoad::Custom(p) = load {
            // Card 6b 末尾保留一个空格
            lines.push(format!("{} ", reals(&p.values())));
        }
    }

    // Card 7 / 7a
    lines.push(fmt_real(config.co2));
    lines.push(config.spectrum.code().to_string());

    // Card 8 / 8a
    lines.push(quoted(config.aerosol.name()));
    if let Aerosol::User {
        alpha1,
        alpha2,
        omegl,
        gg,
    } = config.aerosol
    {
        lines.push(reals(&[alpha1, alpha2, omegl, gg]));
    }

    // Card 9 / 9a
    lines.push(config.turbidity.code().to_string());
    lines.push(fmt_real(config.turbidity.value()));

    // Card 10 / 10a
    lines.push(config.albedo.code().to_string());
    if let Albedo::Broadband(rho) = config.albedo {
        lines.push(fmt_real(rho));
    }

    // Card 10b / 10c / 10d
    match &config.tilt {
        None => lines.push("0".to_string()),
        Some(tilt) => {
            lines.push("1".to_string());
            lines.push(format!(
                "{} {} {}",
                tilt.albedo.code(),
                fmt_real(tilt.tilt),
                fmt_real(tilt.azimuth)
            ));
            if let Albedo::Broadband(rho) = tilt.albedo {
                lines.push(fmt_real(rho));
            }
        }
    }

    // Card 11
    let r = &config.range;
    lines.push(reals(&[r.min, r.max, r.suncor, r.solar_constant]));

    // Card 12 / 12a / 12b / 12c
    lines.push(config.print.code().to_string());
    if let Some(w) = config.print.window() {
        lines.push(reals(&[w.min, w.max, w.interval]));
    }
    if let Some(outputs) = config.print.spreadsheet_outputs() {
        lines.push(outputs.len().to_string());
        lines.push(
            outputs
                .iter()
                .map(|o| o.to_string())
                .collect::<Vec<_>>()
                .join(" "),
        );
    }

    // Card 13 / 13a
    match &config.circumsolar {
        None => lines.push("0".to_string()),
        Some(c) => {
            lines.push("1".to_string());
            lines.push(reals(&[c.slope, c.aperture, c.limit]));
        }
    }

    // Card 14 / 14a
    match &config.scan {
        None => lines.push("0".to_string()),
        Some(s) => {
            lines.push("1".to_string());
            lines.push(format!(
                "{} {}",
                s.filter.code(),
                reals(&[s.min, s.max, s.step, s.fwhm])
            ));
        }
    }

    // Card 15 / 16
    lines.push(config.illuminance.code().to_string());
    lines.push(u8::from(config.uv).to_string());

    // Card 17 / 17a
    lines.push(config.geometry.code().to_string());
    lines.push(match config.geometry {
        SolarGeometry::ZenithAzimuth { zenith, azimuth } => reals(&[zenith, azimuth]),
        SolarGeometry::ElevationAzimuth { elevation, azimuth } => reals(&[elevation, azimuth]),
        SolarGeometry::AirMass { amass } => fmt_real(amass),
        SolarGeometry::DateTime {
            year,
            month,
            day,
            hour,
            latitude,
            longitude,
            zone,
        } => format!(
            "{} {} {} {}",
            year,
            month,
            day,
            reals(&[hour, latitude, longitude, zone])
        ),
        SolarGeometry::Daily {
            month,
            latitude,
            step,
        } => format!("{}, {}, {}", month, fmt_real(latitude), fmt_real(step)),
    });

    let mut content = lines.join("\n");
    content.push_str("\n\n");
    content
}

/// 校验并写出输入文件
pub fn write_input_file(config: &SimulationConfig, path: &Path) -> Result<()> {
    config.validate()?;
    fs::write(path, to_input_string(config)).map_err(|e| SmartsError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })
}

// ─────────────────────────────────────────────────────────────
// 解析
// ─────────────────────────────────────────────────────────────

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"'([^']*)'|([^\s,']+)").expect("token pattern is a valid regex")
    })
}

/// 切分一行卡片，去掉字符串的引号
fn tokenize(line: &str) -> Vec<String> {
    token_pattern()
        .captures_iter(line)
        .filter_map(|c| c.get(1).or_else(|| c.get(2)))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// 逐卡片读取
struct DeckReader<'a> {
    source: &'a str,
    cards: Vec<(usize, Vec<String>)>,
    pos: usize,
}

impl<'a> DeckReader<'a> {
    fn new(content: &str, source: &'a str) -> Self {
        let cards = content
            .lines()
            .enumerate()
            .filter(|(_, l)| !l.trim().is_empty())
            .map(|(i, l)| (i + 1, tokenize(l)))
            .collect();
        DeckReader {
            source,
            cards,
            pos: 0,
        }
    }

    fn error(&self, reason: String) -> SmartsError {
        SmartsError::parse(FORMAT, self.source, reason)
    }

    /// 读取下一张卡片，要求恰好 `count` 个字段
    fn card(&mut self, name: &str, count: usize) -> Result<Card> {
        let (line, tokens) = self
            .cards
            .get(self.pos)
            .cloned()
            .ok_or_else(|| self.error(format!("unexpected end of file, expected card {}", name)))?;
        self.pos += 1;
        if tokens.len() != count {
            return Err(self.error(format!(
                "card {} on line {} has {} fields, expected {}",
                name,
                line,
                tokens.len(),
                count
            )));
        }
        Ok(Card {
            name: name.to_string(),
            line,
            tokens,
            source: self.source.to_string(),
        })
    }

    fn option(&mut self, name: &str) -> Result<i32> {
        self.card(name, 1)?.int(0)
    }

    fn finish(&self) -> Result<()> {
        match self.cards.get(self.pos) {
            None => Ok(()),
            Some((line, _)) => Err(self.error(format!("unexpected content on line {}", line))),
        }
    }
}

struct Card {
    name: String,
    line: usize,
    tokens: Vec<String>,
    source: String,
}

impl Card {
    fn error(&self, idx: usize, what: &str) -> SmartsError {
        SmartsError::parse(
            FORMAT,
            self.source.as_str(),
            format!(
                "card {} on line {}: field {} '{}' is not {}",
                self.name,
                self.line,
                idx + 1,
                self.tokens[idx],
                what
            ),
        )
    }

    fn real(&self, idx: usize) -> Result<f64> {
        let tok = &self.tokens[idx];
        tok.parse::<f64>().map_err(|_| self.error(idx, "a number"))
    }

    fn int(&self, idx: usize) -> Result<i32> {
        let tok = &self.tokens[idx];
        tok.parse::<i32>().map_err(|_| self.error(idx, "an integer"))
    }

    fn uint(&self, idx: usize) -> Result<u32> {
        let tok = &self.tokens[idx];
        tok.parse::<u32>().map_err(|_| self.error(idx, "a positive integer"))
    }

    fn text(&self, idx: usize) -> &str {
        &self.tokens[idx]
    }

    fn unknown(&self, value: i32) -> SmartsError {
        SmartsError::parse(
            FORMAT,
            self.source.as_str(),
            format!(
                "card {} on line {}: unknown option {}",
                self.name, self.line, value
            ),
        )
    }
}

/// 解析输入卡片文件内容
pub fn parse_input_content(content: &str, source: &str) -> Result<SimulationConfig> {
    let mut deck = DeckReader::new(content, source);

    // Card 1
    let comment = Comment::new(deck.card("1 (CMNT)", 1)?.text(0));

    // Card 2
    let pressure = match deck.option("2 (ISPR)")? {
        0 => {
            let c = deck.card("2a (SPR)", 1)?;
            SitePressure::Pressure { spr: c.real(0)? }
        }
        1 => {
            let c = deck.card("2a (SPR ALTIT HEIGHT)", 3)?;
            SitePressure::PressureAltitude {
                spr: c.real(0)?,
                altitude: c.real(1)?,
                height: c.real(2)?,
            }
        }
        2 => {
            let c = deck.card("2a (LATIT ALTIT HEIGHT)", 3)?;
            SitePressure::LatitudeAltitude {
                latitude: c.real(0)?,
                altitude: c.real(1)?,
                height: c.real(2)?,
            }
        }
        other => return Err(deck.error(format!("unknown ISPR option {}", other))),
    };

    // Card 3
    let atmosphere = match deck.option("3 (IATMOS)")? {
        0 => {
            let c = deck.card("3a (TAIR RH SEASON TDAY)", 4)?;
            let season = Season::from_name(c.text(2))
                .ok_or_else(|| c.error(2, "WINTER or SUMMER"))?;
            Atmosphere::Realistic {
                air_temperature: c.real(0)?,
                relative_humidity: c.real(1)?,
                season,
                daily_temperature: c.real(3)?,
            }
        }
        1 => {
            let c = deck.card("3a (ATMOS)", 1)?;
            let atmos = ReferenceAtmosphere::from_name(c.text(0))
                .ok_or_else(|| c.error(0, "a reference atmosphere"))?;
            Atmosphere::Reference(atmos)
        }
        other => return Err(deck.error(format!("unknown IATMOS option {}", other))),
    };

    // Card 4
    let water_vapor = match deck.option("4 (IH2O)")? {
        0 => WaterVapor::Precipitable {
            w: deck.card("4a (W)", 1)?.real(0)?,
        },
        1 => WaterVapor::FromReference,
        2 => WaterVapor::FromTemperatureHumidity,
        other => return Err(deck.error(format!("unknown IH2O option {}", other))),
    };

    // Card 5
    let ozone = match deck.option("5 (IO3)")? {
        0 => {
            let c = deck.card("5a (IALT AbO3)", 2)?;
            let altitude_correction = match c.int(0)? {
                0 => false,
                1 => true,
                other => return Err(c.unknown(other)),
            };
            Ozone::User {
                altitude_correction,
                abundance: c.real(1)?,
            }
        }
        1 => Ozone::FromReference,
        other => return Err(deck.error(format!("unknown IO3 option {}", other))),
    };

    // Card 6
    let gas = match deck.option("6 (IGAS)")? {
        0 => {
            let load = match deck.option("6a (ILOAD)")? {
                0 => {
                    let c = deck.card("6b (pollutants)", 10)?;
                    let mut values = [0.0; 10];
                    for (i, v) in values.iter_mut().enumerate() {
                        *v = c.real(i)?;
                    }
                    PollutionLoad::Custom(Pollutants::from_values(values))
                }
                1 => PollutionLoad::Pristine,
                2 => PollutionLoad::Light,
                3 => PollutionLoad::Moderate,
                4 => PollutionLoad::Severe,
                other => return Err(deck.error(format!("unknown ILOAD option {}", other))),
            };
            GasAbsorption::Load(load)
        }
        1 => GasAbsorption::Default,
        other => return Err(deck.error(format!("unknown IGAS option {}", other))),
    };

    // Card 7 / 7a
    let co2 = deck.card("7 (qCO2)", 1)?.real(0)?;
    let c = deck.card("7a (ISPCTR)", 1)?;
    let spectrum = SolarSpectrum::from_code(c.int(0)?).ok_or_else(|| c.error(0, "in -1..8"))?;

    // Card 8
    let c = deck.card("8 (AEROS)", 1)?;
    let aerosol = if c.text(0).eq_ignore_ascii_case("USER") {
        let a = deck.card("8a (ALPHA1 ALPHA2 OMEGL GG)", 4)?;
        Aerosol::User {
            alpha1: a.real(0)?,
            alpha2: a.real(1)?,
            omegl: a.real(2)?,
            gg: a.real(3)?,
        }
    } else {
        Aerosol::Model(
            AerosolModel::from_name(c.text(0)).ok_or_else(|| c.error(0, "an aerosol model"))?,
        )
    };

    // Card 9
    let code = deck.option("9 (ITURB)")?;
    let value = deck.card("9a (turbidity)", 1)?.real(0)?;
    let turbidity = Turbidity::from_code(code, value)
        .ok_or_else(|| deck.error(format!("unknown ITURB option {}", code)))?;

    // Card 10 / 10a
    let albedo = read_albedo(&mut deck, "10 (IALBDX)", "10a (RHOX)")?;

    // Card 10b
    let tilt = match deck.option("10b (ITILT)")? {
        0 => None,
        1 => {
            let c = deck.card("10c (IALBDG TILT WAZIM)", 3)?;
            let code = c.int(0)?;
            let albedo = if code == -1 {
                Albedo::Broadband(deck.card("10d (RHOG)", 1)?.real(0)?)
            } else {
                Albedo::Spectral(Material::from_code(code).map_err(|_| c.unknown(code))?)
            };
            Some(TiltedSurface {
                albedo,
                tilt: c.real(1)?,
                azimuth: c.real(2)?,
            })
        }
        other => return Err(deck.error(format!("unknown ITILT option {}", other))),
    };

    // Card 11
    let c = deck.card("11 (WLMN WLMX SUNCOR SOLARC)", 4)?;
    let range = SpectralRange {
        min: c.real(0)?,
        max: c.real(1)?,
        suncor: c.real(2)?,
        solar_constant: c.real(3)?,
    };

    // Card 12
    let iprt = deck.option("12 (IPRT)")?;
    let print = if iprt == 0 {
        PrintMode::Broadband
    } else {
        let c = deck.card("12a (WPMN WPMX INTVL)", 3)?;
        let window = PrintWindow {
            min: c.real(0)?,
            max: c.real(1)?,
            interval: c.real(2)?,
        };
        match iprt {
            1 => PrintMode::Spectral16 { window },
            2 | 3 => {
                let c = deck.card("12b (IOTOT)", 1)?;
                let count = c.uint(0)? as usize;
                let c = deck.card("12c (IOUT)", count)?;
                let outputs = (0..count)
                    .map(|i| {
                        let code = c.uint(i)?;
                        u8::try_from(code)
                            .map(OutputVariable)
                            .map_err(|_| c.error(i, "an output code"))
                    })
                    .collect::<Result<Vec<_>>>()?;
                if iprt == 2 {
                    PrintMode::Spreadsheet { window, outputs }
                } else {
                    PrintMode::Both { window, outputs }
                }
            }
            other => return Err(deck.error(format!("unknown IPRT option {}", other))),
        }
    };

    // Card 13
    let circumsolar = match deck.option("13 (ICIRC)")? {
        0 => None,
        1 => {
            let c = deck.card("13a (SLOPE APERT LIMIT)", 3)?;
            Some(Circumsolar {
                slope: c.real(0)?,
                aperture: c.real(1)?,
                limit: c.real(2)?,
            })
        }
        other => return Err(deck.error(format!("unknown ICIRC option {}", other))),
    };

    // Card 14
    let scan = match deck.option("14 (ISCAN)")? {
        0 => None,
        1 => {
            let c = deck.card("14a (IFILT WV1 WV2 STEP FWHM)", 5)?;
            let code = c.int(0)?;
            Some(ScanFilter {
                filter: FilterShape::from_code(code).ok_or_else(|| c.unknown(code))?,
                min: c.real(1)?,
                max: c.real(2)?,
                step: c.real(3)?,
                fwhm: c.real(4)?,
            })
        }
        other => return Err(deck.error(format!("unknown ISCAN option {}", other))),
    };

    // Card 15 / 16
    let code = deck.option("15 (ILLUM)")?;
    let illuminance = Illuminance::from_code(code)
        .ok_or_else(|| deck.error(format!("unknown ILLUM option {}", code)))?;
    let uv = match deck.option("16 (IUV)")? {
        0 => false,
        1 => true,
        other => return Err(deck.error(format!("unknown IUV option {}", other))),
    };

    // Card 17
    let geometry = match deck.option("17 (IMASS)")? {
        0 => {
            let c = deck.card("17a (ZENIT AZIM)", 2)?;
            SolarGeometry::ZenithAzimuth {
                zenith: c.real(0)?,
                azimuth: c.real(1)?,
            }
        }
        1 => {
            let c = deck.card("17a (ELEV AZIM)", 2)?;
            SolarGeometry::ElevationAzimuth {
                elevation: c.real(0)?,
                azimuth: c.real(1)?,
            }
        }
        2 => SolarGeometry::AirMass {
            amass: deck.card("17a (AMASS)", 1)?.real(0)?,
        },
        3 => {
            let c = deck.card("17a (YEAR MONTH DAY HOUR LATIT LONGIT ZONE)", 7)?;
            SolarGeometry::DateTime {
                year: c.int(0)?,
                month: c.uint(1)?,
                day: c.uint(2)?,
                hour: c.real(3)?,
                latitude: c.real(4)?,
                longitude: c.real(5)?,
                zone: c.real(6)?,
            }
        }
        4 => {
            let c = deck.card("17a (MONTH LATIT DSTEP)", 3)?;
            SolarGeometry::Daily {
                month: c.uint(0)?,
                latitude: c.real(1)?,
                step: c.real(2)?,
            }
        }
        other => return Err(deck.error(format!("unknown IMASS option {}", other))),
    };

    deck.finish()?;

    Ok(SimulationConfig {
        comment,
        pressure,
        atmosphere,
        water_vapor,
        ozone,
        gas,
        co2,
        spectrum,
        aerosol,
        turbidity,
        albedo,
        tilt,
        range,
        print,
        circumsolar,
        scan,
        illuminance,
        uv,
        geometry,
    })
}

fn read_albedo(deck: &mut DeckReader<'_>, card: &str, rho_card: &str) -> Result<Albedo> {
    let c = deck.card(card, 1)?;
    let code = c.int(0)?;
    if code == -1 {
        Ok(Albedo::Broadband(deck.card(rho_card, 1)?.real(0)?))
    } else {
        Material::from_code(code)
            .map(Albedo::Spectral)
            .map_err(|_| c.unknown(code))
    }
}

/// 解析输入卡片文件
pub fn parse_input_file(path: &Path) -> Result<SimulationConfig> {
    let content = fs::read_to_string(path).map_err(|e| SmartsError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_input_content(&content, &path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spectra_preset() -> SimulationConfig {
        SimulationConfig::time_location(
            OutputVariable::parse_list("2 3").unwrap(),
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

    /// 覆盖所有可选卡片的配置
    fn everything() -> SimulationConfig {
        SimulationConfig {
            comment: Comment::new("full deck"),
            pressure: SitePressure::LatitudeAltitude {
                latitude: 39.74,
                altitude: 1.829,
                height: 0.25,
            },
            atmosphere: Atmosphere::Realistic {
                air_temperature: 21.5,
                relative_humidity: 33.0,
                season: Season::Summer,
                daily_temperature: 18.0,
            },
            water_vapor: WaterVapor::Precipitable { w: 0.79 },
            ozone: Ozone::User {
                altitude_correction: true,
                abundance: 0.31,
            },
            gas: GasAbsorption::Load(PollutionLoad::Custom(Pollutants::from_values([
                0.001, 0.2, 0.1, 0.0001, 0.0005, 0.0002, 0.0003, 0.00005, 0.007, 0.0001,
            ]))),
            co2: 415.0,
            spectrum: SolarSpectrum::AstmE490,
            aerosol: Aerosol::User {
                alpha1: 0.1949,
                alpha2: 0.0,
                omegl: 0.9802,
                gg: 0.7417,
            },
            turbidity: Turbidity::Beta(0.0309),
            albedo: Albedo::Broadband(0.2),
            tilt: Some(TiltedSurface {
                albedo: Albedo::Broadband(0.25),
                tilt: SUN_TRACKING,
                azimuth: SUN_TRACKING,
            }),
            range: SpectralRange {
                min: 300.0,
                max: 2500.0,
                suncor: 1.0,
                solar_constant: 1366.1,
            },
            print: PrintMode::Both {
                window: PrintWindow {
                    min: 300.0,
                    max: 2500.0,
                    interval: 1.0,
                },
                outputs: OutputVariable::parse_list("2 3 4 30 31").unwrap(),
            },
            circumsolar: Some(Circumsolar {
                slope: 0.0,
                aperture: 2.9,
                limit: 0.0,
            }),
            scan: Some(ScanFilter {
                filter: FilterShape::Gaussian,
                min: 300.0,
                max: 2500.0,
                step: 2.0,
                fwhm: 6.0,
            }),
            illuminance: Illuminance::Cie1988Efficacy,
            uv: true,
            geometry: SolarGeometry::Daily {
                month: 10,
                latitude: 39.74,
                step: 30.0,
            },
        }
    }

    #[test]
    fn test_fmt_real_keeps_decimal_point() {
        assert_eq!(fmt_real(32.0), "32.");
        assert_eq!(fmt_real(-110.92), "-110.92");
        assert_eq!(fmt_real(0.0), "0.");
        assert_eq!(fmt_real(1013.25), "1013.25");
    }

    #[test]
    fn test_spectra_preset_deck_layout() {
        let deck = to_input_string(&spectra_preset());
        let expected = "'ASTMG173-03_(AM1.5_Standard)'\n\
                        1\n\
                        1013.25 0.805 0.\n\
                        1\n\
                        'USSA'\n\
                        1\n\
                        1\n\
                        0\n\
                        1\n\
                        0.\n\
                        0\n\
                        'S&F_TROPO'\n\
                        0\n\
                        0.\n\
                        38\n\
                        1\n\
                        38 32. 180.\n\
                        280. 4000. 1. 1367.\n\
                        2\n\
                        280. 4000. 0.5\n\
                        2\n\
                        2 3\n\
                        0\n\
                        0\n\
                        0\n\
                        0\n\
                        3\n\
                        2001 6 21 12. 32. -110.92 -7.\n\n";
        assert_eq!(deck, expected);
    }

    #[test]
    fn test_optional_cards_layout() {
        let deck = to_input_string(&everything());
        assert!(deck.contains("\n21.5 33. SUMMER 18.\n"));
        assert!(deck.contains("\n0.001 0.2 0.1 0.0001 0.0005 0.0002 0.0003 0.00005 0.007 0.0001 \n"));
        assert!(deck.contains("\n'USER'\n0.1949 0. 0.9802 0.7417\n"));
        assert!(deck.contains("\n-1\n0.2\n1\n-1 -999. -999.\n0.25\n"));
        assert!(deck.contains("\n2 300. 2500. 2. 6.\n"));
        assert!(deck.ends_with("\n4\n10, 39.74, 30.\n\n"));
    }

    #[test]
    fn test_round_trip_presets_and_full_deck() {
        let material = Material::from_name("DryGrass").unwrap();
        let configs = vec![
            spectra_preset(),
            everything(),
            SimulationConfig::albedo_spectrum(
                material,
                SpectralRange::default(),
                0.5,
                SolarGeometry::ZenithAzimuth {
                    zenith: 0.0,
                    azimuth: 180.0,
                },
            ),
            SimulationConfig::air_mass(vec![OutputVariable(30)], 1.5, material),
        ];

        for config in configs {
            config.validate().unwrap();
            let deck = to_input_string(&config);
            let parsed = parse_input_content(&deck, "round_trip").unwrap();
            assert_eq!(parsed, config, "deck:\n{}", deck);
        }
    }

    #[test]
    fn test_round_trip_variants() {
        let mut config = spectra_preset();
        config.pressure = SitePressure::Pressure { spr: 845.0 };
        config.gas = GasAbsorption::Default;
        config.turbidity = Turbidity::Visibility(23.0);
        config.tilt = None;
        config.print = PrintMode::Broadband;
        config.geometry = SolarGeometry::ElevationAzimuth {
            elevation: 41.8,
            azimuth: 135.0,
        };
        config.validate().unwrap();

        let parsed = parse_input_content(&to_input_string(&config), "variants").unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_parse_rejects_truncated_deck() {
        let deck = to_input_string(&spectra_preset());
        let truncated: String = deck.lines().take(10).collect::<Vec<_>>().join("\n");

        match parse_input_content(&truncated, "short") {
            Err(SmartsError::ParseError { reason, .. }) => {
                assert!(reason.contains("unexpected end of file"), "{}", reason)
            }
            other => panic!("expected ParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_bad_field() {
        let deck = to_input_string(&spectra_preset()).replace("1013.25", "ten");
        assert!(matches!(
            parse_input_content(&deck, "bad"),
            Err(SmartsError::ParseError { .. })
        ));
    }

    #[test]
    fn test_write_input_file_validates_first() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("smarts295.inp.txt");

        let mut config = spectra_preset();
        config.range.max = 5000.0;
        assert!(matches!(
            write_input_file(&config, &path),
            Err(SmartsError::ValidationError { .. })
        ));
        assert!(!path.exists());

        let config = spectra_preset();
        write_input_file(&config, &path).unwrap();
        assert_eq!(parse_input_file(&path).unwrap(), config);
    }
}
