//! # 解析器模块
//!
//! SMARTS 外部文件格式的读写，所有第三方格式细节集中于此。
//!
//! ## 依赖关系
//! - 被 `pipeline.rs` 和 `commands/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: input_deck, spectrum

pub mod input_deck;
pub mod spectrum;

pub use input_deck::{parse_input_content, parse_input_file, to_input_string, write_input_file};
pub use spectrum::{parse_spectrum_content, parse_spectrum_file, ExpectedLayout};

use crate::error::Result;
use crate::models::execution::INPUT_FILE;
use std::path::Path;

/// 可由 `inspect` 识别的文件种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    InputDeck,
    Spectrum,
}

/// 从文件名推断种类
///
/// `.inp.txt` / `.inp` 视为输入卡片，其他都按表格输出处理。
pub fn detect_kind(path: &Path) -> FileKind {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    if name == INPUT_FILE || name.ends_with(".inp.txt") || name.ends_with(".inp") {
        FileKind::InputDeck
    } else {
        FileKind::Spectrum
    }
}

/// 不限定布局地读取表格输出
pub fn read_spectrum(path: &Path) -> Result<crate::models::Spectrum> {
    parse_spectrum_file(path, ExpectedLayout::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_kind() {
        assert_eq!(detect_kind(Path::new("smarts295.inp.txt")), FileKind::InputDeck);
        assert_eq!(detect_kind(Path::new("case/site.INP.TXT")), FileKind::InputDeck);
        assert_eq!(detect_kind(Path::new("smarts295.ext.txt")), FileKind::Spectrum);
        assert_eq!(detect_kind(Path::new("smarts295.scn.txt")), FileKind::Spectrum);
    }
}
