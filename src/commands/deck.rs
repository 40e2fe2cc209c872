//! # deck 命令实现
//!
//! 校验 JSON 配置并生成 SMARTS 输入卡片文件，不运行 SMARTS。
//!
//! ## 依赖关系
//! - 使用 `cli/deck.rs` 定义的参数
//! - 使用 `parsers/input_deck.rs`

use super::load_config;
use crate::cli::deck::DeckArgs;
use crate::error::Result;
use crate::parsers;
use crate::utils::output;

/// 执行 deck 命令
pub fn execute(args: DeckArgs) -> Result<()> {
    let config = load_config(&args.config)?;

    match &args.output {
        Some(path) => {
            parsers::write_input_file(&config, path)?;
            output::print_written("input deck", path);
        }
        None => {
            config.validate()?;
            print!("{}", parsers::to_input_string(&config));
        }
    }
    Ok(())
}
