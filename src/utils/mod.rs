//! # 工具函数模块
//!
//! 提供美化输出、进度条、数据导出与绘图等工具。
//!
//! ## 依赖关系
//! - 被 `commands/`, `batch/` 模块使用
//! - 子模块: output, progress, export, table, plot

pub mod export;
pub mod output;
pub mod plot;
pub mod progress;
pub mod table;
