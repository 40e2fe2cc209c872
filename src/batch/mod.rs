//! # 批量处理模块
//!
//! 批量收集并运行 SMARTS 算例。
//!
//! ## 功能
//! - 收集 JSON 算例文件
//! - 并行运行，每个算例独立工作目录
//! - 进度反馈与统计
//!
//! ## 依赖关系
//! - 被 `commands/batch.rs` 使用
//! - 使用 `rayon` 进行并行处理
//! - 使用 `indicatif` 显示进度

pub mod collector;
pub mod runner;

pub use collector::FileCollector;
pub use runner::{BatchResult, BatchRunner, CaseOutcome};
