//! # 数据模型模块
//!
//! 定义模拟参数、执行结果和光谱数据模型。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `process/`, `pipeline.rs` 和 `commands/` 使用
//! - 子模块: catalog, config, presets, spectrum, execution

pub mod catalog;
pub mod config;
pub mod execution;
pub mod presets;
pub mod spectrum;

pub use catalog::{Material, OutputVariable};
pub use config::SimulationConfig;
pub use execution::{ExecutionResult, OutputFiles};
pub use spectrum::{SpectralRecord, Spectrum};
