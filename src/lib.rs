//! # rsmarts - SMARTS 太阳光谱模型调用库
//!
//! 为 SMARTS 2.9.5 (Simple Model of the Atmospheric Radiative Transfer of
//! Sunshine) 外部可执行文件提供强类型封装：构造输入卡片、在隔离目录中
//! 运行 SMARTS、解析表格光谱输出。
//!
//! ## 依赖关系
//! ```text
//! lib.rs
//!   ├── pipeline.rs (校验 → 写卡片 → 运行 → 解析)
//!   │     ├── process/   (安装定位、工作目录、进程执行)
//!   │     ├── parsers/   (输入卡片与光谱输出格式)
//!   │     └── models/    (数据模型)
//!   ├── batch/      (并行批量运行)
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   ├── utils/      (输出、进度条、导出、绘图)
//!   └── error.rs    (错误处理)
//! ```

pub mod batch;
pub mod cli;
pub mod commands;
pub mod error;
pub mod models;
pub mod parsers;
pub mod pipeline;
pub mod process;
pub mod utils;

pub use error::{Result, SmartsError};
pub use models::{Material, OutputVariable, SimulationConfig, Spectrum};
pub use pipeline::{SimulationOutput, Smarts};
pub use process::{CancelToken, ProcessRunner, SmartsInstall};
