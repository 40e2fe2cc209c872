//! # 外部进程模块
//!
//! 定位 SMARTS 安装、准备隔离工作目录并执行 SMARTS。
//!
//! ## 依赖关系
//! - 被 `pipeline.rs` 使用
//! - 子模块: install, workspace, runner

pub mod install;
pub mod runner;
pub mod workspace;

pub use install::{SmartsInstall, SMARTS_PATH_ENV};
pub use runner::{CancelToken, ProcessRunner};
pub use workspace::Workspace;
