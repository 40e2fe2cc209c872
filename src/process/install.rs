//! # SMARTS 安装定位
//!
//! 从 `SMARTSPATH` 环境变量解析 SMARTS 安装目录与可执行文件。
//!
//! `SMARTSPATH` 可以指向安装目录，也可以直接指向可执行文件。
//!
//! ## 依赖关系
//! - 被 `process/workspace.rs`, `pipeline.rs` 使用
//! - 无外部模块依赖

use crate::error::{Result, SmartsError};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// 指定安装位置的环境变量
pub const SMARTS_PATH_ENV: &str = "SMARTSPATH";

/// 按优先级排列的可执行文件名
pub const EXECUTABLE_NAMES: [&str; 4] = [
    "smarts295bat",
    "smarts295bat.exe",
    "smarts295",
    "smarts295.exe",
];

/// 一个已确认存在的 SMARTS 安装
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmartsInstall {
    /// 安装目录（含 Solar, Albedo, Gases 等数据目录）
    pub root: PathBuf,
    /// 可执行文件路径
    pub executable: PathBuf,
}

impl SmartsInstall {
    /// 从 `SMARTSPATH` 解析
    pub fn from_env() -> Result<Self> {
        Self::from_env_value(std::env::var_os(SMARTS_PATH_ENV))
    }

    /// 从给定的环境变量值解析
    pub fn from_env_value(value: Option<OsString>) -> Result<Self> {
        match value {
            None => Err(SmartsError::ConfigurationError {
                reason: format!("{} is not set", SMARTS_PATH_ENV),
            }),
            Some(v) if v.is_empty() => Err(SmartsError::ConfigurationError {
                reason: format!("{} is empty", SMARTS_PATH_ENV),
            }),
            Some(v) => Self::at(Path::new(&v)),
        }
    }

    /// 从安装目录或可执行文件路径解析
    ///
    /// 路径会被规范化为绝对路径：子进程在临时工作目录中启动，
    /// 相对路径在那里无效。
    pub fn at(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SmartsError::ConfigurationError {
                reason: format!("SMARTS path does not exist: {}", path.display()),
            });
        }
        let path = fs::canonicalize(path).map_err(|e| SmartsError::ConfigurationError {
            reason: format!("cannot resolve SMARTS path {}: {}", path.display(), e),
        })?;
        let path = path.as_path();

        if path.is_file() {
            let root = path
                .parent()
                .map(Path::to_path_buf)
                .ok_or_else(|| SmartsError::ConfigurationError {
                    reason: format!("SMARTS executable has no parent: {}", path.display()),
                })?;
            return Ok(SmartsInstall {
                root,
                executable: path.to_path_buf(),
            });
        }

        EXECUTABLE_NAMES
            .iter()
            .map(|name| path.join(name))
            .find(|p| p.is_file())
            .map(|executable| SmartsInstall {
                root: path.to_path_buf(),
                executable,
            })
            .ok_or_else(|| SmartsError::ConfigurationError {
                reason: format!(
                    "no SMARTS executable ({}) found in {}",
                    EXECUTABLE_NAMES.join(", "),
                    path.display()
                ),
            })
    }

    /// 可执行文件名（用于错误信息）
    pub fn command_name(&self) -> String {
        self.executable
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.executable.display().to_string())
    }
}
