//! # 执行结果数据模型
//!
//! 记录一次 SMARTS 进程调用的退出状态、输出文本和生成的文件。
//!
//! ## 依赖关系
//! - 由 `process/runner.rs` 创建
//! - 被 `pipeline.rs` 消费后丢弃

use std::path::{Path, PathBuf};
use std::time::Duration;

/// SMARTS 固定文件名
pub const INPUT_FILE: &str = "smarts295.inp.txt";
pub const BROADBAND_FILE: &str = "smarts295.out.txt";
pub const SPREADSHEET_FILE: &str = "smarts295.ext.txt";
pub const SCAN_FILE: &str = "smarts295.scn.txt";

/// 所有 SMARTS 读写的固定文件名
pub const IO_FILES: [&str; 4] = [INPUT_FILE, BROADBAND_FILE, SPREADSHEET_FILE, SCAN_FILE];

/// SMARTS 生成的输出文件
///
/// 路径仅在所属工作目录存活期间有效。
#[derive(Debug, Clone, Default)]
pub struct OutputFiles {
    /// File 16: 宽带结果（及 IPRT = 1/3 时的光谱结果）
    pub broadband: Option<PathBuf>,
    /// File 17: 表格光谱结果
    pub spreadsheet: Option<PathBuf>,
    /// File 18: 扫描平滑结果
    pub scan: Option<PathBuf>,
}

impl OutputFiles {
    /// 收集目录中实际存在的输出文件
    pub fn discover(dir: &Path) -> Self {
        let existing = |name: &str| {
            let path = dir.join(name);
            path.is_file().then_some(path)
        };
        OutputFiles {
            broadband: existing(BROADBAND_FILE),
            spreadsheet: existing(SPREADSHEET_FILE),
            scan: existing(SCAN_FILE),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathBuf> {
        [&self.broadband, &self.spreadsheet, &self.scan]
            .into_iter()
            .flatten()
    }
}

/// 一次进程调用的结果
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub elapsed: Duration,
    pub outputs: OutputFiles,
}
