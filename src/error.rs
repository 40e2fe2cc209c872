//! # 统一错误处理模块
//!
//! 定义 rsmarts 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 错误分类
//! - `ConfigurationError`: 环境变量缺失或 SMARTS 安装无效
//! - `ValidationError`: 模拟参数缺失或超出文档范围
//! - `ProcessError`: SMARTS 进程返回失败
//! - `TimeoutError`: SMARTS 进程超时（已被终止）
//! - `ParseError`: 输出文件缺失、截断或列布局不符
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// rsmarts 统一错误类型
#[derive(Error, Debug)]
pub enum SmartsError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 安装与环境
    // ─────────────────────────────────────────────────────────────
    #[error("SMARTS configuration error: {reason}")]
    ConfigurationError { reason: String },

    // ─────────────────────────────────────────────────────────────
    // 参数校验
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid simulation parameter {field}: {reason}")]
    ValidationError { field: String, reason: String },

    // ─────────────────────────────────────────────────────────────
    // 外部进程
    // ─────────────────────────────────────────────────────────────
    #[error("External command failed: {command} (exit code {code:?})\n{stderr}")]
    ProcessError {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("External command '{command}' timed out after {seconds:.1} s and was killed")]
    TimeoutError { command: String, seconds: f64 },

    #[error("External command '{command}' was cancelled")]
    Cancelled { command: String },

    // ─────────────────────────────────────────────────────────────
    // 解析错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to parse {format} file: {path}\nReason: {reason}")]
    ParseError {
        format: String,
        path: String,
        reason: String,
    },

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ─────────────────────────────────────────────────────────────
    // 序列化错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("JSON error in {path}: {source}")]
    JsonError {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("No matching files found with pattern: {pattern}")]
    NoFilesFound { pattern: String },

    #[error("{0}")]
    Other(String),
}

impl SmartsError {
    /// 构造参数校验错误
    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        SmartsError::ValidationError {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// 构造解析错误
    pub fn parse(format: &str, path: impl Into<String>, reason: impl Into<String>) -> Self {
        SmartsError::ParseError {
            format: format.to_string(),
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, SmartsError>;
