//! # 算例收集器
//!
//! 根据输入路径和模式收集待运行的 JSON 算例文件。
//!
//! ## 功能
//! - 支持单文件、目录和 glob 路径输入
//! - 文件名模式匹配（逗号分隔的多模式）
//! - 递归目录搜索
//!
//! ## 依赖关系
//! - 被 `commands/batch.rs` 调用
//! - 使用 `walkdir` 遍历目录，`glob` 匹配模式

use crate::error::{Result, SmartsError};

use glob::Pattern;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 默认算例文件模式
pub const DEFAULT_PATTERN: &str = "*.json";

/// 算例收集器
pub struct FileCollector {
    /// 输入路径
    input: PathBuf,
    /// 匹配模式列表
    patterns: Vec<Pattern>,
    /// 是否递归
    recursive: bool,
}

impl FileCollector {
    pub fn new(input: PathBuf) -> Self {
        Self {
            input,
            patterns: vec![default_pattern()],
            recursive: false,
        }
    }

    /// 设置匹配模式（逗号分隔的多模式）
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self> {
        let patterns = pattern
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|p| {
                Pattern::new(p).map_err(|e| {
                    SmartsError::InvalidArgument(format!("invalid pattern '{}': {}", p, e))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        self.patterns = if patterns.is_empty() {
            vec![default_pattern()]
        } else {
            patterns
        };
        Ok(self)
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// 收集所有匹配的文件（按路径排序）
    ///
    /// 输入既不是文件也不是目录时按 glob 路径展开。
    pub fn collect(&self) -> Result<Vec<PathBuf>> {
        let mut files = if self.input.is_file() {
            vec![self.input.clone()]
        } else if self.input.is_dir() {
            self.walk()
        } else {
            self.expand()?
        };
        files.sort();

        if files.is_empty() {
            return Err(SmartsError::NoFilesFound {
                pattern: self.describe(),
            });
        }
        Ok(files)
    }

    fn walk(&self) -> Vec<PathBuf> {
        let max_depth = if self.recursive { usize::MAX } else { 1 };

        WalkDir::new(&self.input)
            .max_depth(max_depth)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|entry| self.matches_patterns(entry.path()))
            .map(|e| e.path().to_path_buf())
            .collect()
    }

    fn expand(&self) -> Result<Vec<PathBuf>> {
        let pattern = self.input.to_string_lossy();
        let paths = glob::glob(&pattern).map_err(|e| {
            SmartsError::InvalidArgument(format!("invalid pattern '{}': {}", pattern, e))
        })?;
        Ok(paths
            .filter_map(|p| p.ok())
            .filter(|p| p.is_file())
            .collect())
    }

    /// 检查文件名是否匹配任一模式
    fn matches_patterns(&self, path: &Path) -> bool {
        let Some(filename) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        self.patterns.iter().any(|p| p.matches(filename))
    }

    fn describe(&self) -> String {
        if self.input.is_dir() {
            let patterns: Vec<&str> = self.patterns.iter().map(Pattern::as_str).collect();
            format!("{}/{}", self.input.display(), patterns.join(","))
        } else {
            self.input.display().to_string()
        }
    }
}

fn default_pattern() -> Pattern {
    Pattern::new(DEFAULT_PATTERN).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn case_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("tucson.json"), "{}").unwrap();
        fs::write(dir.path().join("golden.json"), "{}").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("deep.json"), "{}").unwrap();
        dir
    }

    #[test]
    fn test_collect_directory() {
        let dir = case_dir();
        let files = FileCollector::new(dir.path().to_path_buf()).collect().unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["golden.json", "tucson.json"]);

        let all = FileCollector::new(dir.path().to_path_buf())
            .recursive(true)
            .collect()
            .unwrap();
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_collect_with_patterns_and_glob() {
        let dir = case_dir();
        let files = FileCollector::new(dir.path().to_path_buf())
            .with_pattern("t*.json, *.txt")
            .unwrap()
            .collect()
            .unwrap();
        assert_eq!(files.len(), 2);

        let globbed = FileCollector::new(dir.path().join("g*.json")).collect().unwrap();
        assert_eq!(globbed, vec![dir.path().join("golden.json")]);
    }

    #[test]
    fn test_no_match_is_an_error() {
        let dir = case_dir();
        let result = FileCollector::new(dir.path().to_path_buf())
            .with_pattern("*.yaml")
            .unwrap()
            .collect();
        assert!(matches!(result, Err(SmartsError::NoFilesFound { .. })));
    }
}
