//! # 调用工作目录
//!
//! 每次 SMARTS 调用独占一个临时目录。SMARTS 以固定文件名读写当前目录，
//! 因此并发调用必须互相隔离。
//!
//! ## 功能
//! - 将安装目录中的数据目录/文件链接（Unix）或复制（其他平台）到临时目录
//! - 固定 I/O 文件名与可执行文件本身不进入工作目录
//! - 目录随 `Workspace` 被 drop 时删除（成功、错误、超时、取消均适用）
//! - `keep_outputs` 在释放前保留输出文件
//!
//! ## 依赖关系
//! - 被 `process/runner.rs`, `pipeline.rs` 使用
//! - 使用 `tempfile`, `walkdir`

use crate::error::{Result, SmartsError};
use crate::models::execution::{OutputFiles, INPUT_FILE, IO_FILES};
use crate::process::install::SmartsInstall;

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// 一次调用的隔离目录
#[derive(Debug)]
pub struct Workspace {
    dir: TempDir,
    install: SmartsInstall,
}

impl Workspace {
    /// 创建临时目录并放入安装数据
    pub fn create(install: &SmartsInstall) -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix("rsmarts-")
            .tempdir()
            .map_err(|e| SmartsError::FileWriteError {
                path: std::env::temp_dir().display().to_string(),
                source: e,
            })?;

        let workspace = Workspace {
            dir,
            install: install.clone(),
        };
        let staged = workspace.stage()?;
        tracing::debug!(
            path = %workspace.path().display(),
            staged,
            "created SMARTS workspace"
        );
        Ok(workspace)
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn install(&self) -> &SmartsInstall {
        &self.install
    }

    /// 输入卡片文件路径
    pub fn input_path(&self) -> PathBuf {
        self.path().join(INPUT_FILE)
    }

    /// 当前已生成的输出文件
    pub fn output_files(&self) -> OutputFiles {
        OutputFiles::discover(self.path())
    }

    /// 把输出文件（及输入卡片）复制到 `dest`，返回复制后的路径
    pub fn keep_outputs(&self, dest: &Path) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(dest).map_err(|e| SmartsError::FileWriteError {
            path: dest.display().to_string(),
            source: e,
        })?;

        let mut kept = Vec::new();
        for name in IO_FILES {
            let src = self.path().join(name);
            if !src.is_file() {
                continue;
            }
            let target = dest.join(name);
            fs::copy(&src, &target).map_err(|e| SmartsError::FileWriteError {
                path: target.display().to_string(),
                source: e,
            })?;
            kept.push(target);
        }
        tracing::debug!(dest = %dest.display(), files = kept.len(), "kept SMARTS files");
        Ok(kept)
    }

    /// 放入安装目录下的条目，返回条目数
    fn stage(&self) -> Result<usize> {
        let root = &self.install.root;
        let entries = fs::read_dir(root).map_err(|e| SmartsError::FileReadError {
            path: root.display().to_string(),
            source: e,
        })?;

        let mut count = 0;
        for entry in entries {
            let entry = entry.map_err(|e| SmartsError::FileReadError {
                path: root.display().to_string(),
                source: e,
            })?;
            let src = entry.path();
            if self.is_excluded(&src) {
                continue;
            }
            let target = self.path().join(entry.file_name());
            link_or_copy(&src, &target)?;
            count += 1;
        }
        Ok(count)
    }

    fn is_excluded(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return true;
        };
        IO_FILES.iter().any(|f| f.eq_ignore_ascii_case(name))
            || path == self.install.executable
    }
}

#[cfg(unix)]
fn link_or_copy(src: &Path, target: &Path) -> Result<()> {
    std::os::unix::fs::symlink(src, target).map_err(|e| SmartsError::FileWriteError {
        path: target.display().to_string(),
        source: e,
    })
}

#[cfg(not(unix))]
fn link_or_copy(src: &Path, target: &Path) -> Result<()> {
    use walkdir::WalkDir;

    let write_err = |path: &Path, e: std::io::Error| SmartsError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    };

    if src.is_file() {
        fs::copy(src, target).map_err(|e| write_err(target, e))?;
        return Ok(());
    }

    for entry in WalkDir::new(src).follow_links(true) {
        let entry = entry.map_err(|e| SmartsError::Other(e.to_string()))?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| SmartsError::Other(e.to_string()))?;
        let dest = target.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&dest).map_err(|e| write_err(&dest, e))?;
        } else {
            fs::copy(entry.path(), &dest).map_err(|e| write_err(&dest, e))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::execution::SPREADSHEET_FILE;

    fn fake_install() -> (TempDir, SmartsInstall) {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("Solar")).unwrap();
        fs::write(dir.path().join("Solar").join("Spctrm_0.dat"), "1 2\n").unwrap();
        fs::write(dir.path().join(INPUT_FILE), "stale").unwrap();
        fs::write(dir.path().join("smarts295bat"), "").unwrap();
        let install = SmartsInstall::at(dir.path()).unwrap();
        (dir, install)
    }

    #[test]
    fn test_stage_excludes_io_files_and_executable() {
        let (_root, install) = fake_install();
        let ws = Workspace::create(&install).unwrap();

        assert!(ws.path().join("Solar").join("Spctrm_0.dat").exists());
        assert!(!ws.input_path().exists());
        assert!(!ws.path().join("smarts295bat").exists());
    }

    #[test]
    fn test_workspace_removed_on_drop() {
        let (_root, install) = fake_install();
        let ws = Workspace::create(&install).unwrap();
        let path = ws.path().to_path_buf();
        assert!(path.is_dir());

        drop(ws);
        assert!(!path.exists());
    }

    #[test]
    fn test_keep_outputs() {
        let (_root, install) = fake_install();
        let ws = Workspace::create(&install).unwrap();
        fs::write(ws.path().join(SPREADSHEET_FILE), "Wvlgth x\n280 1\n").unwrap();

        let dest = tempfile::tempdir().unwrap();
        let kept = ws.keep_outputs(&dest.path().join("case")).unwrap();
        assert_eq!(kept.len(), 1);
        assert!(dest.path().join("case").join(SPREADSHEET_FILE).is_file());
        assert!(ws.output_files().spreadsheet.is_some());
    }
}
