//! # SMARTS 进程执行器
//!
//! 在工作目录中启动 SMARTS，等待其完成、超时或被取消。
//!
//! ## 功能
//! - stdin 关闭，stdout/stderr 由读取线程收集
//! - 超时或取消时终止并回收子进程
//! - 非零退出码携带 stderr 返回
//! - 不自动重试
//!
//! ## 依赖关系
//! - 被 `pipeline.rs` 使用
//! - 使用 `process/workspace.rs`, `models/execution.rs`

use crate::error::{Result, SmartsError};
use crate::models::ExecutionResult;
use crate::process::workspace::Workspace;

use std::io::Read;
use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// 默认轮询间隔
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(20);

/// 跨线程共享的取消标志
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// 进程执行器
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    timeout: Option<Duration>,
    poll_interval: Duration,
    cancel: Option<CancelToken>,
}

impl Default for ProcessRunner {
    fn default() -> Self {
        ProcessRunner {
            timeout: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
            cancel: None,
        }
    }
}

impl ProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// 在工作目录中运行 SMARTS，阻塞直至结束
    pub fn run_in(&self, workspace: &Workspace) -> Result<ExecutionResult> {
        let install = workspace.install();
        let command = install.command_name();
        let start = Instant::now();

        let mut child = Command::new(&install.executable)
            .current_dir(workspace.path())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| SmartsError::ProcessError {
                command: command.clone(),
                code: None,
                stderr: e.to_string(),
            })?;
        tracing::debug!(command = %command, pid = child.id(), "spawned SMARTS");

        let stdout = capture(child.stdout.take());
        let stderr = capture(child.stderr.take());

        let status = loop {
            let polled = child.try_wait().map_err(|e| SmartsError::ProcessError {
                command: command.clone(),
                code: None,
                stderr: e.to_string(),
            })?;
            if let Some(status) = polled {
                break status;
            }

            if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
                terminate(&mut child, &command);
                tracing::warn!(command = %command, "SMARTS cancelled");
                return Err(SmartsError::Cancelled { command });
            }

            if let Some(limit) = self.timeout {
                if start.elapsed() >= limit {
                    terminate(&mut child, &command);
                    tracing::warn!(
                        command = %command,
                        seconds = limit.as_secs_f64(),
                        "SMARTS timed out"
                    );
                    return Err(SmartsError::TimeoutError {
                        command,
                        seconds: limit.as_secs_f64(),
                    });
                }
            }

            thread::sleep(self.poll_interval);
        };

        let stdout = join_capture(stdout);
        let stderr = join_capture(stderr);
        let elapsed = start.elapsed();
        tracing::debug!(
            command = %command,
            code = ?status.code(),
            elapsed_ms = elapsed.as_millis() as u64,
            "SMARTS exited"
        );

        if !status.success() {
            return Err(SmartsError::ProcessError {
                command,
                code: status.code(),
                stderr,
            });
        }

        Ok(ExecutionResult {
            exit_code: status.code(),
            stdout,
            stderr,
            elapsed,
            outputs: workspace.output_files(),
        })
    }
}

/// 终止并回收子进程
fn terminate(child: &mut Child, command: &str) {
    if let Err(e) = child.kill() {
        tracing::warn!(command, error = %e, "failed to kill SMARTS");
    }
    if let Err(e) = child.wait() {
        tracing::warn!(command, error = %e, "failed to reap SMARTS");
    }
}

fn capture<R: Read + Send + 'static>(pipe: Option<R>) -> Option<JoinHandle<String>> {
    pipe.map(|mut r| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            // 读取失败时保留已读部分
            let _ = r.read_to_end(&mut buf);
            String::from_utf8_lossy(&buf).into_owned()
        })
    })
}

fn join_capture(handle: Option<JoinHandle<String>>) -> String {
    handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default()
}

#[cfg(all(test, unix))]
pub(crate) mod tests {
    use super::*;
    use crate::models::execution::SPREADSHEET_FILE;
    use crate::process::install::SmartsInstall;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;
    use tempfile::TempDir;

    /// 创建含假 `smarts295bat` 脚本的安装目录
    pub(crate) fn fake_install(script: &str) -> (TempDir, SmartsInstall) {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("Solar")).unwrap();
        let exe = dir.path().join("smarts295bat");
        fs::write(&exe, format!("#!/bin/sh\n{}\n", script)).unwrap();
        fs::set_permissions(&exe, fs::Permissions::from_mode(0o755)).unwrap();
        let install = SmartsInstall::at(dir.path()).unwrap();
        (dir, install)
    }

    #[test]
    fn test_success_captures_output() {
        let (_root, install) = fake_install(
            "echo 'SMARTS 2.9.5'\nprintf 'Wvlgth DNI\\n280.0 1.0\\n' > smarts295.ext.txt",
        );
        let ws = Workspace::create(&install).unwrap();

        let result = ProcessRunner::new().run_in(&ws).unwrap();
        assert_eq!(result.exit_code, Some(0));
        assert!(result.stdout.contains("SMARTS 2.9.5"));
        assert_eq!(
            result.outputs.spreadsheet.as_deref(),
            Some(ws.path().join(SPREADSHEET_FILE).as_path())
        );
    }

    #[test]
    fn test_nonzero_exit_surfaces_stderr() {
        let (_root, install) = fake_install("echo 'bad card 12c' >&2\nexit 3");
        let ws = Workspace::create(&install).unwrap();

        match ProcessRunner::new().run_in(&ws) {
            Err(SmartsError::ProcessError { code, stderr, .. }) => {
                assert_eq!(code, Some(3));
                assert!(stderr.contains("bad card 12c"));
            }
            other => panic!("expected ProcessError, got {:?}", other),
        }
    }

    #[test]
    fn test_timeout_kills_child_and_workspace_is_removed() {
        let (_root, install) = fake_install("exec sleep 30");
        let ws = Workspace::create(&install).unwrap();
        let path = ws.path().to_path_buf();

        let runner = ProcessRunner::new().with_timeout(Some(Duration::from_millis(200)));
        let start = Instant::now();
        let result = runner.run_in(&ws);
        assert!(matches!(result, Err(SmartsError::TimeoutError { .. })));
        assert!(start.elapsed() < Duration::from_secs(10));

        drop(ws);
        assert!(!Path::new(&path).exists());
    }

    #[test]
    fn test_cancelled_before_completion() {
        let (_root, install) = fake_install("exec sleep 30");
        let ws = Workspace::create(&install).unwrap();

        let token = CancelToken::new();
        token.cancel();
        let result = ProcessRunner::new().with_cancel(token).run_in(&ws);
        assert!(matches!(result, Err(SmartsError::Cancelled { .. })));
    }

    #[test]
    fn test_cancel_while_running_kills_child() {
        let (_root, install) = fake_install("echo $$ > smarts.pid\nexec sleep 30");
        let ws = Workspace::create(&install).unwrap();
        let path = ws.path().to_path_buf();

        let token = CancelToken::new();
        let remote = token.clone();
        let canceller = thread::spawn(move || {
            thread::sleep(Duration::from_millis(100));
            remote.cancel();
        });

        let start = Instant::now();
        let result = ProcessRunner::new().with_cancel(token).run_in(&ws);
        canceller.join().unwrap();
        assert!(matches!(result, Err(SmartsError::Cancelled { .. })));
        assert!(start.elapsed() >= Duration::from_millis(100));
        assert!(start.elapsed() < Duration::from_secs(10));

        let pid = fs::read_to_string(path.join("smarts.pid")).unwrap();
        let alive = Command::new("kill")
            .arg("-0")
            .arg(pid.trim())
            .stderr(Stdio::null())
            .status()
            .unwrap();
        assert!(!alive.success());

        drop(ws);
        assert!(!path.exists());
    }

    #[test]
    fn test_spawn_failure_is_process_error() {
        let (root, install) = fake_install("exit 0");
        let ws = Workspace::create(&install).unwrap();
        fs::remove_file(root.path().join("smarts295bat")).unwrap();

        assert!(matches!(
            ProcessRunner::new().run_in(&ws),
            Err(SmartsError::ProcessError { code: None, .. })
        ));
    }
}
