//! # 批量执行器
//!
//! 并行运行多个 SMARTS 算例。
//!
//! ## 功能
//! - 基于 rayon 的并行迭代，每个算例使用独立工作目录
//! - 进度条显示
//! - 逐算例结果与汇总统计
//!
//! ## 依赖关系
//! - 被 `commands/batch.rs` 调用
//! - 使用 `utils/progress.rs` 创建进度条
//! - 使用 `rayon` 进行并行计算

use crate::error::{Result, SmartsError};
use crate::utils::progress;

use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// 单个算例的处理结果
#[derive(Debug, Clone)]
pub enum CaseOutcome {
    /// 运行成功 (算例名, 光谱行数, 耗时)
    Success(String, usize, Duration),
    /// 跳过（如输出已存在）
    Skipped(String),
    /// 运行失败 (算例名, 错误信息)
    Failed(String, String),
}

impl CaseOutcome {
    pub fn name(&self) -> &str {
        match self {
            CaseOutcome::Success(name, ..) => name,
            CaseOutcome::Skipped(name) => name,
            CaseOutcome::Failed(name, _) => name,
        }
    }
}

/// 批量运行结果统计
#[derive(Debug, Default)]
pub struct BatchResult {
    pub success: usize,
    pub skipped: usize,
    pub failed: usize,
    /// 失败详情 (算例名, 错误信息)
    pub failures: Vec<(String, String)>,
    /// 按输入顺序排列的逐算例结果
    pub outcomes: Vec<CaseOutcome>,
}

impl BatchResult {
    /// 合并处理结果
    pub fn merge(&mut self, outcome: CaseOutcome) {
        match &outcome {
            CaseOutcome::Success(..) => self.success += 1,
            CaseOutcome::Skipped(_) => self.skipped += 1,
            CaseOutcome::Failed(name, err) => {
                self.failed += 1;
                self.failures.push((name.clone(), err.clone()));
            }
        }
        self.outcomes.push(outcome);
    }

    /// 总处理数量
    pub fn total(&self) -> usize {
        self.success + self.skipped + self.failed
    }

    /// 成功算例的总耗时
    pub fn total_elapsed(&self) -> Duration {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                CaseOutcome::Success(_, _, elapsed) => Some(*elapsed),
                _ => None,
            })
            .sum()
    }
}

/// 批量执行器
pub struct BatchRunner {
    /// 并行作业数
    jobs: usize,
    show_progress: bool,
}

impl BatchRunner {
    /// `jobs` 为 0 时使用全部 CPU 核心
    pub fn new(jobs: usize) -> Self {
        let jobs = if jobs == 0 { num_cpus::get() } else { jobs };
        Self {
            jobs,
            show_progress: true,
        }
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn jobs(&self) -> usize {
        self.jobs
    }

    /// 并行处理算例列表
    pub fn run<T, F>(&self, cases: Vec<T>, processor: F) -> Result<BatchResult>
    where
        T: Sync,
        F: Fn(&T) -> CaseOutcome + Sync + Send,
    {
        let total = cases.len();
        let pb = if self.show_progress {
            progress::create_progress_bar(total as u64, "Running SMARTS")
        } else {
            indicatif::ProgressBar::hidden()
        };

        let failed_count = AtomicUsize::new(0);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()
            .map_err(|e| SmartsError::Other(format!("failed to build thread pool: {}", e)))?;

        // par_iter + collect 保持输入顺序
        let outcomes: Vec<CaseOutcome> = pool.install(|| {
            cases
                .par_iter()
                .map(|case| {
                    let outcome = processor(case);
                    if let CaseOutcome::Failed(name, err) = &outcome {
                        failed_count.fetch_add(1, Ordering::Relaxed);
                        tracing::warn!(case = %name, error = %err, "case failed");
                    }
                    pb.set_message(format!(
                        "Running SMARTS ({} failed)",
                        failed_count.load(Ordering::Relaxed)
                    ));
                    pb.inc(1);
                    outcome
                })
                .collect()
        });

        pb.finish_and_clear();

        let mut batch_result = BatchResult::default();
        for outcome in outcomes {
            batch_result.merge(outcome);
        }
        Ok(batch_result)
    }
}
