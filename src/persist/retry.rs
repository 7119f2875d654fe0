//! 抖动指数退避
//!
//! 每次失败后在 `[min_delay, window]` 内均匀随机休眠，窗口翻倍；
//! 窗口超过 `max_window` 时放弃。

use std::thread;
use std::time::Duration;

use rand::Rng;
use tracing::{info, warn};

use super::sink::SummarySink;
use crate::report::RunSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub initial_window: Duration,
    pub min_delay: Duration,
    pub max_window: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            initial_window: Duration::from_secs(10),
            min_delay: Duration::from_secs(1),
            max_window: Duration::from_secs(1000),
        }
    }
}

impl RetryPolicy {
    /// 最多尝试次数（含首次）
    pub fn max_attempts(&self) -> u32 {
        let mut window = self.initial_window;
        let mut attempts = 1;
        while window <= self.max_window && !window.is_zero() {
            attempts += 1;
            window = window.saturating_mul(2);
        }
        attempts
    }

    pub fn jittered_delay<R: Rng + ?Sized>(&self, window: Duration, rng: &mut R) -> Duration {
        if window <= self.min_delay {
            return window;
        }
        rng.random_range(self.min_delay..=window)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistOutcome {
    Stored { attempts: u32 },
    Abandoned { attempts: u32 },
}

/// 尽力写入：成功或放弃都返回结果，从不返回错误。
#[tracing::instrument(skip_all)]
pub fn persist_with_retry<S, R>(
    sink: &mut S,
    summary: &RunSummary,
    policy: &RetryPolicy,
    rng: &mut R,
) -> PersistOutcome
where
    S: SummarySink + ?Sized,
    R: Rng + ?Sized,
{
    let mut window = policy.initial_window;
    let mut attempts = 0u32;
    loop {
        attempts += 1;
        let err = match sink.persist(summary) {
            Ok(()) => {
                info!(attempts, "☁️  运行摘要已上传");
                return PersistOutcome::Stored { attempts };
            }
            Err(err) => err,
        };

        if window > policy.max_window || window.is_zero() {
            warn!(attempts, error = %err, "上传失败，已放弃");
            return PersistOutcome::Abandoned { attempts };
        }
        let delay = policy.jittered_delay(window, rng);
        warn!(attempts, error = %err, delay_ms = delay.as_millis() as u64, "上传失败，退避后重试");
        thread::sleep(delay);
        window = window.saturating_mul(2);
    }
}
