//! Interval-driven background task scheduler.
//!
//! Each registered task runs on its own loop, independent of the others, with
//! at most one in-flight execution per task: the loop awaits the run before
//! sleeping, so overlapping invocations cannot happen even when a run
//! outlasts its interval. Success resets the task's error counter and sleeps
//! the base delay; failure counts, backs off, and escalates to a fatal error
//! once the tolerance is reached. Errors classed as permanent escalate
//! without waiting out the tolerance. The fatal error travels back to the
//! process entry point instead of panicking.

use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use log::{error, info};
use tokio::sync::mpsc;
use tokio::time::sleep;

use crate::error::IndexerError;

/// A reconciliation procedure packaged for scheduling.
pub type TaskFn = Arc<dyn Fn() -> BoxFuture<'static, Result<(), IndexerError>> + Send + Sync>;

/// Observation hook invoked on every task failure before the backoff sleep.
pub type ErrorHook = Arc<dyn Fn(&str, &IndexerError) + Send + Sync>;

/// Backoff policy applied after a failed run.
#[derive(Debug, Clone, Copy)]
pub enum Backoff {
    /// Always sleep the base delay.
    Linear,
    /// Sleep `base * 2^errors`, doubling with each consecutive failure.
    Exponential,
}

/// A registered task.
pub struct Task {
    /// Task name, used in logs and fatal reports.
    pub name: &'static str,
    /// Delay between successful runs, also the backoff unit.
    pub base_delay: Duration,
    /// Consecutive failures tolerated before fatal escalation.
    pub tolerance: u32,
    /// Backoff policy.
    pub backoff: Backoff,
    /// The procedure to run.
    pub run: TaskFn,
}

/// Drives registered tasks until one of them escalates.
pub struct Scheduler {
    /// The registered tasks.
    tasks: Vec<Task>,
    /// Optional failure observation hook.
    error_hook: Option<ErrorHook>,
}

impl Scheduler {
    /// Creates an empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            error_hook: None,
        }
    }

    /// Registers a task.
    #[must_use]
    pub fn register(mut self, task: Task) -> Self {
        self.tasks.push(task);
        self
    }

    /// Installs a failure observation hook shared by all tasks.
    #[must_use]
    pub fn with_error_hook(mut self, hook: ErrorHook) -> Self {
        self.error_hook = Some(hook);
        self
    }

    /// Runs all tasks until one escalates fatally.
    ///
    /// # Errors
    /// * [`IndexerError::Fatal`] from the first task to exhaust its tolerance
    pub async fn run(self) -> Result<(), IndexerError> {
        let (tx, mut rx) = mpsc::channel(1);

        for task in self.tasks {
            let hook = self.error_hook.clone();
            let tx = tx.clone();
            tokio::spawn(run_task(task, hook, tx));
        }
        drop(tx);

        match rx.recv().await {
            Some(fatal) => Err(fatal),
            None => Ok(()),
        }
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// The per-task loop: run, then sleep the interval or the backoff delay.
async fn run_task(task: Task, hook: Option<ErrorHook>, tx: mpsc::Sender<IndexerError>) {
    let mut errors: u32 = 0;

    loop {
        info!("scheduler: running {}", task.name);

        match (task.run)().await {
            Ok(()) => {
                errors = 0;
                sleep(task.base_delay).await;
            }
            Err(e) => {
                errors += 1;
                error!("scheduler: {} failed ({errors} consecutive): {e}", task.name);
                if let Some(hook) = &hook {
                    hook(task.name, &e);
                }

                // Permanent errors skip the remaining tolerance.
                if !e.is_retryable() || errors >= task.tolerance {
                    let fatal = IndexerError::Fatal {
                        task: task.name.to_string(),
                        failures: errors,
                        source: Box::new(e),
                    };
                    let _ = tx.send(fatal).await;
                    return;
                }

                sleep(backoff_delay(task.base_delay, task.backoff, errors)).await;
            }
        }
    }
}

/// Delay before the next attempt after `errors` consecutive failures.
#[must_use]
pub fn backoff_delay(base: Duration, backoff: Backoff, errors: u32) -> Duration {
    match backoff {
        Backoff::Linear => base,
        Backoff::Exponential => base * 2_u32.saturating_pow(errors),
    }
}
