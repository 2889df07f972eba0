//! Waiting on long-running operations
//!
//! Create calls for disks, entry types and prompt datasets return an
//! operation instead of the resource. This module polls such an operation
//! until it reaches a terminal state:
//!
//! ```text
//! PENDING --poll--> PENDING ... --> DONE | FAILED | TIMED_OUT
//! ```
//!
//! The loop is bounded by [`WaitOptions::timeout`]. A poll still in flight
//! at the deadline is abandoned, and once the deadline has passed no further
//! poll is issued. Progress is reported through an optional
//! callback so the CLI can drive a spinner.

use async_trait::async_trait;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::error::{ApiError, CoreError, Result};

/// State of an operation after one poll
#[derive(Debug)]
pub enum PollState<T> {
    /// Still running; `status` is the service's own label
    Pending { status: String },
    /// Finished successfully
    Done(T),
    /// Finished with an error reported by the service
    Failed(ApiError),
}

/// Something that can be asked for the current state of one operation
#[async_trait]
pub trait OperationPoller: Send + Sync {
    type Output: Send;

    /// Human-readable operation identifier, used in progress events and logs
    fn operation(&self) -> &str;

    /// Fetch the current state. Transport errors are returned as `Err`.
    async fn poll(&self) -> Result<PollState<Self::Output>>;
}

/// Bounds for a wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    /// Maximum time to wait for completion
    pub timeout: Duration,
    /// Time between polling attempts; zero falls back to the default
    pub interval: Duration,
}

impl WaitOptions {
    pub fn new(timeout: Duration, interval: Duration) -> Self {
        Self { timeout, interval }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
            interval: Duration::from_secs(2),
        }
    }
}

/// Terminal result of a wait
#[derive(Debug)]
pub enum WaitOutcome<T> {
    Done(T),
    Failed(CoreError),
    TimedOut { elapsed: Duration },
}

impl<T> WaitOutcome<T> {
    /// Collapse into a `Result`, mapping a timeout to [`CoreError::DeadlineExceeded`]
    pub fn into_result(self, timeout: Duration) -> Result<T> {
        match self {
            WaitOutcome::Done(value) => Ok(value),
            WaitOutcome::Failed(err) => Err(err),
            WaitOutcome::TimedOut { .. } => Err(CoreError::DeadlineExceeded(timeout)),
        }
    }
}

/// Progress events emitted during a wait
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    Started {
        operation: String,
    },
    Polling {
        operation: String,
        status: String,
        elapsed: Duration,
    },
    Completed {
        operation: String,
    },
    Failed {
        operation: String,
        error: String,
    },
    TimedOut {
        operation: String,
        elapsed: Duration,
    },
}

/// Callback type for progress updates
pub type ProgressCallback = Box<dyn Fn(ProgressEvent) + Send + Sync>;

/// Poll `poller` until it finishes, fails, or `options.timeout` passes
pub async fn wait<P: OperationPoller>(
    poller: &P,
    options: WaitOptions,
    on_progress: Option<&ProgressCallback>,
) -> WaitOutcome<P::Output> {
    let start = Instant::now();
    let operation = poller.operation().to_string();
    let interval = if options.interval.is_zero() {
        let fallback = WaitOptions::default().interval;
        warn!("Zero poll interval for {}, using {:?}", operation, fallback);
        fallback
    } else {
        options.interval
    };
    debug!(
        "Waiting for operation {} (timeout {:?}, interval {:?})",
        operation, options.timeout, interval
    );

    emit(
        on_progress,
        ProgressEvent::Started {
            operation: operation.clone(),
        },
    );

    loop {
        let remaining = options.timeout.saturating_sub(start.elapsed());
        if remaining.is_zero() {
            return timed_out(&operation, start.elapsed(), on_progress);
        }

        let polled = match tokio::time::timeout(remaining, poller.poll()).await {
            Ok(polled) => polled,
            Err(_) => {
                debug!("Poll of {} still in flight at the deadline", operation);
                return timed_out(&operation, start.elapsed(), on_progress);
            }
        };

        let state = match polled {
            Ok(state) => state,
            Err(err) => {
                emit(
                    on_progress,
                    ProgressEvent::Failed {
                        operation: operation.clone(),
                        error: err.to_string(),
                    },
                );
                return WaitOutcome::Failed(err);
            }
        };

        match state {
            PollState::Done(value) => {
                debug!("Operation {} done after {:?}", operation, start.elapsed());
                emit(
                    on_progress,
                    ProgressEvent::Completed {
                        operation: operation.clone(),
                    },
                );
                return WaitOutcome::Done(value);
            }
            PollState::Failed(err) => {
                emit(
                    on_progress,
                    ProgressEvent::Failed {
                        operation: operation.clone(),
                        error: err.to_string(),
                    },
                );
                return WaitOutcome::Failed(CoreError::Api(err));
            }
            PollState::Pending { status } => {
                emit(
                    on_progress,
                    ProgressEvent::Polling {
                        operation: operation.clone(),
                        status,
                        elapsed: start.elapsed(),
                    },
                );
                // Never sleep past the deadline
                let remaining = options.timeout.saturating_sub(start.elapsed());
                tokio::time::sleep(interval.min(remaining)).await;
            }
        }
    }
}

/// [`wait`], collapsed into a `Result`
pub async fn wait_for_completion<P: OperationPoller>(
    poller: &P,
    options: WaitOptions,
    on_progress: Option<&ProgressCallback>,
) -> Result<P::Output> {
    wait(poller, options, on_progress)
        .await
        .into_result(options.timeout)
}

fn timed_out<T>(
    operation: &str,
    elapsed: Duration,
    on_progress: Option<&ProgressCallback>,
) -> WaitOutcome<T> {
    info!("Operation {} timed out after {:?}", operation, elapsed);
    emit(
        on_progress,
        ProgressEvent::TimedOut {
            operation: operation.to_string(),
            elapsed,
        },
    );
    WaitOutcome::TimedOut { elapsed }
}

fn emit(callback: Option<&ProgressCallback>, event: ProgressEvent) {
    if let Some(cb) = callback {
        cb(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Code;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    /// Pending for `pending_polls` polls, then yields `then`
    struct ScriptedPoller {
        polls: Arc<AtomicUsize>,
        pending_polls: usize,
        then: fn() -> PollState<String>,
    }

    impl ScriptedPoller {
        fn new(pending_polls: usize, then: fn() -> PollState<String>) -> Self {
            Self {
                polls: Arc::new(AtomicUsize::new(0)),
                pending_polls,
                then,
            }
        }
    }

    #[async_trait]
    impl OperationPoller for ScriptedPoller {
        type Output = String;

        fn operation(&self) -> &str {
            "operation-123"
        }

        async fn poll(&self) -> Result<PollState<String>> {
            let n = self.polls.fetch_add(1, Ordering::SeqCst);
            if n < self.pending_polls {
                Ok(PollState::Pending {
                    status: "RUNNING".to_string(),
                })
            } else {
                Ok((self.then)())
            }
        }
    }

    fn fast() -> WaitOptions {
        WaitOptions::new(Duration::from_secs(5), Duration::from_millis(5))
    }

    #[tokio::test]
    async fn test_done_returns_result_unchanged() {
        let poller = ScriptedPoller::new(2, || PollState::Done("disk-ready".to_string()));
        let outcome = wait(&poller, fast(), None).await;

        match outcome {
            WaitOutcome::Done(value) => assert_eq!(value, "disk-ready"),
            other => panic!("expected Done, got {other:?}"),
        }
        assert_eq!(poller.polls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_remote_failure_is_propagated() {
        let poller = ScriptedPoller::new(0, || {
            PollState::Failed(ApiError::Status {
                http_status: 200,
                code: Code::ResourceExhausted,
                message: "Quota 'SSD_TOTAL_GB' exceeded".to_string(),
            })
        });

        let err = wait_for_completion(&poller, fast(), None).await.unwrap_err();
        assert!(err.is_quota_exceeded());
        assert_eq!(poller.polls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_never_resolving_times_out_and_stops_polling() {
        let poller = ScriptedPoller::new(usize::MAX, || unreachable!());
        let options = WaitOptions::new(Duration::from_millis(60), Duration::from_millis(10));

        let outcome = wait(&poller, options, None).await;
        assert!(matches!(outcome, WaitOutcome::TimedOut { .. }));

        let polls_at_timeout = poller.polls.load(Ordering::SeqCst);
        assert!(polls_at_timeout >= 1);

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(poller.polls.load(Ordering::SeqCst), polls_at_timeout);
    }

    #[tokio::test]
    async fn test_timeout_maps_to_deadline_exceeded() {
        let poller = ScriptedPoller::new(usize::MAX, || unreachable!());
        let options = WaitOptions::new(Duration::from_millis(20), Duration::from_millis(5));

        let err = wait_for_completion(&poller, options, None).await.unwrap_err();
        assert!(matches!(err, CoreError::DeadlineExceeded(d) if d == Duration::from_millis(20)));
        assert!(err.is_timeout());
    }

    #[tokio::test]
    async fn test_zero_timeout_never_polls() {
        let poller = ScriptedPoller::new(0, || PollState::Done("x".to_string()));
        let options = WaitOptions::new(Duration::ZERO, Duration::from_millis(5));

        let outcome = wait(&poller, options, None).await;
        assert!(matches!(outcome, WaitOutcome::TimedOut { .. }));
        assert_eq!(poller.polls.load(Ordering::SeqCst), 0);
    }

    /// Each poll hangs for `delay` before reporting pending
    struct SlowPoller {
        delay: Duration,
    }

    #[async_trait]
    impl OperationPoller for SlowPoller {
        type Output = String;

        fn operation(&self) -> &str {
            "operation-slow"
        }

        async fn poll(&self) -> Result<PollState<String>> {
            tokio::time::sleep(self.delay).await;
            Ok(PollState::Pending {
                status: "RUNNING".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_hung_poll_is_cut_off_at_deadline() {
        let poller = SlowPoller {
            delay: Duration::from_secs(3),
        };
        let options = WaitOptions::new(Duration::from_millis(200), Duration::from_millis(10));

        let start = std::time::Instant::now();
        let outcome = wait(&poller, options, None).await;
        let elapsed = start.elapsed();

        assert!(matches!(outcome, WaitOutcome::TimedOut { .. }));
        assert!(elapsed >= Duration::from_millis(200));
        assert!(elapsed < Duration::from_secs(1), "waited {elapsed:?}");
    }

    #[tokio::test]
    async fn test_zero_interval_falls_back_to_default() {
        let poller = ScriptedPoller::new(usize::MAX, || unreachable!());
        let options = WaitOptions::new(Duration::from_millis(300), Duration::ZERO);

        let outcome = wait(&poller, options, None).await;
        assert!(matches!(outcome, WaitOutcome::TimedOut { .. }));
        // The 2s default interval outlasts the deadline after the first poll
        assert_eq!(poller.polls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_progress_events_in_order() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        let callback: ProgressCallback = Box::new(move |event| {
            let label = match event {
                ProgressEvent::Started { .. } => "started".to_string(),
                ProgressEvent::Polling { status, .. } => format!("polling:{status}"),
                ProgressEvent::Completed { .. } => "completed".to_string(),
                ProgressEvent::Failed { .. } => "failed".to_string(),
                ProgressEvent::TimedOut { .. } => "timed_out".to_string(),
            };
            sink.lock().unwrap().push(label);
        });

        let poller = ScriptedPoller::new(1, || PollState::Done("ok".to_string()));
        let _ = wait(&poller, fast(), Some(&callback)).await;

        assert_eq!(
            *events.lock().unwrap(),
            vec!["started", "polling:RUNNING", "completed"]
        );
    }
}
