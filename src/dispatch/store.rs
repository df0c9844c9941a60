// ABOUTME: BackgroundTaskStore - tracks subagent runs dispatched in the background.
// ABOUTME: Each task moves once from running to completed or failed; waiters are woken via watch.

use std::collections::HashMap;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::FutureExt;
use tokio::sync::{RwLock, watch};

use crate::error::ExecutionError;

/// Default time a finished task stays retrievable.
pub const DEFAULT_TASK_TTL: Duration = Duration::from_secs(3600);

/// Lifecycle state of a background task.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TaskStatus {
    Running,
    Completed,
    Failed,
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskStatus::Running => write!(f, "running"),
            TaskStatus::Completed => write!(f, "completed"),
            TaskStatus::Failed => write!(f, "failed"),
        }
    }
}

/// How a bounded wait for a task ended.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum WaitOutcome {
    /// The task reached a terminal state.
    Completed,
    /// The timeout elapsed first; the task is still running.
    TimedOut,
    /// The worker went away without recording an outcome.
    Interrupted,
}

#[derive(Debug, Clone)]
enum TaskState {
    Running,
    Completed {
        result: String,
        finished_at: Instant,
    },
    Failed {
        error: String,
        cause: Option<String>,
        finished_at: Instant,
    },
}

impl TaskState {
    fn is_terminal(&self) -> bool {
        !matches!(self, TaskState::Running)
    }
}

/// A background subagent run.
#[derive(Debug)]
pub struct BackgroundTask {
    id: String,
    started_at: Instant,
    state: watch::Receiver<TaskState>,
}

impl BackgroundTask {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn status(&self) -> TaskStatus {
        match &*self.state.borrow() {
            TaskState::Running => TaskStatus::Running,
            TaskState::Completed { .. } => TaskStatus::Completed,
            TaskState::Failed { .. } => TaskStatus::Failed,
        }
    }

    /// Whether the task has finished, successfully or not.
    pub fn is_completed(&self) -> bool {
        self.state.borrow().is_terminal()
    }

    /// The subagent's text, once completed.
    pub fn result(&self) -> Option<String> {
        match &*self.state.borrow() {
            TaskState::Completed { result, .. } => Some(result.clone()),
            _ => None,
        }
    }

    /// The failure message, once failed.
    pub fn error(&self) -> Option<String> {
        match &*self.state.borrow() {
            TaskState::Failed { error, .. } => Some(error.clone()),
            _ => None,
        }
    }

    /// The underlying cause of a failure, when there is one.
    pub fn cause(&self) -> Option<String> {
        match &*self.state.borrow() {
            TaskState::Failed { cause, .. } => cause.clone(),
            _ => None,
        }
    }

    /// How long the task ran, or has been running.
    pub fn duration(&self) -> Duration {
        match &*self.state.borrow() {
            TaskState::Running => self.started_at.elapsed(),
            TaskState::Completed { finished_at, .. } | TaskState::Failed { finished_at, .. } => {
                finished_at.duration_since(self.started_at)
            }
        }
    }

    /// Wait up to `timeout` for a terminal state.
    pub async fn wait_for_completion(&self, timeout: Duration) -> WaitOutcome {
        let mut state = self.state.clone();
        match tokio::time::timeout(timeout, state.wait_for(TaskState::is_terminal)).await {
            Ok(Ok(_)) => WaitOutcome::Completed,
            Ok(Err(_)) => WaitOutcome::Interrupted,
            Err(_) => WaitOutcome::TimedOut,
        }
    }

    /// Whether the task may be evicted at `now` under `ttl`.
    fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        let finished_at = match &*self.state.borrow() {
            TaskState::Completed { finished_at, .. } | TaskState::Failed { finished_at, .. } => {
                *finished_at
            }
            // A running task whose worker is gone will never finish.
            TaskState::Running if self.state.has_changed().is_err() => self.started_at,
            TaskState::Running => return false,
        };
        now.duration_since(finished_at) >= ttl
    }
}

/// Records the outcome of one background task. Dropping it unfinished
/// interrupts every waiter.
pub(crate) struct TaskCompleter {
    id: String,
    state: watch::Sender<TaskState>,
}

impl TaskCompleter {
    pub(crate) fn complete(self, result: String) {
        tracing::debug!(task_id = %self.id, "background task completed");
        self.state.send_replace(TaskState::Completed {
            result,
            finished_at: Instant::now(),
        });
    }

    pub(crate) fn fail(self, error: String, cause: Option<String>) {
        tracing::debug!(task_id = %self.id, error = %error, "background task failed");
        self.state.send_replace(TaskState::Failed {
            error,
            cause,
            finished_at: Instant::now(),
        });
    }
}

/// Store of background tasks, keyed by task id.
///
/// Finished tasks are kept for a TTL after they finish and swept on every
/// `create` and `get`. Running tasks are never evicted.
#[derive(Debug)]
pub struct BackgroundTaskStore {
    tasks: RwLock<HashMap<String, Arc<BackgroundTask>>>,
    ttl: Duration,
}

impl BackgroundTaskStore {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TASK_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            tasks: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Register a running task under `id` and spawn `work` on the runtime.
    ///
    /// The task is visible to `get` before `work` starts. A panic in `work`
    /// is recorded as a failure.
    pub async fn create<F>(&self, id: impl Into<String>, work: F) -> Arc<BackgroundTask>
    where
        F: Future<Output = Result<String, ExecutionError>> + Send + 'static,
    {
        self.create_with(id, work, |error| {
            (
                error.to_string(),
                std::error::Error::source(error).map(ToString::to_string),
            )
        })
        .await
    }

    /// Like [`create`](Self::create), but `describe` turns a failure into
    /// the recorded error text and optional cause.
    pub async fn create_with<F, D>(
        &self,
        id: impl Into<String>,
        work: F,
        describe: D,
    ) -> Arc<BackgroundTask>
    where
        F: Future<Output = Result<String, ExecutionError>> + Send + 'static,
        D: FnOnce(&ExecutionError) -> (String, Option<String>) + Send + 'static,
    {
        let (task, completer) = self.register(id).await;

        tokio::spawn(async move {
            let error = match AssertUnwindSafe(work).catch_unwind().await {
                Ok(Ok(result)) => return completer.complete(result),
                Ok(Err(e)) => e,
                Err(panic) => {
                    let message = panic_message(panic.as_ref());
                    tracing::error!(
                        task_id = %completer.id,
                        panic = %message,
                        "background task panicked"
                    );
                    ExecutionError::Panicked(message)
                }
            };
            let (text, cause) = describe(&error);
            completer.fail(text, cause);
        });

        task
    }

    /// Insert a running task and hand back the completer that finishes it.
    pub(crate) async fn register(
        &self,
        id: impl Into<String>,
    ) -> (Arc<BackgroundTask>, TaskCompleter) {
        self.evict_expired().await;

        let id = id.into();
        let (sender, receiver) = watch::channel(TaskState::Running);
        let task = Arc::new(BackgroundTask {
            id: id.clone(),
            started_at: Instant::now(),
            state: receiver,
        });

        self.tasks.write().await.insert(id.clone(), task.clone());
        tracing::info!(task_id = %id, "background task started");

        (task, TaskCompleter { id, state: sender })
    }

    /// Look up a task by id.
    pub async fn get(&self, id: &str) -> Option<Arc<BackgroundTask>> {
        self.evict_expired().await;
        self.tasks.read().await.get(id).cloned()
    }

    /// Evict a task explicitly.
    pub async fn remove(&self, id: &str) -> Option<Arc<BackgroundTask>> {
        self.tasks.write().await.remove(id)
    }

    /// Drop finished tasks older than the TTL. Returns how many were evicted.
    pub async fn evict_expired(&self) -> usize {
        let now = Instant::now();
        let mut tasks = self.tasks.write().await;
        let before = tasks.len();
        tasks.retain(|_, task| !task.is_expired(now, self.ttl));
        let evicted = before - tasks.len();
        if evicted > 0 {
            tracing::debug!(evicted, "evicted expired background tasks");
        }
        evicted
    }

    pub async fn len(&self) -> usize {
        self.tasks.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.tasks.read().await.is_empty()
    }
}

impl Default for BackgroundTaskStore {
    fn default() -> Self {
        Self::new()
    }
}

pub(super) fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
