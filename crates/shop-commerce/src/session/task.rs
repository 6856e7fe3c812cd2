//! Simulated asynchronous tasks.

use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

/// Progress of a simulated request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "lowercase")]
pub enum TaskState<T, E> {
    /// Not started.
    Idle,
    /// Waiting on the delay.
    Pending,
    /// Finished successfully.
    Resolved(T),
    /// Finished with an error.
    Rejected(E),
}

impl<T, E> Default for TaskState<T, E> {
    fn default() -> Self {
        TaskState::Idle
    }
}

impl<T, E> TaskState<T, E> {
    pub fn is_idle(&self) -> bool {
        matches!(self, TaskState::Idle)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, TaskState::Pending)
    }

    /// Resolved or rejected.
    pub fn is_settled(&self) -> bool {
        matches!(self, TaskState::Resolved(_) | TaskState::Rejected(_))
    }

    pub fn resolved(&self) -> Option<&T> {
        match self {
            TaskState::Resolved(value) => Some(value),
            _ => None,
        }
    }

    pub fn rejected(&self) -> Option<&E> {
        match self {
            TaskState::Rejected(err) => Some(err),
            _ => None,
        }
    }

    /// Settle from a result.
    pub fn settle(&mut self, result: Result<T, E>) {
        *self = match result {
            Ok(value) => TaskState::Resolved(value),
            Err(err) => TaskState::Rejected(err),
        };
    }
}

/// Source of the artificial latency applied to simulated requests.
#[async_trait]
pub trait Delay: Send + Sync {
    async fn wait(&self, duration: Duration);
}

/// Real wall-clock delay on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioDelay;

#[async_trait]
impl Delay for TokioDelay {
    async fn wait(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Completes immediately. For tests and scripted runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

#[async_trait]
impl Delay for NoDelay {
    async fn wait(&self, _duration: Duration) {}
}

/// A request that settles after a fixed delay.
#[derive(Debug, Clone)]
pub struct SimulatedTask<T, E> {
    state: TaskState<T, E>,
    latency: Duration,
}

impl<T, E> SimulatedTask<T, E> {
    pub fn new(latency: Duration) -> Self {
        Self {
            state: TaskState::Idle,
            latency,
        }
    }

    pub fn state(&self) -> &TaskState<T, E> {
        &self.state
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    /// Back to idle.
    pub fn reset(&mut self) {
        self.state = TaskState::Idle;
    }

    /// Go pending, wait out the latency, then settle with `work`'s result.
    pub async fn run<D, F>(&mut self, delay: &D, work: F) -> &TaskState<T, E>
    where
        D: Delay + ?Sized,
        F: FnOnce() -> Result<T, E>,
    {
        self.state = TaskState::Pending;
        delay.wait(self.latency).await;
        self.state.settle(work());
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_resolves() {
        let mut task: SimulatedTask<u32, String> = SimulatedTask::new(Duration::from_millis(1500));
        assert!(task.state().is_idle());

        let state = task.run(&NoDelay, || Ok(7)).await;
        assert_eq!(state, &TaskState::Resolved(7));
        assert!(task.state().is_settled());
    }

    #[tokio::test]
    async fn test_run_rejects() {
        let mut task: SimulatedTask<u32, String> = SimulatedTask::new(Duration::ZERO);
        task.run(&NoDelay, || Err("nope".to_string())).await;
        assert_eq!(task.state().rejected().map(String::as_str), Some("nope"));

        task.reset();
        assert!(task.state().is_idle());
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_delay_waits() {
        let start = tokio::time::Instant::now();
        let mut task: SimulatedTask<(), ()> = SimulatedTask::new(Duration::from_millis(1000));
        task.run(&TokioDelay, || Ok(())).await;
        assert!(start.elapsed() >= Duration::from_millis(1000));
    }

    #[test]
    fn test_state_serializes_tagged() {
        let state: TaskState<&str, ()> = TaskState::Resolved("done");
        assert_eq!(
            serde_json::to_string(&state).unwrap(),
            r#"{"state":"resolved","value":"done"}"#
        );
    }
}
