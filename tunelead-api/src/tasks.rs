//! Background task spawning
//!
//! Notification sends and track generation run after the HTTP response is
//! already dispatched. Tasks are fire-and-forget: a failure is terminal
//! for that task and only ever reaches the logs, never the caller.

use std::future::Future;

use tracing::{debug, warn};
use tunelead_common::Result;

/// Spawn a named background task and log its outcome on completion.
pub fn spawn_background<F>(name: &'static str, task: F)
where
    F: Future<Output = Result<()>> + Send + 'static,
{
    tokio::spawn(async move {
        match task.await {
            Ok(()) => debug!("background task '{}' completed", name),
            Err(e) => warn!("background task '{}' failed: {}", name, e),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn task_runs_to_completion() {
        let ran = Arc::new(AtomicBool::new(false));
        let flag = ran.clone();

        spawn_background("test-task", async move {
            flag.store(true, Ordering::SeqCst);
            Ok(())
        });

        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        assert!(ran.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn failing_task_does_not_panic_the_runtime() {
        spawn_background("failing-task", async {
            Err(tunelead_common::Error::Internal("boom".to_string()))
        });

        // The spawned task swallows the error; nothing to observe but
        // the absence of a panic.
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    }
}
