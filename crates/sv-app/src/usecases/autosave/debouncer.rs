use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::AbortHandle;
use tokio::time::sleep;
use tokio_util::task::TaskTracker;
use tracing::debug;

struct Pending {
    generation: u64,
    handle: AbortHandle,
}

#[derive(Default)]
struct Slot {
    generation: u64,
    pending: Option<Pending>,
}

/// Cancellable delayed job runner.
///
/// Only one job waits at a time: scheduling again aborts the waiting one and
/// restarts the quiet period. Once the quiet period elapses the job leaves
/// the slot and runs to completion; later `schedule` or `cancel` calls no
/// longer affect it.
pub struct Debouncer {
    delay: Duration,
    slot: Arc<Mutex<Slot>>,
    tasks: TaskTracker,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            slot: Arc::new(Mutex::new(Slot::default())),
            tasks: TaskTracker::new(),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub async fn schedule<F, Fut>(&self, job: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let mut slot = self.slot.lock().await;
        if let Some(existing) = slot.pending.take() {
            existing.handle.abort();
        }
        slot.generation += 1;
        let generation = slot.generation;

        let delay = self.delay;
        let shared = Arc::clone(&self.slot);
        let handle = self.tasks.spawn(async move {
            sleep(delay).await;
            {
                let mut slot = shared.lock().await;
                match &slot.pending {
                    Some(pending) if pending.generation == generation => slot.pending = None,
                    _ => return,
                }
            }
            job().await;
        });

        slot.pending = Some(Pending {
            generation,
            handle: handle.abort_handle(),
        });
        debug!(delay_ms = delay.as_millis() as u64, "debounce scheduled");
    }

    /// Drop the waiting job, if any. Returns whether one was waiting.
    pub async fn cancel(&self) -> bool {
        let mut slot = self.slot.lock().await;
        match slot.pending.take() {
            Some(pending) => {
                pending.handle.abort();
                debug!("debounce cancelled");
                true
            }
            None => false,
        }
    }

    pub async fn is_pending(&self) -> bool {
        self.slot.lock().await.pending.is_some()
    }

    /// Wait for the waiting job (if any) and every job already running.
    pub async fn settle(&self) {
        self.tasks.close();
        self.tasks.wait().await;
        self.tasks.reopen();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::time::advance;

    fn counting_job(counter: &Arc<AtomicUsize>) -> impl FnOnce() -> std::future::Ready<()> {
        let counter = Arc::clone(counter);
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
            std::future::ready(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn job_runs_after_quiet_period() {
        let debouncer = Debouncer::new(Duration::from_millis(800));
        let runs = Arc::new(AtomicUsize::new(0));

        debouncer.schedule(counting_job(&runs)).await;
        assert!(debouncer.is_pending().await);

        advance(Duration::from_millis(799)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 0);

        debouncer.settle().await;
        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert!(!debouncer.is_pending().await);
    }

    #[tokio::test(start_paused = true)]
    async fn rescheduling_coalesces_into_one_run() {
        let debouncer = Debouncer::new(Duration::from_millis(800));
        let runs = Arc::new(AtomicUsize::new(0));

        for _ in 0..5 {
            debouncer.schedule(counting_job(&runs)).await;
            advance(Duration::from_millis(300)).await;
        }
        debouncer.settle().await;

        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_prevents_the_run() {
        let debouncer = Debouncer::new(Duration::from_millis(800));
        let runs = Arc::new(AtomicUsize::new(0));

        debouncer.schedule(counting_job(&runs)).await;
        assert!(debouncer.cancel().await);
        assert!(!debouncer.cancel().await);

        debouncer.settle().await;
        assert_eq!(runs.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn running_job_is_not_aborted_by_a_new_schedule() {
        let debouncer = Debouncer::new(Duration::from_millis(100));
        let finished = Arc::new(AtomicUsize::new(0));

        let done = Arc::clone(&finished);
        debouncer
            .schedule(move || async move {
                sleep(Duration::from_millis(500)).await;
                done.fetch_add(1, Ordering::SeqCst);
            })
            .await;

        // The first job is now running its slow body.
        sleep(Duration::from_millis(150)).await;
        assert!(!debouncer.is_pending().await);
        debouncer.schedule(counting_job(&finished)).await;
        debouncer.cancel().await;

        debouncer.settle().await;
        assert_eq!(finished.load(Ordering::SeqCst), 1);
    }
}
