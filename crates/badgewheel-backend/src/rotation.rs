//! Preset rotation scheduling.
//!
//! The scheduler has two states: idle (no rotation task) and rotating
//! (cycling through an ordered preset list forever). A new start request
//! replaces any rotation in flight: the controller signals cancellation,
//! awaits the old task's termination, and only then spawns the new loop, so
//! exactly one rotation task is ever alive. There is no stop transition;
//! rotation ends only when replaced or when the process shuts down.

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Runs one rotation loop over `presets`, wrapping indefinitely.
///
/// `apply` loads one preset into the live selection and returns how long the
/// preset should be held before advancing. The cancellation signal is checked
/// at every iteration boundary and interrupts the hold sleep early; there is
/// no mid-application preemption.
pub fn spawn_rotation<A, Fut>(
    presets: Vec<String>,
    mut cancelled: watch::Receiver<bool>,
    mut apply: A,
) -> JoinHandle<()>
where
    A: FnMut(String) -> Fut + Send + 'static,
    Fut: Future<Output = Duration> + Send,
{
    tokio::spawn(async move {
        if presets.is_empty() {
            return;
        }
        loop {
            for name in &presets {
                if *cancelled.borrow() {
                    return;
                }
                let hold = apply(name.clone()).await;
                tokio::select! {
                    _ = tokio::time::sleep(hold) => {}
                    _ = cancelled.changed() => {
                        if *cancelled.borrow() {
                            return;
                        }
                    }
                }
            }
        }
    })
}

/// Owner of the currently-active rotation task, if any.
///
/// Callers serialize access to the controller (the backend keeps it behind a
/// mutex), which makes the cancel-then-spawn protocol race-free.
#[derive(Debug, Default)]
pub struct RotationController {
    cancel: Option<watch::Sender<bool>>,
    task: Option<JoinHandle<()>>,
}

impl RotationController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels the in-flight rotation (if any), waits for its task to exit,
    /// and starts a new loop over `presets`.
    pub async fn replace<A, Fut>(&mut self, presets: Vec<String>, apply: A)
    where
        A: FnMut(String) -> Fut + Send + 'static,
        Fut: Future<Output = Duration> + Send,
    {
        if let Some(cancel) = self.cancel.take() {
            let _ = cancel.send(true);
        }
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }

        let (cancel_tx, cancel_rx) = watch::channel(false);
        self.task = Some(spawn_rotation(presets, cancel_rx, apply));
        self.cancel = Some(cancel_tx);
    }

    /// Whether a rotation task is currently active.
    pub fn is_rotating(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_apply(
        counter: Arc<AtomicUsize>,
        hold: Duration,
    ) -> impl FnMut(String) -> std::pin::Pin<Box<dyn Future<Output = Duration> + Send>> {
        move |_name| {
            let counter = counter.clone();
            Box::pin(async move {
                counter.fetch_add(1, Ordering::SeqCst);
                hold
            })
        }
    }

    #[tokio::test(start_paused = true)]
    async fn rotation_wraps_over_the_preset_list() {
        let applied = Arc::new(AtomicUsize::new(0));
        let mut controller = RotationController::new();
        controller
            .replace(
                vec!["a".to_string(), "b".to_string()],
                counting_apply(applied.clone(), Duration::from_secs(60)),
            )
            .await;

        tokio::time::sleep(Duration::from_secs(310)).await;
        // Five whole minutes elapsed: the two-entry list must have wrapped.
        assert!(applied.load(Ordering::SeqCst) > 2);
        assert!(controller.is_rotating());
    }

    #[tokio::test(start_paused = true)]
    async fn replacing_a_rotation_leaves_exactly_one_loop() {
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        let mut controller = RotationController::new();

        controller
            .replace(
                vec!["a".to_string()],
                counting_apply(first.clone(), Duration::from_secs(60)),
            )
            .await;
        tokio::time::sleep(Duration::from_secs(150)).await;

        controller
            .replace(
                vec!["b".to_string()],
                counting_apply(second.clone(), Duration::from_secs(60)),
            )
            .await;
        // replace() awaited the old task, so its count is final.
        let first_final = first.load(Ordering::SeqCst);

        tokio::time::sleep(Duration::from_secs(300)).await;
        assert_eq!(first.load(Ordering::SeqCst), first_final);
        assert!(second.load(Ordering::SeqCst) > 0);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_preset_list_never_applies_anything() {
        let applied = Arc::new(AtomicUsize::new(0));
        let mut controller = RotationController::new();
        controller
            .replace(
                Vec::new(),
                counting_apply(applied.clone(), Duration::from_secs(60)),
            )
            .await;

        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(applied.load(Ordering::SeqCst), 0);
        assert!(!controller.is_rotating());
    }
}
