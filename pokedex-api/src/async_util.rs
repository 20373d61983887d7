//! Drive an async export while draining its event channel.

use std::future::Future;

use tokio::sync::mpsc;
use tokio::time::{Duration, Instant};

/// Maximum time to drain remaining events after the task completes, in case
/// a sender clone outlives the task.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Run `task` to completion, calling `on_event` for each event received on
/// `event_rx`, and return the task's result once the channel is drained.
///
/// Runs on the current task, so `task` does not need to be `Send`.
pub async fn run_with_events<F, E, R>(
    task: F,
    mut event_rx: mpsc::UnboundedReceiver<E>,
    mut on_event: impl FnMut(E),
) -> R
where
    F: Future<Output = R>,
{
    tokio::pin!(task);
    let mut event_count: u64 = 0;

    let result = loop {
        tokio::select! {
            r = &mut task => break Some(r),
            event = event_rx.recv() => match event {
                Some(e) => {
                    event_count += 1;
                    on_event(e);
                }
                None => {
                    log::debug!(
                        "run_with_events: channel closed before task finished ({event_count} events)"
                    );
                    break None;
                }
            }
        }
    };

    let Some(result) = result else {
        return task.await;
    };

    let deadline = Instant::now() + DRAIN_TIMEOUT;
    loop {
        match tokio::time::timeout_at(deadline, event_rx.recv()).await {
            Ok(Some(e)) => {
                event_count += 1;
                on_event(e);
            }
            Ok(None) => break,
            Err(_) => {
                log::warn!(
                    "run_with_events: drain timed out after {}s, senders likely leaked",
                    DRAIN_TIMEOUT.as_secs()
                );
                break;
            }
        }
    }
    log::debug!("run_with_events: {event_count} events handled");

    result
}
