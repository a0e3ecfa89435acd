use std::sync::Arc;
use std::time::Duration;

use calma_sessions::Tickable;
use calma_sessions::error::SessionError;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time;

/// Recurring tick registration for one running controller.
///
/// The task ends on its own once the controller stops being active.
/// Dropping the handle (or calling [`cancel`](Self::cancel)) tears the
/// registration down, so a discarded view never leaves a timer mutating
/// state behind it.
#[derive(Debug)]
pub struct Ticker {
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    pub fn spawn<T, F>(controller: Arc<Mutex<T>>, period: Duration, mut on_tick: F) -> Self
    where
        T: Tickable + 'static,
        F: FnMut(Result<T::Event, SessionError>) + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut interval = time::interval(period);
            // The first tick completes immediately; a second must elapse
            // before the controller sees its first tick.
            interval.tick().await;
            loop {
                interval.tick().await;

                let (result, still_active) = {
                    let mut guard = controller.lock().await;
                    if !guard.is_active() {
                        break;
                    }
                    let result = guard.tick();
                    (result, guard.is_active())
                };

                if let Err(e) = &result {
                    tracing::warn!(error = %e, "tick failed");
                }
                on_tick(result);

                if !still_active {
                    break;
                }
            }
            tracing::debug!("ticker finished");
        });

        Self {
            handle: Some(handle),
        }
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            tracing::debug!("ticker cancelled");
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(|h| h.is_finished())
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel();
    }
}
