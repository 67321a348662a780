//! Async driver: feed a page from a channel and keep its clock in step with
//! tokio time.
//!
//! The page itself stays single-threaded; the driver owns it inside one task
//! and hands it back when the sender side closes.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::error::FxError;
use crate::event::message::PageEvent;
use crate::page::Page;

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// Run `page` until `events` closes, returning it.
///
/// Every received event is dispatched after the clock catches up with real
/// time; between events the clock advances once per animation frame.
pub async fn drive(mut page: Page, mut events: mpsc::Receiver<PageEvent>) -> Result<Page, FxError> {
    let start = Instant::now();
    let base = page.now();
    let mut frames = time::interval(Duration::from_millis(page.config.frame_ms.max(1)));
    frames.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Some(event) => {
                    page.advance_to(base + elapsed_ms(start));
                    page.dispatch(event)?;
                }
                None => break,
            },
            _ = frames.tick() => page.advance_to(base + elapsed_ms(start)),
        }
    }

    page.advance_to(base + elapsed_ms(start));
    tracing::debug!(now = page.now(), "page driver stopped");
    Ok(page)
}

/// Spawn [`drive`] on the current runtime.
pub fn spawn(page: Page, capacity: usize) -> (mpsc::Sender<PageEvent>, JoinHandle<Result<Page, FxError>>) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (tx, tokio::spawn(drive(page, rx)))
}
