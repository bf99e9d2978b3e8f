//! Console busy indicator for long-running fetches.
//!
//! A spinner is one tokio task writing a rotating glyph until its busy flag
//! is cleared. It never touches the wrapped operation's data.

use std::future::Future;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

const GLYPHS: [char; 4] = ['|', '/', '-', '\\'];
const BACKSPACE: char = '\u{8}';

/// A running spinner. Stop it with [`Spinner::stop`]; dropping it aborts the task.
pub struct Spinner {
    busy: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Spinner {
    /// Start spinning on `out`, advancing one glyph every `delay`.
    pub fn spawn<W>(delay: Duration, mut out: W) -> Self
    where
        W: Write + Send + 'static,
    {
        let busy = Arc::new(AtomicBool::new(true));
        let flag = busy.clone();

        let handle = tokio::spawn(async move {
            for glyph in GLYPHS.iter().cycle() {
                if !flag.load(Ordering::Acquire) {
                    break;
                }
                // Console output is best-effort.
                let _ = write!(out, "{glyph}");
                let _ = out.flush();
                tokio::time::sleep(delay).await;
                let _ = write!(out, "{BACKSPACE}");
                let _ = out.flush();
            }
        });

        Self {
            busy,
            handle: Some(handle),
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Clear the busy flag and wait for the task to exit.
    pub async fn stop(mut self) {
        self.busy.store(false, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                tracing::debug!(error = %e, "Spinner task ended abnormally");
            }
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

/// Run `operation` with a spinner on stderr when `enabled`.
///
/// The spinner stops when `operation` completes, and is aborted if the
/// returned future is dropped or the operation panics.
pub async fn with_spinner<F>(enabled: bool, delay: Duration, operation: F) -> F::Output
where
    F: Future,
{
    if !enabled {
        return operation.await;
    }
    let spinner = Spinner::spawn(delay, std::io::stderr());
    let output = operation.await;
    spinner.stop().await;
    output
}
