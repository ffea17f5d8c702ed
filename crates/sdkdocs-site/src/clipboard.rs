//! Copy-to-clipboard flow with transient label and toast feedback.

use std::future::Future;
use std::time::Duration;

use sdkdocs_renderer::{COPY_LABEL, unescape_html};

use crate::host::{Clipboard, Feedback, Timer};

/// Label a copy control shows after a successful copy.
pub const COPIED_LABEL: &str = "✓ Copied!";

/// Toast shown after a successful copy.
pub const COPY_SUCCESS_MESSAGE: &str = "Code copied to clipboard!";

/// Toast shown when the clipboard rejects the write.
pub const COPY_FAILURE_MESSAGE: &str = "Failed to copy. Try manually selecting the code.";

/// Default time before a copied label reverts.
pub const DEFAULT_COPIED_LABEL_DURATION: Duration = Duration::from_secs(2);

/// Default time a toast stays visible.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_secs(3);

/// Cosmetic feedback durations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CopySettings {
    /// How long the control shows [`COPIED_LABEL`].
    pub label_duration: Duration,
    /// How long a toast stays visible.
    pub toast_duration: Duration,
}

impl Default for CopySettings {
    fn default() -> Self {
        Self {
            label_duration: DEFAULT_COPIED_LABEL_DURATION,
            toast_duration: DEFAULT_TOAST_DURATION,
        }
    }
}

/// Result of a copy attempt, for hosts that want to report it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CopyOutcome {
    /// Text reached the clipboard.
    Copied,
    /// The clipboard rejected the write; the user was told to copy manually.
    Failed,
}

/// Decode `source_text` and place it on the clipboard.
///
/// `source_text` is the escaped code a copy control carries. On success the
/// control shows [`COPIED_LABEL`] until `label_duration` elapses and a
/// success toast is shown; on failure only the failure toast is shown. The
/// returned future completes once every feedback timer has fired. Concurrent
/// copies share nothing but the toast, where the last writer wins.
pub async fn copy_to_clipboard<C, T>(
    clipboard: &C,
    timer: &T,
    feedback: &dyn Feedback,
    settings: CopySettings,
    control: &str,
    source_text: &str,
) -> CopyOutcome
where
    C: Clipboard,
    T: Timer,
{
    let text = unescape_html(source_text);

    match clipboard.write_text(&text).await {
        Ok(()) => {
            tracing::debug!(control, bytes = text.len(), "Copied code block");
            let previous = resting_label(feedback, control);
            feedback.set_control_label(control, COPIED_LABEL, true);

            let revert = async {
                timer.sleep(settings.label_duration).await;
                feedback.set_control_label(control, &previous, false);
            };
            let toast = show_toast(feedback, timer, COPY_SUCCESS_MESSAGE, settings.toast_duration);
            tokio::join!(revert, toast);
            CopyOutcome::Copied
        }
        Err(e) => {
            tracing::warn!(control, error = %e, "Clipboard write failed");
            show_toast(feedback, timer, COPY_FAILURE_MESSAGE, settings.toast_duration).await;
            CopyOutcome::Failed
        }
    }
}

/// Label to restore after the copied label times out.
///
/// A control still showing [`COPIED_LABEL`] from an overlapping copy falls
/// back to [`COPY_LABEL`].
fn resting_label(feedback: &dyn Feedback, control: &str) -> String {
    let current = feedback.control_label(control);
    if current == COPIED_LABEL {
        COPY_LABEL.to_owned()
    } else {
        current
    }
}

/// Show the global toast and hide it after `duration`.
///
/// The hide is unconditional: an older toast's timer may hide a newer one.
pub fn show_toast<'a, T: Timer>(
    feedback: &'a dyn Feedback,
    timer: &'a T,
    message: &str,
    duration: Duration,
) -> impl Future<Output = ()> {
    feedback.show_toast(message);
    async move {
        timer.sleep(duration).await;
        feedback.hide_toast();
    }
}

/// [`Timer`] backed by the tokio runtime clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioTimer;

impl Timer for TokioTimer {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> {
        tokio::time::sleep(duration)
    }
}
