//! Pane capture.

use crate::error::TmuxError;
use crate::executor::TmuxCommandRunner;

/// Visible text of the active pane in `window`.
pub fn capture_window(runner: &impl TmuxCommandRunner, window: &str) -> Result<String, TmuxError> {
    runner.run(&["capture-pane", "-t", window, "-p"])
}
