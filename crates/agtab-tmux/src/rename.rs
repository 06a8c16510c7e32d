//! Window renames.

use crate::error::TmuxError;
use crate::executor::TmuxCommandRunner;

pub fn rename_window(
    runner: &impl TmuxCommandRunner,
    window: &str,
    label: &str,
) -> Result<(), TmuxError> {
    runner.run(&["rename-window", "-t", window, label])?;
    Ok(())
}

/// Hand the window name back to tmux.
pub fn restore_automatic_rename(
    runner: &impl TmuxCommandRunner,
    window: &str,
) -> Result<(), TmuxError> {
    runner.run(&["set-option", "-t", window, "automatic-rename", "on"])?;
    Ok(())
}
