//! Pane listing: format string, record type and parser.

use crate::error::TmuxError;
use crate::executor::TmuxCommandRunner;

/// Space-delimited format string for `tmux list-panes -a -F`.
pub const LIST_PANES_FORMAT: &str = "#{session_name}:#{window_index} #{pane_pid} #{window_active}";

/// One pane as reported by tmux.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaneInfo {
    /// `session:index` target, used for capture and rename.
    pub window: String,
    /// PID of the pane's shell.
    pub pid: u32,
    /// The pane's window is the active window of its session.
    pub focused: bool,
}

/// Execute `tmux list-panes -a` and parse the output.
pub fn list_panes(runner: &impl TmuxCommandRunner) -> Result<Vec<PaneInfo>, TmuxError> {
    let output = runner.run(&["list-panes", "-a", "-F", LIST_PANES_FORMAT])?;
    Ok(parse_list_panes_output(&output))
}

/// Parse `list-panes` output. Lines with fewer than three fields or a
/// non-numeric pid are skipped.
pub fn parse_list_panes_output(output: &str) -> Vec<PaneInfo> {
    output.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<PaneInfo> {
    let mut fields = line.split_whitespace();
    let window = fields.next()?;
    let pid = fields.next()?.parse::<u32>().ok()?;
    let focused = fields.next()? == "1";
    Some(PaneInfo {
        window: window.to_string(),
        pid,
        focused,
    })
}
