//! `WindowBackend`: the multiplexer operations a labeling cycle needs.

use agtab_core::LabelCommit;

use crate::capture::capture_window;
use crate::error::TmuxError;
use crate::executor::TmuxCommandRunner;
use crate::pane_info::{PaneInfo, list_panes};
use crate::rename::{rename_window, restore_automatic_rename};

pub trait WindowBackend: Send {
    fn list_panes(&self) -> Result<Vec<PaneInfo>, TmuxError>;

    fn capture_pane(&self, window: &str) -> Result<String, TmuxError>;

    fn rename_window(&self, window: &str, label: &str) -> Result<(), TmuxError>;

    fn restore_automatic_rename(&self, window: &str) -> Result<(), TmuxError>;

    /// Push a hysteresis commit to the multiplexer.
    fn apply(&self, window: &str, commit: &LabelCommit) -> Result<(), TmuxError> {
        match commit {
            LabelCommit::Rename(label) => self.rename_window(window, label),
            LabelCommit::RestoreAutomatic => self.restore_automatic_rename(window),
        }
    }
}

/// `WindowBackend` over real tmux commands.
#[derive(Debug, Clone)]
pub struct TmuxBackend<R> {
    runner: R,
}

impl<R: TmuxCommandRunner> TmuxBackend<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }
}

impl<R: TmuxCommandRunner> WindowBackend for TmuxBackend<R> {
    fn list_panes(&self) -> Result<Vec<PaneInfo>, TmuxError> {
        list_panes(&self.runner)
    }

    fn capture_pane(&self, window: &str) -> Result<String, TmuxError> {
        capture_window(&self.runner, window)
    }

    fn rename_window(&self, window: &str, label: &str) -> Result<(), TmuxError> {
        rename_window(&self.runner, window, label)
    }

    fn restore_automatic_rename(&self, window: &str) -> Result<(), TmuxError> {
        restore_automatic_rename(&self.runner, window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct ScriptedRunner {
        calls: Mutex<Vec<String>>,
    }

    impl TmuxCommandRunner for ScriptedRunner {
        fn run(&self, args: &[&str]) -> Result<String, TmuxError> {
            self.calls.lock().expect("lock").push(args.join(" "));
            match args.first().copied() {
                Some("list-panes") => Ok("main:0 10 1\nmain:1 20 0\n".to_string()),
                Some("capture-pane") => Ok("Done.\n\u{203a} \n".to_string()),
                Some("rename-window" | "set-option") => Ok(String::new()),
                other => Err(TmuxError::CommandFailed(format!("unexpected {other:?}"))),
            }
        }
    }

    #[test]
    fn lists_and_captures_through_runner() {
        let backend = TmuxBackend::new(ScriptedRunner::default());
        let panes = backend.list_panes().expect("list");
        assert_eq!(panes.len(), 2);
        assert_eq!(
            backend.capture_pane("main:1").expect("capture"),
            "Done.\n\u{203a} \n"
        );
    }

    #[test]
    fn apply_dispatches_commits() {
        let backend = TmuxBackend::new(ScriptedRunner::default());
        backend
            .apply("main:0", &LabelCommit::Rename("c \u{1f4a4}".to_string()))
            .expect("rename");
        backend
            .apply("main:1", &LabelCommit::RestoreAutomatic)
            .expect("restore");

        let calls = backend.runner().calls.lock().expect("lock");
        assert_eq!(
            *calls,
            vec![
                "rename-window -t main:0 c \u{1f4a4}".to_string(),
                "set-option -t main:1 automatic-rename on".to_string(),
            ]
        );
    }
}
