//! TmuxCommandRunner trait and TmuxExecutor (blocking subprocess wrapper).

use std::process::Command;

use crate::error::TmuxError;

/// Runs one tmux command and returns its stdout. Mocked in tests.
pub trait TmuxCommandRunner: Send + Sync {
    fn run(&self, args: &[&str]) -> Result<String, TmuxError>;
}

impl<T: TmuxCommandRunner + ?Sized> TmuxCommandRunner for &T {
    fn run(&self, args: &[&str]) -> Result<String, TmuxError> {
        (**self).run(args)
    }
}

/// Real tmux executor using `std::process::Command`.
#[derive(Debug, Clone)]
pub struct TmuxExecutor {
    tmux_bin: String,
    socket_path: Option<String>,
    socket_name: Option<String>,
}

impl TmuxExecutor {
    pub fn new(tmux_bin: impl Into<String>) -> Self {
        Self {
            tmux_bin: tmux_bin.into(),
            socket_path: None,
            socket_name: None,
        }
    }

    #[must_use]
    pub fn with_socket_path(mut self, path: impl Into<String>) -> Self {
        self.socket_path = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_socket_name(mut self, name: impl Into<String>) -> Self {
        self.socket_name = Some(name.into());
        self
    }

    pub fn tmux_bin(&self) -> &str {
        &self.tmux_bin
    }

    /// Server selection flags placed before every command. A socket path
    /// takes precedence over a socket name.
    pub fn server_args(&self) -> Vec<&str> {
        match (&self.socket_path, &self.socket_name) {
            (Some(path), _) => vec!["-S", path.as_str()],
            (None, Some(name)) => vec!["-L", name.as_str()],
            (None, None) => Vec::new(),
        }
    }
}

impl Default for TmuxExecutor {
    fn default() -> Self {
        Self::new("tmux")
    }
}

impl TmuxCommandRunner for TmuxExecutor {
    fn run(&self, args: &[&str]) -> Result<String, TmuxError> {
        let output = Command::new(&self.tmux_bin)
            .args(self.server_args())
            .args(args)
            .output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TmuxError::CommandFailed(format!(
                "{} exited with {}: {}",
                args.first().copied().unwrap_or("tmux"),
                output.status.code().unwrap_or(-1),
                stderr.trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_executor_targets_default_server() {
        let exec = TmuxExecutor::default();
        assert_eq!(exec.tmux_bin(), "tmux");
        assert!(exec.server_args().is_empty());
    }

    #[test]
    fn socket_name_uses_dash_l() {
        let exec = TmuxExecutor::default().with_socket_name("agents");
        assert_eq!(exec.server_args(), vec!["-L", "agents"]);
    }

    #[test]
    fn socket_path_beats_socket_name() {
        let exec = TmuxExecutor::new("/opt/tmux/bin/tmux")
            .with_socket_name("agents")
            .with_socket_path("/tmp/tmux-1000/work");
        assert_eq!(exec.server_args(), vec!["-S", "/tmp/tmux-1000/work"]);
        assert_eq!(exec.tmux_bin(), "/opt/tmux/bin/tmux");
    }

    #[test]
    fn missing_binary_is_io_error() {
        let exec = TmuxExecutor::new("/nonexistent/agtab-test/tmux");
        let err = exec.run(&["list-panes"]).expect_err("binary is missing");
        assert!(matches!(err, TmuxError::Io(_)));
    }

    #[test]
    fn blanket_ref_impl() {
        struct Echo;
        impl TmuxCommandRunner for Echo {
            fn run(&self, args: &[&str]) -> Result<String, TmuxError> {
                Ok(args.join(" "))
            }
        }
        let echo = Echo;
        let by_ref: &Echo = &echo;
        assert_eq!(by_ref.run(&["a", "b"]).expect("ok"), "a b");
    }
}
