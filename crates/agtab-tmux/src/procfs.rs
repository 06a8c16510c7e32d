//! Process metadata from a procfs-style directory tree.

use std::fs;
use std::path::PathBuf;

/// Raw per-process files. Every accessor returns `None` when the process
/// is gone or the file is unreadable.
pub trait ProcessSource {
    /// Every numeric entry under the root.
    fn pids(&self) -> Vec<u32>;
    fn stat(&self, pid: u32) -> Option<String>;
    fn cmdline(&self, pid: u32) -> Option<Vec<u8>>;
    fn comm(&self, pid: u32) -> Option<String>;
}

impl<T: ProcessSource + ?Sized> ProcessSource for &T {
    fn pids(&self) -> Vec<u32> {
        (**self).pids()
    }

    fn stat(&self, pid: u32) -> Option<String> {
        (**self).stat(pid)
    }

    fn cmdline(&self, pid: u32) -> Option<Vec<u8>> {
        (**self).cmdline(pid)
    }

    fn comm(&self, pid: u32) -> Option<String> {
        (**self).comm(pid)
    }
}

/// `ProcessSource` reading `<root>/<pid>/{stat,cmdline,comm}`.
#[derive(Debug, Clone)]
pub struct ProcFs {
    root: PathBuf,
}

impl ProcFs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn file(&self, pid: u32, name: &str) -> PathBuf {
        self.root.join(pid.to_string()).join(name)
    }
}

impl Default for ProcFs {
    fn default() -> Self {
        Self::new("/proc")
    }
}

impl ProcessSource for ProcFs {
    fn pids(&self) -> Vec<u32> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(err) => {
                tracing::debug!(root = %self.root.display(), "process scan failed: {err}");
                return Vec::new();
            }
        };
        entries
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_ok_and(|t| t.is_dir()))
            .filter_map(|entry| entry.file_name().to_str()?.parse::<u32>().ok())
            .collect()
    }

    fn stat(&self, pid: u32) -> Option<String> {
        fs::read_to_string(self.file(pid, "stat")).ok()
    }

    fn cmdline(&self, pid: u32) -> Option<Vec<u8>> {
        fs::read(self.file(pid, "cmdline")).ok()
    }

    fn comm(&self, pid: u32) -> Option<String> {
        fs::read_to_string(self.file(pid, "comm")).ok()
    }
}

/// Parent pid from a `stat` line: `pid (comm) state ppid ...`. The command
/// name may itself contain spaces and parentheses, so fields are counted
/// from the last `)`. Returns 0 when unparsable.
pub fn parse_ppid_from_stat(stat: &str) -> u32 {
    let Some(close) = stat.rfind(')') else {
        return 0;
    };
    stat[close + 1..]
        .split_whitespace()
        .nth(1)
        .and_then(|ppid| ppid.parse().ok())
        .unwrap_or(0)
}

/// NUL-separated argv to a single space-separated line.
pub fn decode_cmdline(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw)
        .replace('\0', " ")
        .trim_end()
        .to_string()
}
