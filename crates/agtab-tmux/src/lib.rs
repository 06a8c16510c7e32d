//! agtab-tmux: IO boundary for the labeler.
//! Runs tmux subprocesses (pane listing, capture, window renames) and reads
//! process metadata from procfs. No status logic lives here.

pub mod backend;
pub mod capture;
pub mod error;
pub mod executor;
pub mod pane_info;
pub mod procfs;
pub mod process_table;
pub mod rename;

pub use backend::{TmuxBackend, WindowBackend};
pub use capture::capture_window;
pub use error::TmuxError;
pub use executor::{TmuxCommandRunner, TmuxExecutor};
pub use pane_info::{LIST_PANES_FORMAT, PaneInfo, list_panes, parse_list_panes_output};
pub use procfs::{ProcFs, ProcessSource, decode_cmdline, parse_ppid_from_stat};
pub use process_table::{ProcessMetadata, ProcessTable};
pub use rename::{rename_window, restore_automatic_rename};
