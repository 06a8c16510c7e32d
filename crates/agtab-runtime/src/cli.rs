//! CLI definition using clap derive.

use std::path::PathBuf;

use agtab_core::PromptPolicy;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "agtab",
    version,
    about = "Label tmux windows with coding-agent status"
)]
pub struct Cli {
    #[command(flatten)]
    pub engine: EngineOpts,

    #[command(flatten)]
    pub tmux: TmuxOpts,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Poll and relabel windows until interrupted (default)
    Daemon,
    /// Run a single labeling cycle and print `window<TAB>label`
    Once(OnceOpts),
    /// Classify pane text from FILE (or stdin) and print the reading as JSON
    Classify(ClassifyOpts),
}

#[derive(clap::Args, Debug, Default, PartialEq, Eq)]
pub struct OnceOpts {
    /// Print labels without renaming any window
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(clap::Args, Debug, Default, PartialEq, Eq)]
pub struct ClassifyOpts {
    /// File holding captured pane text; stdin when omitted
    pub file: Option<PathBuf>,
}

/// Engine tunables. Flags override the config file.
#[derive(clap::Args, Debug, Default)]
pub struct EngineOpts {
    /// TOML config file
    #[arg(long, global = true, env = "AGTAB_CONFIG")]
    pub config: Option<PathBuf>,

    /// Milliseconds between the end of one cycle and the start of the next
    #[arg(long, global = true)]
    pub poll_interval_ms: Option<u64>,

    /// Consecutive cycles a new label must hold before it is applied
    #[arg(long, global = true)]
    pub stability_threshold: Option<u32>,

    /// What counts as typed prompt text on first sight of a window
    #[arg(long, global = true, value_enum)]
    pub prompt_policy: Option<PromptPolicyArg>,
}

/// tmux server and process-table targeting.
#[derive(clap::Args, Debug)]
pub struct TmuxOpts {
    /// tmux socket path (overrides AGTAB_TMUX_SOCKET_PATH / AGTAB_TMUX_SOCKET_NAME)
    #[arg(long, global = true)]
    pub tmux_socket: Option<String>,

    /// tmux binary
    #[arg(long, global = true, default_value = "tmux")]
    pub tmux_bin: String,

    /// procfs mount point
    #[arg(long, global = true, default_value = "/proc")]
    pub proc_root: PathBuf,
}

impl Default for TmuxOpts {
    fn default() -> Self {
        Self {
            tmux_socket: None,
            tmux_bin: "tmux".to_string(),
            proc_root: PathBuf::from("/proc"),
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PromptPolicyArg {
    AnyText,
    Alphanumeric,
}

impl From<PromptPolicyArg> for PromptPolicy {
    fn from(arg: PromptPolicyArg) -> Self {
        match arg {
            PromptPolicyArg::AnyText => PromptPolicy::AnyText,
            PromptPolicyArg::Alphanumeric => PromptPolicy::Alphanumeric,
        }
    }
}
