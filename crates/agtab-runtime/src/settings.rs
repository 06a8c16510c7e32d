//! Config merge (defaults → TOML file → flags) and backend construction.

use anyhow::Context;

use agtab_core::EngineConfig;
use agtab_tmux::{ProcFs, TmuxBackend, TmuxExecutor};

use crate::cli::{EngineOpts, TmuxOpts};
use crate::cycle::Labeler;

pub const SOCKET_PATH_ENV: &str = "AGTAB_TMUX_SOCKET_PATH";
pub const SOCKET_NAME_ENV: &str = "AGTAB_TMUX_SOCKET_NAME";

pub fn load_engine_config(opts: &EngineOpts) -> anyhow::Result<EngineConfig> {
    let mut config = match &opts.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(ms) = opts.poll_interval_ms {
        config.poll_interval_ms = ms;
    }
    if let Some(threshold) = opts.stability_threshold {
        config.stability_threshold = threshold;
    }
    if let Some(policy) = opts.prompt_policy {
        config.prompt_policy = policy.into();
    }
    config.validate()?;
    Ok(config)
}

pub fn build_executor(opts: &TmuxOpts) -> TmuxExecutor {
    build_executor_with_env(opts, |key| std::env::var(key).ok())
}

/// Socket targeting: --tmux-socket > AGTAB_TMUX_SOCKET_PATH > AGTAB_TMUX_SOCKET_NAME
fn build_executor_with_env(opts: &TmuxOpts, env: impl Fn(&str) -> Option<String>) -> TmuxExecutor {
    let executor = TmuxExecutor::new(opts.tmux_bin.clone());
    if let Some(socket) = &opts.tmux_socket {
        executor.with_socket_path(socket.clone())
    } else if let Some(path) = env(SOCKET_PATH_ENV) {
        executor.with_socket_path(path)
    } else if let Some(name) = env(SOCKET_NAME_ENV) {
        executor.with_socket_name(name)
    } else {
        executor
    }
}

pub type TmuxLabeler = Labeler<TmuxBackend<TmuxExecutor>, ProcFs>;

pub fn build_labeler(opts: &TmuxOpts, config: EngineConfig) -> TmuxLabeler {
    Labeler::new(
        TmuxBackend::new(build_executor(opts)),
        ProcFs::new(opts.proc_root.clone()),
        config,
    )
}
