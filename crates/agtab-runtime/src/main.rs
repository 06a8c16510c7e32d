//! agtab: labels tmux windows with the status of the coding agent inside.
//! Polls panes and process trees, then renames each window to a short
//! status label such as `x 🧠 parser` or `c 📬`.

use clap::Parser;

mod cli;
mod cmd_classify;
mod cmd_once;
mod cycle;
mod poll_loop;
mod settings;

fn init_tracing() {
    let filter = std::env::var("AGTAB_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();
    init_tracing();

    match args.command.unwrap_or(cli::Command::Daemon) {
        cli::Command::Daemon => {
            let config = settings::load_engine_config(&args.engine)?;
            let labeler = settings::build_labeler(&args.tmux, config.clone());
            tracing::info!(
                poll_interval_ms = config.poll_interval_ms,
                stability_threshold = config.stability_threshold,
                "agtab daemon starting"
            );
            poll_loop::run_daemon(labeler, config.poll_interval()).await?;
        }
        cli::Command::Once(opts) => {
            let config = settings::load_engine_config(&args.engine)?;
            let labeler = settings::build_labeler(&args.tmux, config);
            cmd_once::cmd_once(labeler, opts.dry_run).await?;
        }
        cli::Command::Classify(opts) => {
            cmd_classify::cmd_classify(opts.file.as_deref())?;
        }
    }

    Ok(())
}
