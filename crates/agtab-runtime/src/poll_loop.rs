//! Poll loop: runs one labeling cycle, sleeps, repeats. On shutdown every
//! window the daemon renamed is handed back to tmux's automatic naming.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::Mutex;

use agtab_tmux::{ProcessSource, WindowBackend};

use crate::cycle::{ApplyMode, Labeler};

/// Run the daemon until ctrl-c or SIGTERM.
pub async fn run_daemon<B, S>(labeler: Labeler<B, S>, interval: Duration) -> anyhow::Result<()>
where
    B: WindowBackend + 'static,
    S: ProcessSource + Send + 'static,
{
    let labeler = Arc::new(Mutex::new(labeler));

    let poll_labeler = Arc::clone(&labeler);
    let mut poll_handle = tokio::spawn(async move {
        run_poll_loop(poll_labeler, interval).await;
    });

    tokio::select! {
        () = shutdown_signal() => {}
        _ = &mut poll_handle => {
            tracing::warn!("poll loop exited unexpectedly");
        }
    }
    poll_handle.abort();

    let restored = tokio::task::spawn_blocking(move || labeler.blocking_lock().restore_all())
        .await?;
    tracing::info!(restored, "daemon stopped");
    Ok(())
}

async fn run_poll_loop<B, S>(labeler: Arc<Mutex<Labeler<B, S>>>, interval: Duration)
where
    B: WindowBackend + 'static,
    S: ProcessSource + Send + 'static,
{
    loop {
        let cycle_labeler = Arc::clone(&labeler);
        let report = tokio::task::spawn_blocking(move || {
            cycle_labeler
                .blocking_lock()
                .run_cycle(Utc::now(), ApplyMode::Apply)
        })
        .await;

        match report {
            Ok(report) => tracing::debug!(
                panes = report.panes,
                windows = report.outcomes.len(),
                captures = report.captures,
                applied = report.applied,
                "cycle complete"
            ),
            Err(err) => tracing::warn!("poll cycle failed: {err}"),
        }

        // Sleep after the cycle so a slow cycle never overlaps the next.
        tokio::time::sleep(interval).await;
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!("ctrl-c handler unavailable: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    () = ctrl_c => tracing::info!("received ctrl-c, shutting down"),
                    _ = sigterm.recv() => tracing::info!("received SIGTERM, shutting down"),
                }
            }
            Err(err) => {
                tracing::warn!("SIGTERM handler unavailable: {err}");
                ctrl_c.await;
                tracing::info!("received ctrl-c, shutting down");
            }
        }
    }

    #[cfg(not(unix))]
    {
        ctrl_c.await;
        tracing::info!("received ctrl-c, shutting down");
    }
}
