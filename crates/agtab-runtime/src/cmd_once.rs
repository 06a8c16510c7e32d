//! `agtab once`: a single labeling cycle, printed as `window<TAB>label`.

use chrono::Utc;

use agtab_tmux::{ProcessSource, WindowBackend};

use crate::cycle::{ApplyMode, CycleReport, Labeler};

/// Entry point for `agtab once`.
pub async fn cmd_once<B, S>(mut labeler: Labeler<B, S>, dry_run: bool) -> anyhow::Result<()>
where
    B: WindowBackend + 'static,
    S: ProcessSource + Send + 'static,
{
    let mode = if dry_run {
        ApplyMode::DryRun
    } else {
        ApplyMode::Apply
    };
    let report = tokio::task::spawn_blocking(move || labeler.run_cycle(Utc::now(), mode))
        .await?;

    let output = format_report(&report);
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

/// One `window<TAB>label` line per window; an empty label means the
/// window is left to tmux.
pub(crate) fn format_report(report: &CycleReport) -> String {
    report
        .outcomes
        .iter()
        .map(|outcome| format!("{}\t{}", outcome.window, outcome.label))
        .collect::<Vec<_>>()
        .join("\n")
}
