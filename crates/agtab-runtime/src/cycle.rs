//! One labeling cycle: list panes, resolve each pane's status from its
//! process tree and captured text, settle every window and push the
//! committed labels to tmux.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};

use agtab_core::descendants::{classify_child_signals, collect_child_signals};
use agtab_core::topic::classify_pane_topic;
use agtab_core::{
    EngineConfig, PaneReading, Status, WindowObservation, WindowOutcome, WindowStore,
    WindowSummary, find_agent, group_windows, pane_text_needed, resolve_status, settle_window,
};
use agtab_tmux::{PaneInfo, ProcessSource, ProcessTable, WindowBackend};

/// One capture and everything derived from it.
#[derive(Debug, Clone)]
pub struct CapturedPane {
    pub reading: PaneReading,
    pub topic: Option<String>,
}

impl CapturedPane {
    pub fn new(text: &str) -> Self {
        Self {
            reading: PaneReading::from_content(text),
            topic: classify_pane_topic(text),
        }
    }
}

/// At most one capture per window per cycle. Failures are remembered too,
/// so a broken window is not retried within the cycle.
#[derive(Debug, Default)]
struct CaptureCache {
    windows: HashMap<String, Option<CapturedPane>>,
}

impl CaptureCache {
    fn get(&mut self, backend: &impl WindowBackend, window: &str) -> Option<&CapturedPane> {
        self.windows
            .entry(window.to_string())
            .or_insert_with(|| match backend.capture_pane(window) {
                Ok(text) => Some(CapturedPane::new(&text)),
                Err(err) => {
                    tracing::debug!(window, "capture failed: {err}");
                    None
                }
            })
            .as_ref()
    }

    fn attempts(&self) -> usize {
        self.windows.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyMode {
    Apply,
    DryRun,
}

#[derive(Debug, Default)]
pub struct CycleReport {
    pub panes: usize,
    pub captures: usize,
    pub outcomes: Vec<WindowOutcome>,
    /// Commits successfully pushed to tmux.
    pub applied: usize,
}

/// Owns the backend, the process source and every piece of per-window
/// memory. One instance drives the whole daemon.
pub struct Labeler<B, S> {
    backend: B,
    procs: S,
    config: EngineConfig,
    store: WindowStore,
}

impl<B: WindowBackend, S: ProcessSource> Labeler<B, S> {
    pub fn new(backend: B, procs: S, config: EngineConfig) -> Self {
        Self {
            backend,
            procs,
            config,
            store: WindowStore::new(),
        }
    }

    #[cfg(test)]
    pub fn store(&self) -> &WindowStore {
        &self.store
    }

    pub fn run_cycle(&mut self, now: DateTime<Utc>, mode: ApplyMode) -> CycleReport {
        let panes = match self.backend.list_panes() {
            Ok(panes) => panes,
            Err(err) => {
                tracing::debug!("list-panes failed: {err}");
                return CycleReport::default();
            }
        };
        if panes.is_empty() {
            return CycleReport::default();
        }

        let mut table = ProcessTable::scan(&self.procs);
        let mut captures = CaptureCache::default();

        let pane_summaries: Vec<WindowSummary> = panes
            .iter()
            .map(|pane| WindowSummary {
                window: pane.window.clone(),
                status: resolve_pane(
                    &self.backend,
                    &mut self.store,
                    &self.config,
                    &mut table,
                    &mut captures,
                    pane,
                    now,
                ),
                focused: pane.focused,
            })
            .collect();

        let mut report = CycleReport {
            panes: panes.len(),
            ..CycleReport::default()
        };

        for summary in group_windows(pane_summaries) {
            let captured = match summary.status {
                Some(_) => captures.get(&self.backend, &summary.window),
                None => None,
            };
            let outcome = settle_window(
                &mut self.store,
                WindowObservation {
                    window: &summary.window,
                    status: summary.status,
                    focused: summary.focused,
                    reading: captured.map(|c| &c.reading),
                    topic: captured.and_then(|c| c.topic.clone()),
                },
                &self.config,
            );

            if let Some(commit) = &outcome.commit
                && mode == ApplyMode::Apply
            {
                match self.backend.apply(&outcome.window, commit) {
                    Ok(()) => {
                        report.applied += 1;
                        tracing::info!(
                            window = %outcome.window,
                            label = %outcome.label,
                            "window relabeled"
                        );
                    }
                    Err(err) => {
                        tracing::warn!(window = %outcome.window, "rename failed: {err}");
                    }
                }
            }
            report.outcomes.push(outcome);
        }

        let live: HashSet<String> = panes.into_iter().map(|p| p.window).collect();
        self.store.retain_windows(&live);
        report.captures = captures.attempts();
        report
    }

    /// Give every window this labeler renamed back to tmux's automatic
    /// naming. Returns how many were restored.
    pub fn restore_all(&mut self) -> usize {
        let mut restored = 0;
        for window in self.store.board.labelled_windows() {
            match self.backend.restore_automatic_rename(&window) {
                Ok(()) => restored += 1,
                Err(err) => tracing::debug!(window = %window, "restore failed: {err}"),
            }
        }
        restored
    }
}

/// Status of one pane: `None` when no agent runs beneath its shell.
fn resolve_pane<S: ProcessSource>(
    backend: &impl WindowBackend,
    store: &mut WindowStore,
    config: &EngineConfig,
    table: &mut ProcessTable<S>,
    captures: &mut CaptureCache,
    pane: &PaneInfo,
    now: DateTime<Utc>,
) -> Option<Status> {
    let agent = find_agent(pane.pid, &table.topology, &mut table.metadata)?;
    let signals = collect_child_signals(agent.pid, &table.topology, &mut table.metadata);
    let child = classify_child_signals(&signals);
    let pane_reading = if pane_text_needed(child) {
        captures
            .get(backend, &pane.window)
            .map(|captured| &captured.reading)
    } else {
        None
    };
    Some(resolve_status(
        store,
        &pane.window,
        agent.kind,
        child,
        pane_reading,
        now,
        config,
    ))
}
