//! Per-cycle evaluation: pane status resolution, grouping by window and
//! settling each window into a label.
//!
//! Order within a cycle:
//! 1. `resolve_status` for every pane hosting an agent
//! 2. `group_windows` merges panes sharing a window
//! 3. `settle_window` runs the unread decision, composes the label and
//!    feeds it through hysteresis
//! 4. `WindowStore::retain_windows` drops windows that disappeared

use chrono::{DateTime, Utc};

use crate::config::EngineConfig;
use crate::descendants::ChildActivity;
use crate::hysteresis::LabelCommit;
use crate::pane_text::PaneReading;
use crate::store::WindowStore;
use crate::types::{AgentKind, Glyph, Status, format_label, status_priority};
use crate::unread::{UnreadInputs, should_mark_unread};

// ─── Status resolution ────────────────────────────────────────────

/// Whether `resolve_status` will consult the pane text for this child
/// activity. Specific child work (build, test, ...) decides on its own.
pub fn pane_text_needed(child: Option<ChildActivity>) -> bool {
    matches!(child, None | Some(ChildActivity::Generic))
}

/// Status of a pane whose agent was found. `reading` is `None` on a capture
/// miss or when `pane_text_needed` is false.
///
/// - specific child work shows its own glyph
/// - an unrecognised child shows 💤 when a prompt waits, 🧠 when the pane
///   is active, ⚙️ otherwise
/// - no child work shows 💤 when a prompt waits, else 🧠 or 💤 by activity
pub fn resolve_status(
    store: &mut WindowStore,
    window: &str,
    agent: AgentKind,
    child: Option<ChildActivity>,
    reading: Option<&PaneReading>,
    now: DateTime<Utc>,
    config: &EngineConfig,
) -> Status {
    let attention = reading.is_some_and(PaneReading::needs_attention);
    let glyph = match child {
        Some(ChildActivity::Generic) => {
            let active = store.activity.pane_active(window, reading, now, config);
            if attention {
                Glyph::Idle
            } else if active {
                Glyph::Computing
            } else {
                Glyph::Generic
            }
        }
        Some(activity) => activity.glyph(),
        None if attention => Glyph::Idle,
        None if store.activity.pane_active(window, reading, now, config) => Glyph::Computing,
        None => Glyph::Idle,
    };
    Status::new(agent, glyph)
}

// ─── Grouping ─────────────────────────────────────────────────────

/// Status and focus for one window (or one pane before grouping).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSummary {
    pub window: String,
    pub status: Option<Status>,
    pub focused: bool,
}

/// Merge pane summaries by window, keeping first-seen window order. Focus
/// is OR-ed; the highest-priority status wins and the earlier pane wins ties.
pub fn group_windows(panes: impl IntoIterator<Item = WindowSummary>) -> Vec<WindowSummary> {
    let mut windows: Vec<WindowSummary> = Vec::new();
    for pane in panes {
        match windows.iter_mut().find(|w| w.window == pane.window) {
            Some(existing) => {
                existing.focused |= pane.focused;
                if status_priority(pane.status) > status_priority(existing.status) {
                    existing.status = pane.status;
                }
            }
            None => windows.push(pane),
        }
    }
    windows
}

// ─── Settling ─────────────────────────────────────────────────────

/// Everything `settle_window` needs about one window this cycle.
#[derive(Debug, Clone)]
pub struct WindowObservation<'a> {
    pub window: &'a str,
    pub status: Option<Status>,
    pub focused: bool,
    /// Capture of the window; `None` on a miss or when not needed.
    pub reading: Option<&'a PaneReading>,
    /// Topic extracted from the capture this cycle, if any.
    pub topic: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowOutcome {
    pub window: String,
    /// Label this cycle wants to show (before hysteresis).
    pub label: String,
    pub unread: bool,
    /// Change hysteresis decided to apply, if any.
    pub commit: Option<LabelCommit>,
}

pub fn settle_window(
    store: &mut WindowStore,
    obs: WindowObservation<'_>,
    config: &EngineConfig,
) -> WindowOutcome {
    let window = obs.window;
    let is_working = obs.status.is_some_and(Status::is_working);

    let (prompt_signature, completion_signature) = match (obs.status, obs.reading) {
        (Some(_), Some(reading)) if !is_working => (
            reading.attention_signature.as_deref(),
            reading.completion_signature.as_deref(),
        ),
        _ => (None, None),
    };

    let previous = store.history(window);
    let mark = should_mark_unread(
        &UnreadInputs {
            status: obs.status,
            was_working: previous.is_some_and(|h| h.was_working),
            focused: obs.focused,
            seen_before: previous.is_some(),
            prompt_signature,
            prev_prompt_signature: previous.and_then(|h| h.prompt_signature.as_deref()),
            completion_signature,
            prev_completion_signature: previous.and_then(|h| h.completion_signature.as_deref()),
        },
        config.prompt_policy,
    );

    if mark {
        store.board.mark_unread(window);
    }
    if obs.focused || is_working {
        store.board.clear_unread(window);
    }
    store.record_cycle(
        window,
        is_working,
        prompt_signature.map(str::to_string),
        completion_signature.map(str::to_string),
    );

    let unread = store.board.is_unread(window);
    let display = match obs.status {
        Some(status) if unread => Some(status.with_unread()),
        status => status,
    };
    let topic = match display {
        Some(_) => store.remember_topic(window, obs.topic),
        None => None,
    };
    let label = format_label(display, topic.as_deref());
    let commit = store
        .board
        .evaluate(window, &label, config.stability_threshold);

    WindowOutcome {
        window: window.to_string(),
        label,
        unread,
        commit,
    }
}
