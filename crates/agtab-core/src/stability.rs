//! Activity stability: grace period and frozen-spinner staleness.
//!
//! - **Grace**: a window confirmed active within the last `grace_secs` still
//!   reports active, so a spinner redraw that momentarily drops the marker
//!   does not flash the label to idle.
//! - **Staleness**: an active line whose text has not changed for
//!   `stale_secs` while a prompt is visible below it is a frozen spinner,
//!   not ongoing work.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, TimeDelta, Utc};

use crate::config::EngineConfig;
use crate::pane_text::PaneReading;

/// Active-line text and when it was first seen with that exact text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveMarkerTrack {
    pub signature: String,
    pub first_seen: DateTime<Utc>,
}

/// Per-window activity timestamps and marker tracking.
#[derive(Debug, Clone, Default)]
pub struct ActivityMemory {
    last_active: HashMap<String, DateTime<Utc>>,
    markers: HashMap<String, ActiveMarkerTrack>,
}

impl ActivityMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the active marker in `reading` has gone stale.
    ///
    /// No marker leaves tracking untouched. A marker without a prompt, or
    /// with text that differs from the tracked one, restarts the clock.
    pub fn is_stale_active_marker(
        &mut self,
        window: &str,
        reading: &PaneReading,
        now: DateTime<Utc>,
        threshold: TimeDelta,
    ) -> bool {
        let Some(signature) = reading.active_signature.as_deref() else {
            return false;
        };
        if reading.prompt_signature.is_some()
            && let Some(track) = self.markers.get(window)
            && track.signature == signature
        {
            return now.signed_duration_since(track.first_seen) >= threshold;
        }
        self.markers.insert(
            window.to_string(),
            ActiveMarkerTrack {
                signature: signature.to_string(),
                first_seen: now,
            },
        );
        false
    }

    pub fn clear_active_marker(&mut self, window: &str) {
        self.markers.remove(window);
    }

    /// Filtered activity for one window this cycle. `None` is a capture
    /// miss and counts as inactive.
    pub fn pane_active(
        &mut self,
        window: &str,
        reading: Option<&PaneReading>,
        now: DateTime<Utc>,
        config: &EngineConfig,
    ) -> bool {
        let active = match reading {
            Some(reading) if reading.active => {
                !self.is_stale_active_marker(window, reading, now, config.stale())
            }
            _ => {
                self.clear_active_marker(window);
                false
            }
        };

        if active {
            self.last_active.insert(window.to_string(), now);
            return true;
        }

        if let Some(&last) = self.last_active.get(window) {
            if now.signed_duration_since(last) < config.grace() {
                return true;
            }
            self.last_active.remove(window);
        }
        false
    }

    pub fn last_active(&self, window: &str) -> Option<DateTime<Utc>> {
        self.last_active.get(window).copied()
    }

    pub fn marker(&self, window: &str) -> Option<&ActiveMarkerTrack> {
        self.markers.get(window)
    }

    /// Forget every window not in `live`.
    pub fn retain(&mut self, live: &HashSet<String>) {
        self.last_active.retain(|window, _| live.contains(window));
        self.markers.retain(|window, _| live.contains(window));
    }
}
