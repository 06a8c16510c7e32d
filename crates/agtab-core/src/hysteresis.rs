//! Label hysteresis and unread flags.
//!
//! A new label must be seen for `threshold` consecutive cycles before it
//! replaces the applied one. Alternating candidates reset the count, so a
//! status flickering between two values never commits.

use std::collections::{HashMap, HashSet};

/// Per-window label state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusRecord {
    /// Label currently shown in tmux. Empty means automatic naming.
    pub applied: String,
    /// Candidate seen on recent cycles but not yet applied.
    pub pending: Option<String>,
    /// Consecutive cycles `pending` has been seen.
    pub count: u32,
    /// Agent finished or asked for input while the window was unfocused.
    pub unread: bool,
}

/// Change to push to the multiplexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelCommit {
    Rename(String),
    /// Hand naming back to tmux.
    RestoreAutomatic,
}

#[derive(Debug, Clone, Default)]
pub struct StatusBoard {
    records: HashMap<String, StatusRecord>,
}

impl StatusBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed this cycle's label for `window`. Returns the commit to apply
    /// once the label has held for `threshold` cycles.
    pub fn evaluate(&mut self, window: &str, label: &str, threshold: u32) -> Option<LabelCommit> {
        let record = self.records.entry(window.to_string()).or_default();

        if record.applied == label {
            record.pending = None;
            record.count = 0;
            return None;
        }

        if record.pending.as_deref() == Some(label) {
            record.count += 1;
        } else {
            record.pending = Some(label.to_string());
            record.count = 1;
        }

        if record.count < threshold {
            return None;
        }

        record.applied = label.to_string();
        record.pending = None;
        record.count = 0;

        if label.is_empty() {
            Some(LabelCommit::RestoreAutomatic)
        } else {
            Some(LabelCommit::Rename(label.to_string()))
        }
    }

    pub fn mark_unread(&mut self, window: &str) {
        self.records.entry(window.to_string()).or_default().unread = true;
    }

    pub fn clear_unread(&mut self, window: &str) {
        if let Some(record) = self.records.get_mut(window) {
            record.unread = false;
        }
    }

    pub fn is_unread(&self, window: &str) -> bool {
        self.records.get(window).is_some_and(|r| r.unread)
    }

    pub fn record(&self, window: &str) -> Option<&StatusRecord> {
        self.records.get(window)
    }

    pub fn applied(&self, window: &str) -> Option<&str> {
        self.records.get(window).map(|r| r.applied.as_str())
    }

    /// Windows currently showing a non-empty label, sorted.
    pub fn labelled_windows(&self) -> Vec<String> {
        let mut windows: Vec<String> = self
            .records
            .iter()
            .filter(|(_, r)| !r.applied.is_empty())
            .map(|(w, _)| w.clone())
            .collect();
        windows.sort();
        windows
    }

    pub fn retain(&mut self, live: &HashSet<String>) {
        self.records.retain(|window, _| live.contains(window));
    }
}
