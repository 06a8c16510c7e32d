//! Per-window memory carried across cycles.

use std::collections::{HashMap, HashSet};

use crate::hysteresis::StatusBoard;
use crate::stability::ActivityMemory;

/// What the previous cycle concluded about a window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowHistory {
    pub was_working: bool,
    pub prompt_signature: Option<String>,
    pub completion_signature: Option<String>,
    /// Last non-empty topic extracted for the window.
    pub topic: Option<String>,
}

/// Every per-window map the engine keeps, pruned together.
#[derive(Debug, Clone, Default)]
pub struct WindowStore {
    pub activity: ActivityMemory,
    pub board: StatusBoard,
    history: HashMap<String, WindowHistory>,
}

impl WindowStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` until the window has been settled once.
    pub fn history(&self, window: &str) -> Option<&WindowHistory> {
        self.history.get(window)
    }

    /// Store this cycle's working flag and signatures; the topic carries over.
    pub fn record_cycle(
        &mut self,
        window: &str,
        was_working: bool,
        prompt_signature: Option<String>,
        completion_signature: Option<String>,
    ) {
        let entry = self.history.entry(window.to_string()).or_default();
        entry.was_working = was_working;
        entry.prompt_signature = prompt_signature;
        entry.completion_signature = completion_signature;
    }

    /// Replace the remembered topic when `fresh` has one, then return the
    /// remembered topic.
    pub fn remember_topic(&mut self, window: &str, fresh: Option<String>) -> Option<String> {
        let entry = self.history.entry(window.to_string()).or_default();
        if let Some(topic) = fresh.filter(|t| !t.is_empty()) {
            entry.topic = Some(topic);
        }
        entry.topic.clone()
    }

    pub fn window_count(&self) -> usize {
        self.history.len()
    }

    /// Forget every window absent from this cycle's pane list.
    pub fn retain_windows(&mut self, live: &HashSet<String>) {
        self.activity.retain(live);
        self.board.retain(live);
        self.history.retain(|window, _| live.contains(window));
    }
}
