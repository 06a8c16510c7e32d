//! agtab-core: status inference and stability engine.
//! Classifies process-tree and pane-text signals into a window label,
//! filters flicker, and decides when a window needs the user's attention.
//! No IO beyond reading an optional config file: callers inject process
//! metadata and captured pane text.

pub mod config;
pub mod descendants;
pub mod engine;
pub mod hysteresis;
pub mod pane_text;
pub mod stability;
pub mod store;
pub mod topic;
pub mod topology;
pub mod types;
pub mod unread;

pub use config::{ConfigError, EngineConfig, PromptPolicy};
pub use descendants::ChildActivity;
pub use engine::{
    WindowObservation, WindowOutcome, WindowSummary, group_windows, pane_text_needed,
    resolve_status, settle_window,
};
pub use hysteresis::{LabelCommit, StatusBoard};
pub use pane_text::PaneReading;
pub use store::WindowStore;
pub use topology::{AgentProcess, ProcessLookup, Topology, find_agent};
pub use types::{AgentKind, Glyph, Status};
