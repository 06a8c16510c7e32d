use serde::{Deserialize, Serialize};
use std::fmt;

// ─── Agent kind ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    Claude,
    Codex,
}

impl AgentKind {
    /// Detection order: a command line mentioning both resolves to Claude.
    pub const ALL: [Self; 2] = [Self::Claude, Self::Codex];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Claude => "claude",
            Self::Codex => "codex",
        }
    }

    /// Lower-case substring identifying this agent in a command line.
    pub fn marker(self) -> &'static str {
        self.as_str()
    }

    /// Two-character label prefix.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Claude => "c ",
            Self::Codex => "x ",
        }
    }

    /// Input prompt glyph drawn by the agent's TUI.
    pub fn prompt_glyph(self) -> &'static str {
        match self {
            Self::Claude => "\u{276f}", // ❯
            Self::Codex => "\u{203a}", // ›
        }
    }

    /// Identify the agent kind from a command line (case-insensitive).
    pub fn from_command_line(cmdline: &str) -> Option<Self> {
        let lower = cmdline.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| lower.contains(kind.marker()))
    }

    /// True when `text` (already lower-cased) mentions any agent marker.
    pub fn any_marker_in(text: &str) -> bool {
        Self::ALL.iter().any(|kind| text.contains(kind.marker()))
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Glyph ────────────────────────────────────────────────────────

/// Closed status vocabulary rendered into the window label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Glyph {
    Computing,
    Idle,
    /// Display-only replacement for `Idle` while the window is unread.
    Unread,
    Build,
    Test,
    Package,
    VersionControl,
    Network,
    Generic,
}

impl Glyph {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Computing => "\u{1f9e0}", // 🧠
            Self::Idle => "\u{1f4a4}", // 💤
            Self::Unread => "\u{1f4ec}", // 📬
            Self::Build => "\u{1f528}", // 🔨
            Self::Test => "\u{1f9ea}", // 🧪
            Self::Package => "\u{1f4e6}", // 📦
            Self::VersionControl => "\u{1f500}", // 🔀
            Self::Network => "\u{1f310}", // 🌐
            Self::Generic => "\u{2699}\u{fe0f}", // ⚙️
        }
    }

    pub fn is_working(self) -> bool {
        !matches!(self, Self::Idle | Self::Unread)
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Status ───────────────────────────────────────────────────────

/// Status of an agent-hosting pane. "No agent" is `Option::<Status>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Status {
    pub agent: AgentKind,
    pub glyph: Glyph,
}

impl Status {
    pub fn new(agent: AgentKind, glyph: Glyph) -> Self {
        Self { agent, glyph }
    }

    pub fn is_working(self) -> bool {
        self.glyph.is_working()
    }

    /// Swap the idle glyph for the unread one; other glyphs are untouched.
    #[must_use]
    pub fn with_unread(self) -> Self {
        match self.glyph {
            Glyph::Idle => Self::new(self.agent, Glyph::Unread),
            _ => self,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.agent.prefix(), self.glyph)
    }
}

/// Grouping priority: working (2) > present but idle (1) > no agent (0).
pub fn status_priority(status: Option<Status>) -> u8 {
    match status {
        Some(s) if s.is_working() => 2,
        Some(_) => 1,
        None => 0,
    }
}

/// Render the final window label. No status means an empty label, which
/// hands naming back to tmux.
pub fn format_label(status: Option<Status>, topic: Option<&str>) -> String {
    match (status, topic) {
        (None, _) => String::new(),
        (Some(s), Some(t)) if !t.is_empty() => format!("{s} {t}"),
        (Some(s), _) => s.to_string(),
    }
}
