//! Descendant classifier: maps the live subprocesses of an agent to a
//! coarse activity category.

use serde::Serialize;

use crate::topology::{ProcessLookup, Topology};
use crate::types::{AgentKind, Glyph};

// ─── Marker tables ────────────────────────────────────────────────

/// Build tools. Checked first: compiler stages (`cc1`) run underneath
/// higher-level invocations that would otherwise match other groups.
pub const BUILD_MARKERS: &[&str] = &[
    "make",
    "gcc",
    "g++",
    "cc1",
    "rustc",
    "javac",
    "tsc",
    "webpack",
    "vite",
    "esbuild",
    "rollup",
    "coordinator/cli.ts build",
    " next build",
    "npm run build",
    "pnpm run build",
    "yarn build",
    "go build",
    "cargo build",
];

pub const TEST_MARKERS: &[&str] = &["jest", "vitest", "pytest", "mocha", "phpunit", "rspec"];

pub const PACKAGE_MARKERS: &[&str] = &["npm", "yarn", "pnpm", "pip", "apt", "brew", "pacman"];

pub const VCS_MARKERS: &[&str] = &["git"];

pub const NETWORK_MARKERS: &[&str] = &["curl", "wget"];

/// Interpreter names the agents run under. A bare runtime thread with no
/// readable command line belongs to the agent itself.
pub const AGENT_RUNTIME_COMMS: &[&str] = &["node"];

// ─── Classification ───────────────────────────────────────────────

/// Activity inferred from an agent's live subprocesses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChildActivity {
    Build,
    Test,
    Package,
    VersionControl,
    Network,
    Generic,
}

impl ChildActivity {
    pub fn glyph(self) -> Glyph {
        match self {
            Self::Build => Glyph::Build,
            Self::Test => Glyph::Test,
            Self::Package => Glyph::Package,
            Self::VersionControl => Glyph::VersionControl,
            Self::Network => Glyph::Network,
            Self::Generic => Glyph::Generic,
        }
    }
}

/// Ordered marker groups; the first group with any hit wins.
const MARKER_GROUPS: &[(ChildActivity, &[&str])] = &[
    (ChildActivity::Build, BUILD_MARKERS),
    (ChildActivity::Test, TEST_MARKERS),
    (ChildActivity::Package, PACKAGE_MARKERS),
    (ChildActivity::VersionControl, VCS_MARKERS),
    (ChildActivity::Network, NETWORK_MARKERS),
];

/// Whether a descendant is the agent's own runtime or helper rather than
/// user-visible work. Both inputs must already be lower-cased.
pub fn is_agent_like_process(comm: &str, cmdline: &str) -> bool {
    if comm.is_empty() && cmdline.is_empty() {
        return true;
    }
    if AgentKind::any_marker_in(cmdline) {
        return true;
    }
    let agent_comm = AgentKind::any_marker_in(comm) || AGENT_RUNTIME_COMMS.contains(&comm);
    agent_comm && cmdline.is_empty()
}

/// Command text of every non-agent descendant of `agent_pid`, lower-cased.
/// Falls back to the short name when the command line is unreadable.
pub fn collect_child_signals(
    agent_pid: u32,
    topology: &Topology,
    procs: &mut impl ProcessLookup,
) -> Vec<String> {
    let mut signals = Vec::new();
    for pid in topology.descendants(agent_pid) {
        let comm = procs.comm(pid).to_lowercase();
        let cmdline = procs.cmdline(pid).to_lowercase();
        if is_agent_like_process(&comm, &cmdline) {
            continue;
        }
        let signal = if cmdline.is_empty() { comm } else { cmdline };
        if !signal.is_empty() {
            signals.push(signal);
        }
    }
    signals
}

/// Classify descendant signals. `None` means no live child work, in which
/// case the caller falls back to the pane text.
pub fn classify_child_signals<S: AsRef<str>>(signals: &[S]) -> Option<ChildActivity> {
    if signals.is_empty() {
        return None;
    }
    let joined = signals
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("\n")
        .to_lowercase();

    let activity = MARKER_GROUPS
        .iter()
        .find(|(_, markers)| markers.iter().any(|m| joined.contains(m)))
        .map_or(ChildActivity::Generic, |&(activity, _)| activity);
    Some(activity)
}
