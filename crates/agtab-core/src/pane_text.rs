//! Pane-text classifier.
//!
//! Works on the visible buffer returned by `tmux capture-pane`. Every scan
//! walks non-blank lines bottom-up: the prompt and spinner always sit near
//! the end, and older scrollback says nothing about the current state.

use serde::Serialize;

use crate::types::AgentKind;

// ─── Heuristic tables ─────────────────────────────────────────────

/// Lines examined for activity, prompt and active-line signatures.
pub const ACTIVITY_SCAN_DEPTH: usize = 12;
/// Lines examined for completion banners.
pub const COMPLETION_SCAN_DEPTH: usize = 20;
/// Lines examined for a topic word.
pub const TOPIC_SCAN_DEPTH: usize = 24;

pub const INTERRUPT_HINT: &str = "esc to interrupt";

/// Spinner glyphs both agents draw in front of their status verb.
pub const SPINNER_PREFIXES: &[&str] = &[
    "\u{b7} ",   // ·
    "\u{2022} ", // •
    "\u{2722} ", // ✢
    "\u{273b} ", // ✻
    "\u{2733} ", // ✳
    "\u{2736} ", // ✶
    "\u{273d} ", // ✽
    "* ",
];

/// Present participle followed by an ellipsis: "Thinking…", "Brewing...".
pub const GERUND_ELLIPSES: &[&str] = &["ing\u{2026}", "ing..."];

/// Completion lines matched exactly or followed by a space and more text.
pub const COMPLETION_LINES: &[&str] = &["Done.", "All set."];

/// Timed summary banner Codex prints after a turn.
pub const WORKED_BANNER: &str = "\u{2500} Worked for ";

// ─── Line predicates ──────────────────────────────────────────────

/// Non-blank, trimmed lines from the bottom up, at most `depth` of them.
pub fn recent_lines(content: &str, depth: usize) -> impl Iterator<Item = &str> {
    content
        .lines()
        .rev()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(depth)
}

pub fn spinner_prefix(line: &str) -> Option<&'static str> {
    SPINNER_PREFIXES
        .iter()
        .copied()
        .find(|prefix| line.starts_with(prefix))
}

pub fn has_active_marker(line: &str) -> bool {
    if line.contains(INTERRUPT_HINT) {
        return true;
    }
    spinner_prefix(line).is_some() && GERUND_ELLIPSES.iter().any(|cue| line.contains(cue))
}

pub fn is_completion_line(line: &str) -> bool {
    if line.starts_with(WORKED_BANNER) {
        return true;
    }
    COMPLETION_LINES.iter().any(|done| {
        line.strip_prefix(done)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with(' '))
    })
}

/// Split a prompt line into its agent kind and the text typed after the
/// glyph. A line is a prompt when it is the bare glyph or the glyph
/// followed by a space.
pub fn prompt_line(line: &str) -> Option<(AgentKind, &str)> {
    AgentKind::ALL.into_iter().find_map(|kind| {
        let rest = line.strip_prefix(kind.prompt_glyph())?;
        if rest.is_empty() || rest.starts_with(' ') {
            Some((kind, rest.trim()))
        } else {
            None
        }
    })
}

// ─── Content classifiers ──────────────────────────────────────────

/// True when the pane shows ongoing computation. Whichever of a completion
/// line or an active marker sits nearest the bottom decides.
pub fn classify_pane_content(content: &str) -> bool {
    for line in recent_lines(content, ACTIVITY_SCAN_DEPTH) {
        if is_completion_line(line) {
            return false;
        }
        if has_active_marker(line) {
            return true;
        }
    }
    false
}

/// Text of the nearest active-marker line.
pub fn active_signature(content: &str) -> Option<&str> {
    recent_lines(content, ACTIVITY_SCAN_DEPTH).find(|line| has_active_marker(line))
}

/// Nearest prompt line tagged with its agent kind, e.g. `codex:› Explain`.
/// Ignores whether the pane is active.
pub fn detect_prompt_signature(content: &str) -> Option<String> {
    recent_lines(content, ACTIVITY_SCAN_DEPTH)
        .find_map(|line| prompt_line(line).map(|(kind, _)| format!("{}:{line}", kind.as_str())))
}

/// Prompt signature while idle; `None` whenever the pane is active.
pub fn attention_signature(content: &str) -> Option<String> {
    if classify_pane_content(content) {
        return None;
    }
    detect_prompt_signature(content)
}

/// Text of the nearest completion line.
pub fn completion_signature(content: &str) -> Option<&str> {
    recent_lines(content, COMPLETION_SCAN_DEPTH).find(|line| is_completion_line(line))
}

// ─── Reading ──────────────────────────────────────────────────────

/// Every signal derived from one capture, computed once per cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PaneReading {
    pub active: bool,
    pub active_signature: Option<String>,
    pub prompt_signature: Option<String>,
    pub attention_signature: Option<String>,
    pub completion_signature: Option<String>,
}

impl PaneReading {
    pub fn from_content(content: &str) -> Self {
        Self {
            active: classify_pane_content(content),
            active_signature: active_signature(content).map(str::to_string),
            prompt_signature: detect_prompt_signature(content),
            attention_signature: attention_signature(content),
            completion_signature: completion_signature(content).map(str::to_string),
        }
    }

    pub fn needs_attention(&self) -> bool {
        self.attention_signature.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CODEX_WAITING: &str = "Done.\n\n\u{203a} Run /review on my current changes\n\n  \
                                 gpt-5.3-codex \u{b7} 87% left\n";

    #[test]
    fn active_contents() {
        let cases = [
            (
                "esc to interrupt",
                "some output\n  (esc to interrupt)\n\u{276f} \n",
            ),
            (
                "claude thinking",
                "\u{b7} Thinking\u{2026} (5s \u{b7} esc to interrupt)\n\u{276f} \n",
            ),
            (
                "codex planning",
                "\u{2022} Planning try removal patch (5m 42s \u{2022} esc to interrupt)\n\
                 \u{203a} \n",
            ),
            (
                "spinner no esc",
                "\u{2722} Transfiguring\u{2026} (thought for 6s)\n\u{276f} \n",
            ),
            ("brewing no esc", "\u{b7} Brewing\u{2026} (2s)\n\u{276f} \n"),
            (
                "leavening",
                "\u{b7} Leavening\u{2026} (54s \u{b7} \u{2191} 1.0k tokens \u{b7} \
                 thought for 28s)\n\u{276f} \n",
            ),
            (
                "unknown future verb",
                "\u{273b} Zymurgying\u{2026} (3s)\n\u{276f} \n",
            ),
            ("three dots", "\u{b7} Pondering... (1s)\n\u{276f} \n"),
            (
                "bare spinner no parens",
                "* Perusing\u{2026}\n\n\u{2500}\u{2500}\u{2500}\n\u{276f} \n",
            ),
            ("bare spinner three dots", "\u{b7} Thinking...\n\u{276f} \n"),
            (
                "star spinner",
                "\u{2736} Noodling\u{2026} (12s)\n\u{276f} \n",
            ),
            (
                "active spinner above prompt text",
                "\u{2022} Implementing normalization, filtering, and selection logic \
                 (2m 23s \u{2022} esc to interrupt)\n\
                 \n\
                 \u{203a} Run /review on my current changes\n\
                 \n  gpt-5.3-codex xhigh \u{b7} 58% left \u{b7} ~/content-magic-weaver\n",
            ),
        ];
        for (name, content) in cases {
            assert!(classify_pane_content(content), "expected active: {name}");
        }
    }

    #[test]
    fn idle_contents() {
        let cases = [
            (
                "claude idle",
                "output\n\n\u{276f} \n\u{2500}\u{2500}\u{2500}\n  \u{1f7e2} 19%\n  \
                 \u{23f5}\u{23f5} bypass permissions on\n",
            ),
            ("codex idle", CODEX_WAITING),
            (
                "codex worked",
                "\u{2500} Worked for 1m 51s \u{2500}\u{2500}\u{2500}\n\
                 \u{2022} Deployed.\n\u{203a} \n",
            ),
            (
                "codex cogitated",
                "\u{273b} Cogitated for 1m 27s\n\u{276f} \n",
            ),
            (
                "prose contains ing dots",
                "Discussion summary...\nI am discussing...\n\u{203a} Explain this codebase\n",
            ),
            ("empty", ""),
            ("plain shell", "$ ls\nfile1\n$ \n"),
        ];
        for (name, content) in cases {
            assert!(!classify_pane_content(content), "expected idle: {name}");
        }
    }

    #[test]
    fn completion_nearest_bottom_wins() {
        let content = "\u{b7} Thinking\u{2026} (5s \u{b7} esc to interrupt)\nDone.\n\u{276f} \n";
        assert!(!classify_pane_content(content));

        let content = "Done.\n\u{b7} Thinking\u{2026} (5s \u{b7} esc to interrupt)\n\u{276f} \n";
        assert!(classify_pane_content(content));
    }

    #[test]
    fn markers_beyond_scan_depth_ignored() {
        let mut content = String::from("\u{b7} Thinking\u{2026} (esc to interrupt)\n");
        for i in 0..ACTIVITY_SCAN_DEPTH {
            content.push_str(&format!("line {i}\n"));
        }
        assert!(!classify_pane_content(&content));
        assert_eq!(active_signature(&content), None);
    }

    #[test]
    fn completion_line_variants() {
        assert!(is_completion_line("Done."));
        assert!(is_completion_line("Done. Tests pass."));
        assert!(is_completion_line("All set."));
        assert!(is_completion_line("All set. Pushed the branch."));
        assert!(is_completion_line("\u{2500} Worked for 2m 21s \u{2500}"));
        assert!(!is_completion_line("Done.Later"));
        assert!(!is_completion_line("Done"));
        assert!(!is_completion_line("Not Done."));
    }

    #[test]
    fn prompt_line_parsing() {
        assert_eq!(
            prompt_line("\u{203a} Explain this codebase"),
            Some((AgentKind::Codex, "Explain this codebase"))
        );
        assert_eq!(prompt_line("\u{276f}"), Some((AgentKind::Claude, "")));
        assert_eq!(prompt_line("\u{276f}foo"), None);
        assert_eq!(prompt_line("$ ls"), None);
    }

    #[test]
    fn attention_while_idle() {
        let cases = [
            ("codex waiting at prompt", CODEX_WAITING, true),
            (
                "claude waiting at prompt",
                "All set.\n\n\u{276f} \n\u{2500}\u{2500}\u{2500}\n  \u{1f7e2} 19%\n",
                true,
            ),
            (
                "active spinner is not attention",
                "\u{b7} Thinking\u{2026} (5s \u{b7} esc to interrupt)\n\u{276f} \n",
                false,
            ),
            ("plain output", "$ ls\nfile1\n$ \n", false),
        ];
        for (name, content, want) in cases {
            let reading = PaneReading::from_content(content);
            assert_eq!(reading.needs_attention(), want, "{name}");
            assert_eq!(
                reading.attention_signature,
                attention_signature(content),
                "{name}"
            );
        }
    }

    #[test]
    fn attention_signatures() {
        assert_eq!(
            attention_signature(
                "Done.\n\n\u{203a} Explain this codebase\n  gpt-5.3-codex \u{b7} 87% left\n"
            ),
            Some("codex:\u{203a} Explain this codebase".to_string())
        );
        assert_eq!(
            attention_signature("All set.\n\n\u{276f} \n"),
            Some("claude:\u{276f}".to_string())
        );
        assert_eq!(
            attention_signature(
                "\u{b7} Thinking\u{2026} (5s \u{b7} esc to interrupt)\n\u{276f} \n"
            ),
            None
        );
    }

    #[test]
    fn active_signature_picks_marker_line() {
        let content = "Done.\n\n\u{25e6} Planning broad tests and monitoring \
                       (1m 03s \u{2022} esc to interrupt)\n\
                       \u{203a} Find and fix a bug in @filename\n";
        assert_eq!(
            active_signature(content),
            Some(
                "\u{25e6} Planning broad tests and monitoring \
                 (1m 03s \u{2022} esc to interrupt)"
            )
        );
    }

    #[test]
    fn prompt_signature_ignores_activity() {
        let content =
            "Done.\n\n\u{203a} Summarize recent commits\n\n  gpt-5.3-codex xhigh \u{b7} 45% left\n";
        assert_eq!(
            detect_prompt_signature(content),
            Some("codex:\u{203a} Summarize recent commits".to_string())
        );

        let busy = "\u{b7} Thinking\u{2026} (esc to interrupt)\n\u{276f} \n";
        assert_eq!(
            detect_prompt_signature(busy),
            Some("claude:\u{276f}".to_string())
        );
    }

    #[test]
    fn completion_signatures() {
        let cases = [
            (
                "codex worked marker",
                "\u{2500} Worked for 2m 21s \u{2500}\n\u{2022} Summary\n\u{203a} Next task\n",
                Some("\u{2500} Worked for 2m 21s \u{2500}"),
            ),
            (
                "done line",
                "Done.\n\n\u{203a} Explain this codebase\n",
                Some("Done."),
            ),
            (
                "no completion marker",
                "Random output\n\u{203a} prompt\n",
                None,
            ),
        ];
        for (name, content, want) in cases {
            assert_eq!(completion_signature(content), want, "{name}");
        }
    }

    #[test]
    fn reading_while_thinking() {
        let reading = PaneReading::from_content(
            "\u{b7} Thinking\u{2026} (5s \u{b7} esc to interrupt)\n\u{276f} \n",
        );
        assert!(reading.active);
        assert_eq!(reading.attention_signature, None);
        assert!(!reading.needs_attention());
        assert_eq!(reading.prompt_signature.as_deref(), Some("claude:\u{276f}"));
        assert_eq!(
            reading.active_signature.as_deref(),
            Some("\u{b7} Thinking\u{2026} (5s \u{b7} esc to interrupt)")
        );
    }

    #[test]
    fn reading_after_completion() {
        let reading = PaneReading::from_content("Done.\n\n\u{203a} Explain this codebase\n");
        assert!(!reading.active);
        assert_eq!(
            reading.attention_signature.as_deref(),
            Some("codex:\u{203a} Explain this codebase")
        );
        assert_eq!(reading.completion_signature.as_deref(), Some("Done."));
        assert_eq!(reading.active_signature, None);
    }
}
