//! Topic word extraction.
//!
//! Picks one short word describing what the agent is working on, from the
//! text typed at the prompt or the verb line under a spinner.

use crate::pane_text::{
    TOPIC_SCAN_DEPTH, has_active_marker, prompt_line, recent_lines, spinner_prefix,
};

/// Topics are truncated to this many characters.
pub const TOPIC_MAX_CHARS: usize = 8;

/// Filler that never makes a useful topic: grammar words, generic nouns,
/// imperative verbs typed at prompts, and the agents' own spinner verbs.
#[rustfmt::skip]
pub const STOP_WORDS: &[&str] = &[
    // grammar
    "a", "an", "and", "are", "as", "at", "be", "by", "do", "for", "from", "i", "if", "in",
    "into", "is", "it", "its", "me", "my", "now", "of", "on", "or", "our", "please", "run",
    "show", "that", "the", "this", "to", "up", "us", "we", "with", "your",
    // generic nouns
    "app", "page", "file", "issue", "task", "filename", "codebase", "change", "changes",
    "commit", "commits", "current",
    // imperative verbs
    "add", "check", "create", "deploy", "explain", "fix", "make", "remove", "summarize",
    "update", "write", "clean", "debug", "improve", "investigate", "refactor", "test",
    "tests", "work",
    // spinner verbs
    "thinking", "planning", "implementing", "accomplishing", "brewing", "leavening",
    "perusing", "pondering", "transfiguring",
];

/// Raw token → canonical topic.
pub const ALIASES: &[(&str, &str)] = &[
    ("auth", "auth"),
    ("authentication", "auth"),
    ("authorize", "auth"),
    ("login", "auth"),
    ("signin", "auth"),
    ("oauth", "auth"),
    ("nav", "nav"),
    ("navbar", "nav"),
    ("navigation", "nav"),
    ("menu", "menu"),
    ("menus", "menu"),
    ("hamburger", "menu"),
    ("drawer", "menu"),
    ("search", "search"),
    ("query", "search"),
    ("shop", "shop"),
    ("checkout", "checkout"),
    ("cart", "cart"),
    ("payment", "payment"),
    ("shipping", "shipping"),
    ("promo", "promo"),
    ("promotions", "promo"),
    ("campaign", "promo"),
    ("image", "image"),
    ("images", "image"),
    ("photo", "image"),
    ("parser", "parser"),
    ("scrape", "scrape"),
    ("crawler", "scrape"),
    ("db", "db"),
    ("database", "db"),
    ("sql", "sql"),
    ("api", "api"),
    ("cache", "cache"),
    ("redis", "cache"),
    ("deploy", "deploy"),
    ("release", "deploy"),
];

/// Domain keywords that outrank longer generic words.
pub const PREFERRED: &[&str] = &[
    "auth", "nav", "menu", "search", "shop", "promo", "checkout", "cart", "payment", "shipping",
    "parser", "scrape", "db", "api", "cache", "deploy",
];

const PREFERRED_BONUS: i64 = 7;
const ALIAS_BONUS: i64 = 4;
const GERUND_PENALTY: i64 = 3;

/// Punctuation stripped from both ends of a token.
const TRIM_CHARS: &[char] = &[
    '_', '-', '.', ':', ',', ';', '!', '?', '(', ')', '[', ']', '{', '}', '"', '\'', '`',
];

fn alias_for(raw: &str) -> Option<&'static str> {
    ALIASES
        .iter()
        .find(|(from, _)| *from == raw)
        .map(|&(_, to)| to)
}

fn is_numeric_word(word: &str) -> bool {
    !word.is_empty() && word.chars().all(char::is_numeric)
}

/// Split on anything that is not a letter or digit.
pub fn tokenize_topic_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
}

fn trim_topic(token: &str) -> Option<String> {
    let token = token.trim_matches(TRIM_CHARS);
    if token.is_empty() {
        return None;
    }
    Some(token.chars().take(TOPIC_MAX_CHARS).collect())
}

/// Lower-case, drop filler, map aliases, trim punctuation and cap length.
pub fn normalize_topic_token(raw: &str) -> Option<String> {
    let raw = raw.to_lowercase();
    if raw.is_empty() || is_numeric_word(&raw) || STOP_WORDS.contains(&raw.as_str()) {
        return None;
    }
    if let Some(alias) = alias_for(&raw) {
        return trim_topic(alias);
    }
    let token = trim_topic(&raw)?;
    (!is_numeric_word(&token)).then_some(token)
}

/// Later words tend to be the specific noun ("auth bug", "header menu"),
/// so position adds up to one point.
pub fn topic_score(raw: &str, token: &str, idx: usize, total: usize) -> i64 {
    let mut score = token.chars().count() as i64;
    if PREFERRED.contains(&token) {
        score += PREFERRED_BONUS;
    }
    if alias_for(raw) == Some(token) {
        score += ALIAS_BONUS;
    }
    if raw.ends_with("ing") {
        score -= GERUND_PENALTY;
    }
    score + (idx * 2 / total.max(1)) as i64
}

/// Best topic word in a line of text. A `/command` wins outright;
/// otherwise the highest-scoring token, earliest on ties.
pub fn extract_topic_word(text: &str) -> Option<String> {
    let lower = text.to_lowercase();

    let command = lower
        .split_whitespace()
        .filter_map(|field| field.strip_prefix('/'))
        .filter(|rest| !rest.is_empty())
        .find_map(|rest| {
            tokenize_topic_words(rest)
                .next()
                .and_then(normalize_topic_token)
        });
    if command.is_some() {
        return command;
    }

    let tokens: Vec<&str> = tokenize_topic_words(&lower).collect();
    let mut best: Option<(String, i64)> = None;
    for (idx, raw) in tokens.iter().enumerate() {
        let Some(token) = normalize_topic_token(raw) else {
            continue;
        };
        let score = topic_score(raw, &token, idx, tokens.len());
        if best.as_ref().is_none_or(|(_, top)| score > *top) {
            best = Some((token, score));
        }
    }
    best.map(|(token, _)| token)
}

/// Topic from the most recent prompt or active line that yields one.
pub fn classify_pane_topic(content: &str) -> Option<String> {
    for line in recent_lines(content, TOPIC_SCAN_DEPTH) {
        if let Some((_, typed)) = prompt_line(line) {
            if let Some(topic) = extract_topic_word(typed) {
                return Some(topic);
            }
            continue;
        }
        if has_active_marker(line) {
            let mut activity = spinner_prefix(line)
                .and_then(|prefix| line.strip_prefix(prefix))
                .map_or(line, str::trim);
            if let Some(cut) = activity.find(" (")
                && cut > 0
            {
                activity = &activity[..cut];
            }
            if let Some(topic) = extract_topic_word(activity) {
                return Some(topic);
            }
        }
    }
    None
}
