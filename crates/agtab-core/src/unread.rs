//! Unread decision: whether a window just finished work or started asking
//! for input while the user was looking elsewhere.

use crate::config::PromptPolicy;
use crate::types::{AgentKind, Status};

/// Inputs for one window on one cycle. Signatures are `None` when the pane
/// showed none, or when the status was empty or working.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnreadInputs<'a> {
    pub status: Option<Status>,
    pub was_working: bool,
    pub focused: bool,
    /// The window has been evaluated on an earlier cycle.
    pub seen_before: bool,
    pub prompt_signature: Option<&'a str>,
    pub prev_prompt_signature: Option<&'a str>,
    pub completion_signature: Option<&'a str>,
    pub prev_completion_signature: Option<&'a str>,
}

/// Whether a tagged prompt signature such as `codex:› Run /review` carries
/// typed text beyond the bare glyph.
pub fn has_prompt_text(signature: &str, policy: PromptPolicy) -> bool {
    let Some((kind, rest)) = AgentKind::ALL.into_iter().find_map(|kind| {
        signature
            .strip_prefix(kind.as_str())
            .and_then(|rest| rest.strip_prefix(':'))
            .map(|rest| (kind, rest))
    }) else {
        return false;
    };

    let rest = rest.trim();
    let typed = rest
        .strip_prefix(kind.prompt_glyph())
        .unwrap_or(rest)
        .trim();
    match policy {
        PromptPolicy::AnyText => !typed.is_empty(),
        PromptPolicy::Alphanumeric => typed.chars().any(char::is_alphanumeric),
    }
}

/// Decide whether to mark the window unread this cycle.
pub fn should_mark_unread(inputs: &UnreadInputs<'_>, policy: PromptPolicy) -> bool {
    let Some(status) = inputs.status else {
        return false;
    };
    if inputs.focused || status.is_working() {
        return false;
    }
    if inputs.was_working {
        return true;
    }
    if !inputs.seen_before {
        return inputs
            .prompt_signature
            .is_some_and(|sig| has_prompt_text(sig, policy));
    }
    if inputs.completion_signature.is_some()
        && inputs.completion_signature != inputs.prev_completion_signature
    {
        return true;
    }
    inputs.prompt_signature.is_some() && inputs.prompt_signature != inputs.prev_prompt_signature
}
