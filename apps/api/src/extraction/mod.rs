//! Section extractor — turns free-form assistant text into a tactic draft.
//!
//! Best-effort and total: every input, including empty or unstructured text,
//! yields a well-formed `TacticDraft` that pre-fills the card creation form.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::scenario::Category;

pub mod handlers;
mod labels;

use labels::{matcher, Section};

pub const DRAFT_TITLE: &str = "来自 Sukie AI 的战术";
pub const DRAFT_SUBTITLE: &str = "AI 智能生成";
pub const DRAFT_TAGS: [&str; 2] = ["AI生成", "新战术"];

/// A pre-filled tactic card, not yet part of the library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TacticDraft {
    pub title: String,
    pub subtitle: String,
    pub tags: Vec<String>,
    pub category: Category,
    /// Level 1: the hook line.
    pub one_liner: String,
    /// Level 2: the rationale.
    pub logic: String,
    /// Level 3: the scripted response.
    pub sop: String,
}

/// Extracts hook, rationale and script from assistant text.
///
/// When no section can be located the whole text becomes the script, so
/// nothing is dropped.
pub fn extract_tactic(text: &str) -> TacticDraft {
    let [one_liner, logic, sop] = Section::ALL.map(|section| matcher(section).capture(text));

    let fallback = one_liner.is_empty() && logic.is_empty() && sop.is_empty();
    let sop = if fallback { text } else { sop };

    debug!(
        fallback,
        hook = !one_liner.is_empty(),
        rationale = !logic.is_empty(),
        "Extracted tactic sections from {} bytes",
        text.len()
    );

    TacticDraft {
        title: DRAFT_TITLE.to_string(),
        subtitle: DRAFT_SUBTITLE.to_string(),
        tags: DRAFT_TAGS.iter().map(|t| t.to_string()).collect(),
        category: Category::Learning,
        one_liner: clean_markup(one_liner),
        logic: clean_markup(logic),
        sop: clean_markup(sop),
    }
}

fn heading_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^#+\s*").expect("heading regex must compile"))
}

fn bullet_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^[-*]\s+").expect("bullet regex must compile"))
}

/// Strips lightweight markdown: bold markers, leading heading runs and code
/// ticks are removed, list bullets become `• `, and the result is trimmed.
pub fn clean_markup(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let text = text.replace("**", "");
    let text = heading_re().replace_all(&text, "");
    let text = text.replace('`', "");
    let text = bullet_re().replace_all(&text, "• ");
    text.trim().to_string()
}
