//! Label table for the section extractor.
//!
//! Each section owns an ordered set of label alternatives plus the label set
//! that ends it. Sections are matched independently over the whole text, so
//! spans may overlap when labels appear out of order.

use std::sync::OnceLock;

use regex::Regex;

/// The three sections of a tactic: hook (level 1), rationale (level 2),
/// script (level 3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Hook,
    Rationale,
    Script,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Hook, Section::Rationale, Section::Script];

    /// Label alternatives that open this section.
    fn labels(self) -> &'static str {
        match self {
            Section::Hook => r"#*\s*1\.|Level\s*1|The Hook|金句|One Liner",
            Section::Rationale => r"#*\s*2\.|Level\s*2|Logic|逻辑|Metaphor",
            Section::Script => r"#*\s*3\.|Level\s*3|SOP|话术|Closing",
        }
    }

    /// Labels of the following section that cut this one short.
    /// `None` means the section runs to the end of the text.
    fn stop_labels(self) -> Option<&'static str> {
        match self {
            Section::Hook => Some(r"#*\s*2\.|Level\s*2|Logic|逻辑"),
            Section::Rationale => Some(r"#*\s*3\.|Level\s*3|SOP|话术"),
            Section::Script => None,
        }
    }
}

/// Compiled label and terminator patterns for one section.
pub struct SectionMatcher {
    label: Regex,
    stop: Option<Regex>,
}

impl SectionMatcher {
    fn compile(section: Section) -> Self {
        let label = Regex::new(&format!(r"(?i)(?:{})[：:\s]", section.labels()))
            .expect("section label pattern must compile");
        let stop = section.stop_labels().map(|stop| {
            Regex::new(&format!(r"(?i)\n\n|\n(?:{stop})"))
                .expect("section stop pattern must compile")
        });
        Self { label, stop }
    }

    /// Returns the raw text following the first label occurrence, up to a
    /// blank line, the next section's label or the end of the text.
    /// Empty when no label is present.
    pub fn capture<'t>(&self, text: &'t str) -> &'t str {
        let Some(label) = self.label.find(text) else {
            return "";
        };
        let rest = &text[label.end()..];
        match self.stop.as_ref().and_then(|stop| stop.find(rest)) {
            Some(end) => &rest[..end.start()],
            None => rest,
        }
    }
}

pub fn matcher(section: Section) -> &'static SectionMatcher {
    static MATCHERS: OnceLock<[SectionMatcher; 3]> = OnceLock::new();
    let matchers = MATCHERS.get_or_init(|| Section::ALL.map(SectionMatcher::compile));
    &matchers[section as usize]
}
