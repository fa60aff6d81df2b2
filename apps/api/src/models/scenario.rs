use serde::{Deserialize, Serialize};

/// Library section a tactic card is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Hook,
    Objection,
    Closing,
    Learning,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Hook => "hook",
            Category::Objection => "objection",
            Category::Closing => "closing",
            Category::Learning => "learning",
        }
    }
}

/// A tactic card: an objection-handling script at three levels of depth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: String,
    pub category: Category,
    pub title: String,
    pub subtitle: String,
    pub tags: Vec<String>,
    /// Level 1
    pub one_liner: String,
    /// Level 2
    pub logic: String,
    /// Level 3
    pub sop: String,
    /// Level 4 placeholder
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clip_time: Option<String>,
}
