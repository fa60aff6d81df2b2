//! In-memory tactic card library.
//!
//! Cards live for the lifetime of the process. New cards go to the front of
//! the list so the most recent tactic is listed first.

use anyhow::{Context, Result};
use rand::seq::SliceRandom;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::scenario::{Category, Scenario};

pub mod handlers;

const SEED_SCENARIOS: &str = include_str!("../../data/seed_scenarios.json");

/// Tags arrive either as a list or as the comma-separated text of the form.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TagsInput {
    List(Vec<String>),
    Text(String),
}

impl Default for TagsInput {
    fn default() -> Self {
        TagsInput::List(Vec::new())
    }
}

impl TagsInput {
    pub fn normalize(&self) -> Vec<String> {
        let raw: Vec<&str> = match self {
            TagsInput::List(tags) => tags.iter().map(String::as_str).collect(),
            TagsInput::Text(text) => text.split(',').collect(),
        };
        raw.into_iter()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect()
    }
}

/// Card fields as submitted by the creation or edit form.
#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioInput {
    pub category: Category,
    pub title: String,
    pub subtitle: String,
    #[serde(default)]
    pub tags: TagsInput,
    pub one_liner: String,
    pub logic: String,
    pub sop: String,
    #[serde(default)]
    pub clip_time: Option<String>,
}

impl ScenarioInput {
    fn validate(&self) -> Result<(), AppError> {
        let required = [
            ("title", &self.title),
            ("subtitle", &self.subtitle),
            ("one_liner", &self.one_liner),
            ("logic", &self.logic),
            ("sop", &self.sop),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(AppError::Validation(format!("{field} cannot be empty")));
            }
        }
        Ok(())
    }

    fn into_scenario(self, id: String) -> Scenario {
        Scenario {
            id,
            category: self.category,
            tags: self.tags.normalize(),
            title: self.title,
            subtitle: self.subtitle,
            one_liner: self.one_liner,
            logic: self.logic,
            sop: self.sop,
            clip_time: self.clip_time,
        }
    }
}

#[derive(Debug, Default)]
pub struct Library {
    scenarios: Vec<Scenario>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    /// Library preloaded with the built-in tactic cards.
    pub fn seeded() -> Result<Self> {
        let scenarios: Vec<Scenario> =
            serde_json::from_str(SEED_SCENARIOS).context("Built-in seed scenarios are invalid")?;
        info!("Loaded {} seed scenarios", scenarios.len());
        Ok(Self { scenarios })
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    pub fn list(&self, category: Option<Category>) -> Vec<Scenario> {
        self.scenarios
            .iter()
            .filter(|s| category.map_or(true, |c| s.category == c))
            .cloned()
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.id == id)
    }

    pub fn add(&mut self, input: ScenarioInput) -> Result<Scenario, AppError> {
        input.validate()?;
        let scenario = input.into_scenario(Uuid::new_v4().to_string());
        info!(
            "Added scenario {} to {}",
            scenario.id,
            scenario.category.as_str()
        );
        self.scenarios.insert(0, scenario.clone());
        Ok(scenario)
    }

    /// Replaces a card in place; its id and position are kept.
    pub fn update(&mut self, id: &str, input: ScenarioInput) -> Result<Scenario, AppError> {
        input.validate()?;
        let slot = self
            .scenarios
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Scenario {id} not found")))?;
        *slot = input.into_scenario(id.to_string());
        Ok(slot.clone())
    }

    /// Uniformly random card, `None` when the library is empty.
    pub fn random(&self) -> Option<&Scenario> {
        self.scenarios.choose(&mut rand::thread_rng())
    }
}
