//! Battle mode — practice against a random card with the answer hidden.

use serde::Serialize;
use tracing::warn;

use crate::llm_client::{GenerationRequest, LlmError, TextGenerator};
use crate::models::scenario::{Category, Scenario};

pub mod handlers;
pub mod prompts;

use prompts::{HINT_EMPTY, HINT_MISSING_KEY, HINT_PROMPT_TEMPLATE, HINT_UNAVAILABLE};

/// A card as shown before the answer is revealed: the one-liner, logic and
/// script are withheld.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BattleCard {
    pub scenario_id: String,
    pub category: Category,
    pub title: String,
    pub subtitle: String,
    pub tags: Vec<String>,
}

impl From<&Scenario> for BattleCard {
    fn from(scenario: &Scenario) -> Self {
        Self {
            scenario_id: scenario.id.clone(),
            category: scenario.category,
            title: scenario.title.clone(),
            subtitle: scenario.subtitle.clone(),
            tags: scenario.tags.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Hint {
    pub hint: String,
}

/// Asks the model for a short Socratic hint toward the card's answer.
pub async fn tactical_hint(generator: &dyn TextGenerator, scenario: &Scenario) -> Hint {
    let request = GenerationRequest {
        prompt: HINT_PROMPT_TEMPLATE
            .replace("{title}", &scenario.title)
            .replace("{logic}", &scenario.logic),
        ..Default::default()
    };
    Hint {
        hint: hint_text(generator.generate(&request).await),
    }
}

fn hint_text(result: Result<String, LlmError>) -> String {
    match result {
        Ok(text) if text.is_empty() => HINT_EMPTY.to_string(),
        Ok(text) => text,
        Err(LlmError::EmptyContent) => HINT_EMPTY.to_string(),
        Err(LlmError::MissingApiKey) => HINT_MISSING_KEY.to_string(),
        Err(e) => {
            warn!("Hint generation failed: {e}");
            HINT_UNAVAILABLE.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::tests::StubGenerator;
    use crate::library::Library;

    fn scenario() -> Scenario {
        Library::seeded().unwrap().get("o2").cloned().unwrap()
    }

    #[test]
    fn test_battle_card_hides_answer_fields() {
        let scenario = scenario();
        let card = BattleCard::from(&scenario);
        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["scenario_id"], "o2");
        assert_eq!(json["category"], "objection");
        for hidden in ["one_liner", "logic", "sop"] {
            assert!(json.get(hidden).is_none(), "{hidden} leaked");
        }
    }

    #[tokio::test]
    async fn test_hint_prompt_uses_title_and_logic() {
        let stub = StubGenerator::replying("带伞的人不怕下雨");
        let scenario = scenario();
        let hint = tactical_hint(&stub, &scenario).await;
        assert_eq!(hint.hint, "带伞的人不怕下雨");

        let requests = stub.requests.lock().unwrap();
        assert!(requests[0].prompt.contains(&scenario.title));
        assert!(requests[0].prompt.contains(&scenario.logic));
        assert!(requests[0].system.is_none());
    }

    #[tokio::test]
    async fn test_hint_substitutions() {
        let scenario = scenario();
        assert_eq!(
            tactical_hint(&StubGenerator::failing(0), &scenario).await.hint,
            HINT_MISSING_KEY
        );
        assert_eq!(
            tactical_hint(&StubGenerator::failing(500), &scenario).await.hint,
            HINT_UNAVAILABLE
        );
        assert_eq!(
            tactical_hint(&StubGenerator::replying(""), &scenario).await.hint,
            HINT_EMPTY
        );
    }
}
