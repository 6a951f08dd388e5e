use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::exercise::settings::ExerciseSettings;

/// Language code -> text. Keys are ISO 639-1 codes such as `el`, `ru`, `en`.
pub type Localized = BTreeMap<String, String>;

const FALLBACK_LANG: &str = "en";

/// Resolve a localized string: requested language, then English, then the
/// first entry in key order.
pub fn localized<'a>(map: &'a Localized, lang: &str) -> Option<&'a str> {
    map.get(lang)
        .or_else(|| map.get(FALLBACK_LANG))
        .or_else(|| map.values().next())
        .map(String::as_str)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Case {
    pub id: String,
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_hint_i18n: Option<Localized>,
    /// Accepted spellings, any of which counts as correct.
    pub correct: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint_i18n: Option<Localized>,
}

impl Case {
    pub fn prompt_hint(&self, lang: &str) -> Option<&str> {
        self.prompt_hint_i18n
            .as_ref()
            .and_then(|map| localized(map, lang))
    }

    /// Localized additional hint, falling back to the plain `hint` string.
    pub fn additional_hint(&self, lang: &str) -> Option<&str> {
        self.hint_i18n
            .as_ref()
            .and_then(|map| localized(map, lang))
            .or(self.hint.as_deref())
    }

    /// The first accepted spelling, used when revealing the answer.
    pub fn primary_answer(&self) -> Option<&str> {
        self.correct.first().map(String::as_str)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_hint_i18n: Option<Localized>,
    pub cases: Vec<Case>,
}

impl Block {
    pub fn name_hint(&self, lang: &str) -> Option<&str> {
        self.name_hint_i18n
            .as_ref()
            .and_then(|map| localized(map, lang))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseDefinition {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub settings: ExerciseSettings,
    pub blocks: Vec<Block>,
}

impl ExerciseDefinition {
    /// A minimal, valid exercise for authors to start from.
    pub fn template() -> Self {
        let case = |id: &str, prompt: &str, correct: &[&str], hint: &str| Case {
            id: id.to_string(),
            prompt: prompt.to_string(),
            prompt_hint_i18n: Some(Localized::from([
                ("en".to_string(), format!("Pronoun: {prompt}")),
                ("ru".to_string(), format!("Местоимение: {prompt}")),
            ])),
            correct: correct.iter().map(|s| s.to_string()).collect(),
            hint: Some(hint.to_string()),
            hint_i18n: None,
        };

        Self {
            id: "my-exercise".to_string(),
            title: "Ενεστώτας: έχω".to_string(),
            description: "Conjugate the verb in the present tense.".to_string(),
            difficulty: Difficulty::Beginner,
            tags: BTreeSet::from(["verbs".to_string(), "present".to_string()]),
            settings: ExerciseSettings::default(),
            blocks: vec![Block {
                id: "echo".to_string(),
                name: "έχω".to_string(),
                name_hint_i18n: Some(Localized::from([
                    ("en".to_string(), "to have".to_string()),
                    ("ru".to_string(), "иметь".to_string()),
                ])),
                cases: vec![
                    case("echo-1sg", "εγώ", &["έχω"], "-ω"),
                    case("echo-2sg", "εσύ", &["έχεις"], "-εις"),
                ],
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_localized_prefers_requested_language() {
        let map = Localized::from([
            ("en".to_string(), "to be".to_string()),
            ("ru".to_string(), "быть".to_string()),
        ]);
        assert_eq!(localized(&map, "ru"), Some("быть"));
        assert_eq!(localized(&map, "el"), Some("to be"));
    }

    #[test]
    fn test_localized_falls_back_to_first_entry() {
        let map = Localized::from([("ru".to_string(), "быть".to_string())]);
        assert_eq!(localized(&map, "el"), Some("быть"));
        assert_eq!(localized(&Localized::new(), "el"), None);
    }

    #[test]
    fn test_additional_hint_prefers_localized_over_plain() {
        let mut case = ExerciseDefinition::template().blocks[0].cases[0].clone();
        assert_eq!(case.additional_hint("ru"), Some("-ω"));

        case.hint_i18n = Some(Localized::from([("ru".to_string(), "окончание -ω".to_string())]));
        assert_eq!(case.additional_hint("ru"), Some("окончание -ω"));
    }

    #[test]
    fn test_deserialize_minimal_exercise_applies_defaults() {
        let json = r#"{
            "id": "ex",
            "title": "Example",
            "blocks": [
                {"id": "b", "name": "είμαι", "cases": [
                    {"id": "c", "prompt": "εγώ", "correct": ["είμαι"]}
                ]}
            ]
        }"#;
        let ex: ExerciseDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(ex.difficulty, Difficulty::Beginner);
        assert!(ex.tags.is_empty());
        assert!(ex.settings.auto_advance);
        assert_eq!(ex.settings.auto_advance_delay_ms, 1500);
        assert!(ex.blocks[0].cases[0].hint.is_none());
    }

    #[test]
    fn test_serialize_uses_camel_case_keys() {
        let json = serde_json::to_string(&ExerciseDefinition::template()).unwrap();
        assert!(json.contains("\"promptHintI18n\""));
        assert!(json.contains("\"nameHintI18n\""));
        assert!(json.contains("\"autoAdvanceDelayMs\""));
        assert!(!json.contains("\"hintI18n\""));
    }
}
