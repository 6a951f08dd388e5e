use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::engine::navigation::{shuffle_exercise_cases, total_cases};
use crate::exercise::ExerciseDefinition;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    #[default]
    WaitingInput,
    CorrectAnswer,
    WrongAnswer,
    /// The user has to type the correct answer before moving on.
    RequireCorrection,
    /// The user has to explicitly continue before moving on.
    RequireContinue,
    Completed,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WaitingInput => "WAITING_INPUT",
            Self::CorrectAnswer => "CORRECT_ANSWER",
            Self::WrongAnswer => "WRONG_ANSWER",
            Self::RequireCorrection => "REQUIRE_CORRECTION",
            Self::RequireContinue => "REQUIRE_CONTINUE",
            Self::Completed => "COMPLETED",
        }
    }
}

/// Session-wide answer counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub correct: usize,
    pub incorrect: usize,
}

impl Stats {
    pub fn answered(&self) -> usize {
        self.correct + self.incorrect
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HintType {
    /// Hint attached to the block (usually the verb's meaning).
    Name,
    /// Hint attached to the case prompt.
    Prompt,
    /// Free-form hint attached to the case.
    Additional,
}

impl HintType {
    pub const ALL: [HintType; 3] = [HintType::Name, HintType::Prompt, HintType::Additional];

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "name" => Some(Self::Name),
            "prompt" => Some(Self::Prompt),
            "additional" | "extra" => Some(Self::Additional),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hints {
    pub name: bool,
    pub prompt: bool,
    pub additional: bool,
}

impl Hints {
    pub fn is_shown(&self, hint_type: HintType) -> bool {
        match hint_type {
            HintType::Name => self.name,
            HintType::Prompt => self.prompt,
            HintType::Additional => self.additional,
        }
    }

    pub fn toggled(self, hint_type: HintType) -> Self {
        match hint_type {
            HintType::Name => Self {
                name: !self.name,
                ..self
            },
            HintType::Prompt => Self {
                prompt: !self.prompt,
                ..self
            },
            HintType::Additional => Self {
                additional: !self.additional,
                ..self
            },
        }
    }
}

/// State of one attempt at an exercise. Only `session::reducer::reduce`
/// produces new values; every transition returns a fresh state.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionState {
    /// The exercise as played, after the one-time shuffle.
    pub exercise: Arc<ExerciseDefinition>,
    pub status: Status,
    pub current_block_index: usize,
    pub current_case_index: usize,
    pub user_answer: String,
    /// First wrong answer on the current case, kept for display during correction.
    pub original_user_answer: String,
    /// `None` until the current case has been evaluated.
    pub is_correct: Option<bool>,
    pub show_answer: bool,
    /// Wrong submissions on the current case only.
    pub incorrect_attempts: u32,
    pub auto_advance_enabled: bool,
    pub started_at: DateTime<Utc>,
    pub total_cases: usize,
    pub stats: Stats,
    pub hints: Hints,
}

/// Start a session with fresh entropy and the current time.
pub fn initialize(exercise: Arc<ExerciseDefinition>) -> SessionState {
    let mut rng = SmallRng::from_entropy();
    initialize_with(exercise, &mut rng, Utc::now())
}

pub fn initialize_with<R: Rng + ?Sized>(
    exercise: Arc<ExerciseDefinition>,
    rng: &mut R,
    now: DateTime<Utc>,
) -> SessionState {
    let exercise = shuffle_exercise_cases(&exercise, rng);
    SessionState {
        status: Status::WaitingInput,
        current_block_index: 0,
        current_case_index: 0,
        user_answer: String::new(),
        original_user_answer: String::new(),
        is_correct: None,
        show_answer: false,
        incorrect_attempts: 0,
        auto_advance_enabled: exercise.settings.auto_advance,
        started_at: now,
        total_cases: total_cases(&exercise),
        stats: Stats::default(),
        hints: Hints::default(),
        exercise,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercise::ExerciseSettings;
    use crate::exercise::fixtures::{exercise_with_sizes, two_blocks};

    #[test]
    fn test_initialize_defaults() {
        let exercise = two_blocks();
        let state = initialize(Arc::clone(&exercise));
        assert_eq!(state.status, Status::WaitingInput);
        assert_eq!(state.total_cases, 3);
        assert_eq!(state.current_block_index, 0);
        assert_eq!(state.current_case_index, 0);
        assert_eq!(state.is_correct, None);
        assert_eq!(state.stats, Stats::default());
        assert_eq!(state.hints, Hints::default());
        assert!(state.auto_advance_enabled);
        // no shuffle requested: same exercise allocation
        assert!(Arc::ptr_eq(&state.exercise, &exercise));
    }

    #[test]
    fn test_initialize_takes_auto_advance_from_settings() {
        let settings = ExerciseSettings {
            auto_advance: false,
            ..Default::default()
        };
        let state = initialize(Arc::new(exercise_with_sizes(&[1], settings)));
        assert!(!state.auto_advance_enabled);
    }

    #[test]
    fn test_initialize_with_is_deterministic() {
        let settings = ExerciseSettings {
            shuffle_cases: true,
            ..Default::default()
        };
        let exercise = Arc::new(exercise_with_sizes(&[8, 5], settings));
        let now = Utc::now();
        let a = initialize_with(Arc::clone(&exercise), &mut SmallRng::seed_from_u64(3), now);
        let b = initialize_with(Arc::clone(&exercise), &mut SmallRng::seed_from_u64(3), now);
        assert_eq!(a, b);
        assert_eq!(a.total_cases, 13);
    }

    #[test]
    fn test_hints_toggle_single_flag() {
        let hints = Hints::default().toggled(HintType::Prompt);
        assert!(hints.prompt);
        assert!(!hints.name);
        assert!(!hints.additional);
        assert!(!hints.toggled(HintType::Prompt).prompt);
    }

    #[test]
    fn test_hint_type_from_key() {
        assert_eq!(HintType::from_key("name"), Some(HintType::Name));
        assert_eq!(HintType::from_key("extra"), Some(HintType::Additional));
        assert_eq!(HintType::from_key("verb"), None);
    }
}
