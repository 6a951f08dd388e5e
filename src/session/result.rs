use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::selectors;
use crate::session::state::SessionState;

/// End-of-session report shown on the results screen.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub exercise_id: String,
    pub exercise_title: String,
    pub correct: usize,
    pub incorrect: usize,
    pub total_cases: usize,
    pub accuracy: u32,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub elapsed_secs: f64,
    /// False when the session was abandoned before `COMPLETED`.
    pub completed: bool,
}

impl SessionSummary {
    pub fn from_state(state: &SessionState, finished_at: DateTime<Utc>) -> Self {
        let elapsed_secs = (finished_at - state.started_at)
            .to_std()
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0);

        Self {
            exercise_id: state.exercise.id.clone(),
            exercise_title: state.exercise.title.clone(),
            correct: state.stats.correct,
            incorrect: state.stats.incorrect,
            total_cases: state.total_cases,
            accuracy: selectors::accuracy(state),
            started_at: state.started_at,
            finished_at,
            elapsed_secs,
            completed: selectors::is_completed(state),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::exercise::fixtures::two_blocks;
    use crate::session::action::Action;
    use crate::session::reducer::reduce;
    use crate::session::state::initialize;

    #[test]
    fn test_summary_from_completed_session() {
        let state = initialize(two_blocks());
        let state = reduce(
            &state,
            Action::AnswerCorrect {
                answer: "answer-0-0".to_string(),
                increment_correct: true,
            },
        );
        let state = reduce(&state, Action::Complete);
        let finished = state.started_at + Duration::seconds(90);

        let summary = SessionSummary::from_state(&state, finished);
        assert_eq!(summary.exercise_id, "fixture");
        assert_eq!(summary.correct, 1);
        assert_eq!(summary.incorrect, 0);
        assert_eq!(summary.total_cases, 3);
        assert_eq!(summary.accuracy, 100);
        assert!(summary.completed);
        assert!((summary.elapsed_secs - 90.0).abs() < 1e-6);
    }

    #[test]
    fn test_summary_clock_skew_clamps_to_zero() {
        let state = initialize(two_blocks());
        let summary = SessionSummary::from_state(&state, state.started_at - Duration::seconds(5));
        assert_eq!(summary.elapsed_secs, 0.0);
        assert!(!summary.completed);
    }
}
