//! Read-only views derived from a [`SessionState`]. Nothing here caches or
//! mutates; hosts call these on every render.

use serde::Serialize;

use crate::engine::navigation::{self, CaseIndices};
use crate::engine::scoring::calculate_accuracy;
use crate::exercise::{Block, Case};
use crate::session::state::{HintType, Hints, SessionState, Stats, Status};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub completed: usize,
    /// One-based position of the case on screen, capped at `total`.
    pub current: usize,
    pub total: usize,
}

impl Progress {
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.completed as f64 / self.total as f64
    }
}

pub fn current_block(state: &SessionState) -> Option<&Block> {
    state.exercise.blocks.get(state.current_block_index)
}

pub fn current_case(state: &SessionState) -> Option<&Case> {
    navigation::case_by_indices(
        &state.exercise,
        state.current_block_index,
        state.current_case_index,
    )
}

/// Cases done, the one-based current position and the total. Once the session
/// is `Completed` every case counts as done, so `completed == total` rather
/// than the cursor-derived `total - 1` of the last case.
pub fn progress(state: &SessionState) -> Progress {
    let total = state.total_cases;
    if total == 0 {
        return Progress::default();
    }
    let completed = if state.status == Status::Completed {
        total
    } else {
        navigation::completed_cases_count(
            &state.exercise,
            state.current_block_index,
            state.current_case_index,
        )
        .min(total)
    };
    Progress {
        completed,
        current: (completed + 1).min(total),
        total,
    }
}

pub fn next_indices(state: &SessionState) -> Option<CaseIndices> {
    navigation::next_indices(
        &state.exercise,
        state.current_block_index,
        state.current_case_index,
    )
}

pub fn is_last_case(state: &SessionState) -> bool {
    next_indices(state).is_none()
}

pub fn stats(state: &SessionState) -> Stats {
    state.stats
}

/// Share of answered cases that were right on the first try.
pub fn accuracy(state: &SessionState) -> u32 {
    calculate_accuracy(state.stats.correct, state.stats.answered())
}

pub fn hint_visibility(state: &SessionState) -> Hints {
    state.hints
}

/// Text of a hint when its flag is on and the current block/case has one.
pub fn visible_hint<'a>(
    state: &'a SessionState,
    hint_type: HintType,
    lang: &str,
) -> Option<&'a str> {
    if !state.hints.is_shown(hint_type) {
        return None;
    }
    match hint_type {
        HintType::Name => current_block(state)?.name_hint(lang),
        HintType::Prompt => current_case(state)?.prompt_hint(lang),
        HintType::Additional => current_case(state)?.additional_hint(lang),
    }
}

/// Accepted answers for the current case, once they have been revealed.
pub fn revealed_answers(state: &SessionState) -> Option<&[String]> {
    if !state.show_answer {
        return None;
    }
    current_case(state).map(|case| case.correct.as_slice())
}

pub fn is_completed(state: &SessionState) -> bool {
    state.status == Status::Completed
}

/// Whether a host timer should move past the current case on its own.
pub fn should_auto_advance(state: &SessionState) -> bool {
    state.status == Status::CorrectAnswer && state.auto_advance_enabled
}
