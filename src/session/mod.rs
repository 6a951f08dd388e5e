pub mod action;
pub mod reducer;
pub mod result;
pub mod selectors;
pub mod state;

pub use action::Action;
pub use reducer::reduce;
pub use result::SessionSummary;
pub use state::{HintType, Hints, SessionState, Stats, Status, initialize, initialize_with};
