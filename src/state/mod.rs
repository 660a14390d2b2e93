pub mod storage;
pub mod types;

pub use storage::{get_state_path, load_state, save_state, StateStore};
pub use types::{AppState, SavedTiming, ScoreRecord};
