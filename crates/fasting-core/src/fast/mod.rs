mod manager;
mod model;

pub use manager::FastManager;
pub use model::{Fast, FastId, FastStatus, Mood, TargetInterval, MAX_TARGET_SECS};
