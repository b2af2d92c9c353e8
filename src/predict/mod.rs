mod pass_finder;
mod types;

pub use pass_finder::{
    predict_passes, DEFAULT_MAX_PASS_COUNT, DEFAULT_PASS_COUNT, PASS_INTERVAL_MINUTES,
};
pub use types::PassRecord;
