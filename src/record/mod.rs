mod position;
mod sample;

pub use position::{PositionRecord, PASS_FILTER};
pub use sample::SampleRecord;
