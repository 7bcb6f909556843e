mod engine;

pub use engine::{ProgressEngine, MAX_LEVEL};
