//! Shared helpers

pub mod duration;
pub mod logger;
pub mod timer;

pub use duration::{format_go_duration, parse_go_duration};
pub use logger::{init_logger, LogLevel};
pub use timer::StageTimer;
