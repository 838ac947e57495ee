//! BGN ⇄ EUR converter state machine.

pub mod config;
pub mod machine;
pub mod sink;


pub use config::EngineConfig;
pub use machine::{ConversionResult, Converter};
pub use sink::{CopyTracker, NoopSink, OutputSink};
