//! The turn/round state machine and match setup.

pub mod engine;

pub use engine::{LogSink, MatchBuilder};
