pub mod assembler;
pub mod config;
pub mod generator;
pub mod identity;
pub mod prompt;
pub mod refresh;
pub mod seen;
pub mod session;
pub mod sources;

pub use pitchside_types::{CommentaryLine, Event, Fixture, FixtureId};
