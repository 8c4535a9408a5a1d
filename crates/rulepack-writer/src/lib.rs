//! `RulePack` Output Writer
//!
//! Turns the loaded modes and rule documents into two files:
//!
//! - a pretty-printed JSON document `{"customModes": [...]}`
//! - the rule documents joined by blank lines, followed by a summary of the
//!   available modes when there are any

#![deny(unsafe_code, dead_code, unused_imports, unused_variables, missing_docs)]

pub mod compose;
pub mod error;
pub mod writer;

pub use compose::compose;
pub use error::WriteError;
pub use writer::{OutputPaths, OutputWriter, WriteReport};
