//! colorexp - colorize regular expression matches in a text stream
//!
//! Each line runs through three stages: [`matcher`] turns pattern matches
//! into colored spans, [`span`] keeps those spans disjoint with earlier
//! spans taking precedence, and [`render`] wraps them in escape codes.

pub mod cli;
pub mod config;
pub mod error;
pub mod highlighter;
pub mod matcher;
pub mod palette;
pub mod render;
pub mod span;

pub use error::{ColorexpError, Result};
pub use highlighter::Highlighter;
pub use matcher::{CompileOptions, MatchOptions, PatternSet};
pub use palette::{HighlightMode, Palette};
pub use span::{ColorSpan, IntervalSet};
