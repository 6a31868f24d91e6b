#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

//! Case-preserving multi-pattern find-and-replace engine.
//!
//! A [`Replacer`] holds a set of rules, each with its own [`CaseMode`]. One
//! rule can simultaneously match `one_two_three`, `OneTwoThree`,
//! `oneTwoThree`, `ONE-TWO-THREE`, and so on, and rewrite each occurrence
//! into the corresponding casing of the replacement text. Multiple rules
//! coexist and are resolved against one another purely by position — see
//! [`Replacer::find_and_replace`] for the tie-break policy.

pub mod case_model;
pub mod error;
pub mod pattern_set;
pub mod replacer;
mod trie;

pub use case_model::{render, split_words, Rendering, ALL_RENDERINGS};
pub use error::EngineError;
pub use pattern_set::{Hit, PatternSet, SearchContext};
pub use replacer::{CaseMode, Replacer, Sink};
