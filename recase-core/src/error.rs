use thiserror::Error;

/// Errors surfaced by the case-preserving replacement engine.
///
/// These cover only the violations that can actually occur in a typed Rust
/// API: there is no "unrecognized mode" variant because `CaseMode` is a real
/// enum, not a string the caller could misspell.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("find pattern must not be empty")]
    EmptyPattern,

    #[error("find pattern splits into zero words under preserve-case mode")]
    EmptyWordList,

    #[error("pattern `{}` is already registered", String::from_utf8_lossy(key))]
    DuplicateToken { key: Vec<u8> },

    #[error("replaced text is not valid UTF-8")]
    NotUtf8,
}
