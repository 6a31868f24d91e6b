//! Public entry point: installs rules into the exact/fold Pattern Sets and
//! drives the dual-finder scan loop that reconciles their overlapping hits.

use crate::case_model::{render, split_words, ALL_RENDERINGS};
use crate::error::EngineError;
use crate::pattern_set::{Hit, PatternSet, SearchContext};

/// How a rule's `find` text is expected to appear in scanned input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseMode {
    /// Expand `find`/`replace` into all nine casing renderings and match any
    /// of them, rewriting each hit into the matching rendering of `replace`.
    PreserveCase,
    /// Match `find` ASCII-case-insensitively, always emitting `replace`
    /// verbatim.
    IgnoreCase,
    /// Match `find` byte-for-byte, always emitting `replace` verbatim.
    MatchCase,
}

/// A capability exposing a single `write` operation, used to stream scan
/// output without the engine allocating a result buffer itself.
pub trait Sink {
    fn write(&mut self, bytes: &[u8]);
}

impl Sink for Vec<u8> {
    fn write(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }
}

/// Owns one case-sensitive and one case-insensitive Pattern Set and
/// coordinates scans across both.
#[derive(Debug)]
pub struct Replacer {
    exact: PatternSet,
    fold: PatternSet,
}

impl Default for Replacer {
    fn default() -> Self {
        Self::new()
    }
}

impl Replacer {
    pub fn new() -> Self {
        Self {
            exact: PatternSet::exact(),
            fold: PatternSet::fold(),
        }
    }

    /// Installs a rule. Under `PreserveCase`, `find` and `replace` are split
    /// into word lists and all nine renderings are installed into the exact
    /// set; duplicate renderings (e.g. an all-lowercase single-word pattern
    /// collapsing `normal`/`lowercase`/`lower_snake`/`lower_kebab`) are
    /// silently skipped. Under `IgnoreCase`/`MatchCase`, `find`/`replace` are
    /// installed verbatim and a duplicate is a hard error.
    pub fn add_replacement(&mut self, find: &[u8], replace: &[u8], mode: CaseMode, whole_word: bool) -> Result<(), EngineError> {
        if find.is_empty() {
            return Err(EngineError::EmptyPattern);
        }

        match mode {
            CaseMode::PreserveCase => {
                let find_words = split_words(find);
                if find_words.is_empty() {
                    return Err(EngineError::EmptyWordList);
                }
                let replace_words = split_words(replace);

                for rendering in ALL_RENDERINGS {
                    let find_variant = render(&find_words, rendering);
                    let replace_variant = render(&replace_words, rendering);
                    self.exact.add(&find_variant, replace_variant, whole_word)?;
                }
                Ok(())
            },
            CaseMode::IgnoreCase => {
                if !self.fold.add(find, replace.to_vec(), whole_word)? {
                    return Err(EngineError::DuplicateToken { key: find.to_vec() });
                }
                Ok(())
            },
            CaseMode::MatchCase => {
                if !self.exact.add(find, replace.to_vec(), whole_word)? {
                    return Err(EngineError::DuplicateToken { key: find.to_vec() });
                }
                Ok(())
            },
        }
    }

    /// Scans `input` and writes literal spans plus replacements to `sink` in
    /// strictly left-to-right order. Does nothing if `input` is empty.
    pub fn find_and_replace(&self, input: &[u8], sink: &mut dyn Sink) {
        if input.is_empty() {
            return;
        }

        let mut ex_ctx = SearchContext::new(0, input.len());
        let mut fo_ctx = SearchContext::new(0, input.len());
        self.exact.find(input, &mut ex_ctx);
        self.fold.find(input, &mut fo_ctx);

        loop {
            match (ex_ctx.hit, fo_ctx.hit) {
                (None, None) => break,
                (Some(eh), Some(fh)) => {
                    let overlap = (eh.begin < fh.end && fh.begin < eh.end) || eh.begin == fh.begin;
                    if eh.begin <= fh.begin {
                        emit(input, sink, &self.exact, &mut ex_ctx, eh);
                        advance_idle(input, &self.fold, &mut fo_ctx, eh.end, overlap);
                    } else {
                        emit(input, sink, &self.fold, &mut fo_ctx, fh);
                        advance_idle(input, &self.exact, &mut ex_ctx, fh.end, overlap);
                    }
                },
                (Some(eh), None) => emit(input, sink, &self.exact, &mut ex_ctx, eh),
                (None, Some(fh)) => emit(input, sink, &self.fold, &mut fo_ctx, fh),
            }
        }

        let tail_start = ex_ctx.cursor.max(fo_ctx.cursor);
        sink.write(&input[tail_start..]);
    }

    /// Convenience: scans `input` and returns a freshly allocated result.
    pub fn find_and_replace_to_vec(&self, input: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(input.len());
        self.find_and_replace(input, &mut out);
        out
    }

    /// Convenience for text callers: scans `input` and validates the result
    /// is UTF-8 before returning it.
    pub fn find_and_replace_str(&self, input: &str) -> Result<String, EngineError> {
        let out = self.find_and_replace_to_vec(input.as_bytes());
        String::from_utf8(out).map_err(|_| EngineError::NotUtf8)
    }
}

fn emit(input: &[u8], sink: &mut dyn Sink, set: &PatternSet, ctx: &mut SearchContext, hit: Hit) {
    sink.write(&input[ctx.cursor..hit.begin]);
    sink.write(&set.rule(hit.rule_id).replacement);
    ctx.cursor = hit.end;
    set.find(input, ctx);
}

/// Advances the loser's cursor to the winner's `new_cursor`, dropping its
/// cached hit if that hit now starts before its own cursor, and re-searching
/// only if the winning and losing hits actually overlapped.
fn advance_idle(input: &[u8], set: &PatternSet, ctx: &mut SearchContext, new_cursor: usize, overlap: bool) {
    if new_cursor > ctx.cursor {
        ctx.cursor = new_cursor;
    }
    if let Some(h) = ctx.hit {
        if h.begin < ctx.cursor {
            ctx.hit = None;
        }
    }
    if overlap {
        set.find(input, ctx);
    }
}
