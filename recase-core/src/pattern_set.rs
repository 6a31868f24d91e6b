//! A Token Trie plus its parallel rule-record array, with one equality
//! predicate (exact or ASCII-fold) shared by search and duplicate detection.

use crate::error::EngineError;
use crate::trie::TokenTrie;

/// One installed rule: what to emit, and whether the match must sit on a
/// word boundary.
#[derive(Debug, Clone)]
pub struct Rule {
    pub replacement: Vec<u8>,
    pub whole_word: bool,
}

/// A cached candidate match produced by `PatternSet::find`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub begin: usize,
    pub end: usize,
    pub rule_id: u32,
}

/// Ephemeral per-scan state: the bounds of the input, where the next search
/// should resume, and the currently cached candidate (if any).
#[derive(Debug, Clone)]
pub struct SearchContext {
    pub begin: usize,
    pub end: usize,
    pub cursor: usize,
    pub hit: Option<Hit>,
}

impl SearchContext {
    pub fn new(begin: usize, end: usize) -> Self {
        Self {
            begin,
            end,
            cursor: begin,
            hit: None,
        }
    }
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric()
}

/// A Token Trie plus rule records, with a single equality predicate applied
/// uniformly to every lookup performed against it.
/// No `Default` impl: there's no safe choice between `exact()` and `fold()`
/// for a bare default to make, and a wrong guess here would silently match
/// case-sensitively where a caller expected otherwise.
#[derive(Debug)]
pub struct PatternSet {
    trie: TokenTrie,
    rules: Vec<Rule>,
    fold: bool,
}

impl PatternSet {
    pub fn exact() -> Self {
        Self {
            trie: TokenTrie::new(),
            rules: Vec::new(),
            fold: false,
        }
    }

    pub fn fold() -> Self {
        Self {
            trie: TokenTrie::new(),
            rules: Vec::new(),
            fold: true,
        }
    }

    pub fn rule(&self, rule_id: u32) -> &Rule {
        &self.rules[rule_id as usize]
    }

    /// Installs `(key, replacement, whole_word)`. Returns `Ok(false)` without
    /// mutating anything if `key` already resolves to a terminal under this
    /// set's own equality predicate — the caller decides whether that's a
    /// silent no-op (preserve-case variant fan-out) or a hard error (direct
    /// `match_case`/`ignore_case` install).
    pub fn add(&mut self, key: &[u8], replacement: Vec<u8>, whole_word: bool) -> Result<bool, EngineError> {
        if key.is_empty() {
            return Err(EngineError::EmptyPattern);
        }
        if self.trie.lookup_full(key, self.fold).is_some() {
            return Ok(false);
        }
        let rule_id = self.rules.len() as u32;
        self.trie.insert(key, rule_id);
        self.rules.push(Rule { replacement, whole_word });
        Ok(true)
    }

    /// Advances `ctx` to the next accepted hit at or after `ctx.cursor`, or
    /// clears `ctx.hit` if none remains before `ctx.end`.
    pub fn find(&self, haystack: &[u8], ctx: &mut SearchContext) {
        let mut p = ctx.cursor;
        while p < ctx.end {
            if let Some((hit_end, rule_id)) = self.trie.longest_match(haystack, p, ctx.end, self.fold) {
                let rule = &self.rules[rule_id as usize];
                if !rule.whole_word || self.passes_whole_word_gate(haystack, ctx.begin, ctx.end, p, hit_end) {
                    ctx.hit = Some(Hit {
                        begin: p,
                        end: hit_end,
                        rule_id,
                    });
                    return;
                }
            }
            p += 1;
        }
        ctx.hit = None;
    }

    fn passes_whole_word_gate(&self, haystack: &[u8], begin: usize, end: usize, hit_begin: usize, hit_end: usize) -> bool {
        let left_ok = hit_begin == begin || !is_word_byte(haystack[hit_begin - 1]);
        let right_ok = hit_end == end || !is_word_byte(haystack[hit_end]);
        left_ok && right_ok
    }
}
