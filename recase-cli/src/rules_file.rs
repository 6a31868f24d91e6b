//! Parses the `--replacements-file` format: `key=value` lines, the
//! `pair=A-->B` shorthand, and bare `A-->B` lines. `case-mode` and
//! `match-whole-word` are sticky: once set, they apply to every rule emitted
//! afterwards until reassigned.

use crate::escape::decode_escapes;
use anyhow::{bail, Context, Result};
use recase_core::CaseMode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSpec {
    pub find: String,
    pub replace: String,
    pub mode: CaseMode,
    pub whole_word: bool,
}

struct ParserState {
    mode: CaseMode,
    whole_word: bool,
    pending_find: Option<String>,
    pending_replace: Option<String>,
    rules: Vec<RuleSpec>,
}

impl ParserState {
    fn new() -> Self {
        Self {
            mode: CaseMode::PreserveCase,
            whole_word: false,
            pending_find: None,
            pending_replace: None,
            rules: Vec::new(),
        }
    }

    fn emit(&mut self, find: String, replace: String) {
        self.rules.push(RuleSpec {
            find: decode_escapes(&find),
            replace: decode_escapes(&replace),
            mode: self.mode,
            whole_word: self.whole_word,
        });
    }

    fn maybe_emit_pending(&mut self) {
        if self.pending_find.is_some() && self.pending_replace.is_some() {
            let find = self.pending_find.take().unwrap();
            let replace = self.pending_replace.take().unwrap();
            self.emit(find, replace);
        }
    }
}

fn parse_case_mode(value: &str) -> Result<CaseMode> {
    match value.trim().to_ascii_lowercase().as_str() {
        "preserve" => Ok(CaseMode::PreserveCase),
        "ignore" => Ok(CaseMode::IgnoreCase),
        "match" => Ok(CaseMode::MatchCase),
        other => bail!("unknown case-mode `{other}` (expected preserve, ignore, or match)"),
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => bail!("unknown boolean value `{other}` (expected true or false)"),
    }
}

fn split_pair(value: &str) -> Result<(String, String)> {
    match value.split_once("-->") {
        Some((find, replace)) => Ok((find.trim().to_string(), replace.trim().to_string())),
        None => bail!("expected `A-->B` pair syntax, found `{value}`"),
    }
}

/// Parses the full contents of a replacements file into an ordered list of
/// rules, applying sticky `case-mode`/`match-whole-word` state as it goes.
pub fn parse_rules_file(contents: &str) -> Result<Vec<RuleSpec>> {
    let mut state = ParserState::new();

    for (line_no, raw_line) in contents.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let result = parse_line(&mut state, line);
        result.with_context(|| format!("line {}: `{raw_line}`", line_no + 1))?;
    }

    if state.pending_find.is_some() || state.pending_replace.is_some() {
        bail!("replacements file ended with an incomplete rule (text-to-find/replacement-text set without its pair)");
    }

    Ok(state.rules)
}

fn parse_line(state: &mut ParserState, line: &str) -> Result<()> {
    if let Some(value) = line.strip_prefix("pair=") {
        let (find, replace) = split_pair(value)?;
        state.emit(find, replace);
        return Ok(());
    }

    if !line.contains('=') {
        if line.contains("-->") {
            let (find, replace) = split_pair(line)?;
            state.emit(find, replace);
            return Ok(());
        }
        bail!("malformed line: expected `key=value` or `A-->B`");
    }

    let (key, value) = line.split_once('=').expect("line.contains('=') checked above");
    match key {
        "text-to-find" => {
            state.pending_find = Some(value.to_string());
        },
        "replacement-text" => {
            state.pending_replace = Some(value.to_string());
        },
        "case-mode" => {
            state.mode = parse_case_mode(value)?;
        },
        "match-whole-word" => {
            state.whole_word = parse_bool(value)?;
        },
        other => bail!("unknown key `{other}`"),
    }

    state.maybe_emit_pending();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_value_pair_across_two_lines() {
        let rules = parse_rules_file("text-to-find=foo\nreplacement-text=bar\n").unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].find, "foo");
        assert_eq!(rules[0].replace, "bar");
        assert_eq!(rules[0].mode, CaseMode::PreserveCase);
        assert!(!rules[0].whole_word);
    }

    #[test]
    fn pair_shorthand_emits_immediately() {
        let rules = parse_rules_file("pair=old_name-->new_name\n").unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].find, "old_name");
        assert_eq!(rules[0].replace, "new_name");
    }

    #[test]
    fn bare_arrow_line() {
        let rules = parse_rules_file("foo-->bar\n").unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].find, "foo");
        assert_eq!(rules[0].replace, "bar");
    }

    #[test]
    fn sticky_state_applies_to_later_rules() {
        let input = "case-mode=match\nmatch-whole-word=true\nfoo-->bar\ncase-mode=ignore\nbaz-->qux\n";
        let rules = parse_rules_file(input).unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].mode, CaseMode::MatchCase);
        assert!(rules[0].whole_word);
        assert_eq!(rules[1].mode, CaseMode::IgnoreCase);
        assert!(rules[1].whole_word, "whole-word stays sticky across the case-mode change");
    }

    #[test]
    fn comments_and_blank_lines_are_ignored() {
        let input = "# a comment\n\nfoo-->bar\n\n# trailing\n";
        let rules = parse_rules_file(input).unwrap();
        assert_eq!(rules.len(), 1);
    }

    #[test]
    fn unknown_key_is_an_error() {
        assert!(parse_rules_file("bogus=1\n").is_err());
    }

    #[test]
    fn malformed_line_is_an_error() {
        assert!(parse_rules_file("not a valid line\n").is_err());
    }

    #[test]
    fn invalid_case_mode_is_an_error() {
        assert!(parse_rules_file("case-mode=sideways\n").is_err());
    }

    #[test]
    fn dangling_text_to_find_is_an_error() {
        assert!(parse_rules_file("text-to-find=foo\n").is_err());
    }

    #[test]
    fn escapes_are_decoded() {
        let rules = parse_rules_file(r"pair=line\tend-->line_end" ).unwrap();
        assert_eq!(rules[0].find, "line\tend");
    }
}
