//! Unified-diff-style preview for `--dry-run`, grounded on
//! `renamify-core::preview::diff`'s use of `similar`/`nu_ansi_term`, trimmed
//! to a whole-file line diff since this crate has no per-hunk match model to
//! highlight against.

use nu_ansi_term::Color as AnsiColor;
use similar::{ChangeTag, TextDiff};
use std::fmt::Write;

pub fn render_diff(path: &str, before: &str, after: &str, use_color: bool) -> String {
    let mut out = String::new();
    let header = format!("--- {path}\n+++ {path}\n");
    if use_color {
        let _ = write!(out, "{}", AnsiColor::Blue.paint(header));
    } else {
        out.push_str(&header);
    }

    let diff = TextDiff::from_lines(before, after);
    for change in diff.iter_all_changes() {
        let sign = match change.tag() {
            ChangeTag::Delete => '-',
            ChangeTag::Insert => '+',
            ChangeTag::Equal => ' ',
        };
        let line = format!("{sign}{change}");
        if use_color {
            let painted = match change.tag() {
                ChangeTag::Delete => AnsiColor::Red.paint(line).to_string(),
                ChangeTag::Insert => AnsiColor::Green.paint(line).to_string(),
                ChangeTag::Equal => line,
            };
            out.push_str(&painted);
        } else {
            out.push_str(&line);
        }
        if !out.ends_with('\n') {
            out.push('\n');
        }
    }
    out
}
