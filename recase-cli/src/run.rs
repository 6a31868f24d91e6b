//! Per-file apply loop: read, replace, write back (or preview), optionally
//! rename, tally a summary. Grounded on `refaktor-cli::apply`'s walk-and-apply
//! shape and `renamify-core::output`'s summary-result plumbing.

use crate::diff::render_diff;
use anyhow::{bail, Context, Result};
use rayon::prelude::*;
use recase_core::Replacer;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub renamed_to: Option<PathBuf>,
    pub changed: bool,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct Summary {
    pub files_scanned: usize,
    pub files_changed: usize,
    pub files_renamed: usize,
    pub outcomes: Vec<FileOutcome>,
}

pub struct RunOptions {
    pub dry_run: bool,
    pub rename: bool,
    pub verbose: bool,
    pub color: bool,
}

/// Applies `replacer` to `path`'s contents only (no renaming — see
/// `plan_renames`/`rename_all`, which need a whole-batch view to catch
/// collisions before touching the filesystem). Non-UTF-8 file contents are
/// skipped rather than treated as an error, since a recursive walk routinely
/// turns up stray binary-ish text files that slipped past the content sniff
/// in `walk.rs`.
pub fn apply_to_file(replacer: &Replacer, path: &Path, options: &RunOptions) -> Result<FileOutcome> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let Ok(before) = String::from_utf8(bytes) else {
        if options.verbose {
            eprintln!("skip (not utf-8): {}", path.display());
        }
        return Ok(FileOutcome { path: path.to_path_buf(), renamed_to: None, changed: false });
    };

    let after = replacer.find_and_replace_to_vec(before.as_bytes());
    let after = String::from_utf8(after).context("replacement produced invalid utf-8")?;
    let changed = after != before;

    if changed {
        if options.dry_run {
            print!("{}", render_diff(&path.display().to_string(), &before, &after, options.color));
        } else {
            fs::write(path, &after).with_context(|| format!("writing {}", path.display()))?;
        }
        if options.verbose {
            eprintln!("{} {}", if options.dry_run { "would change" } else { "changed" }, path.display());
        }
    }

    Ok(FileOutcome { path: path.to_path_buf(), renamed_to: None, changed })
}

/// Computes `path`'s renamed target, if its file name matches a rule. Returns
/// `None` if the name is unchanged.
fn rename_target(replacer: &Replacer, path: &Path) -> Result<Option<PathBuf>> {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    let renamed = replacer.find_and_replace_str(name).context("file name is not valid utf-8")?;
    if renamed == name {
        return Ok(None);
    }
    Ok(Some(path.with_file_name(&renamed)))
}

/// Plans every rename up front and rejects the whole batch if two sources
/// would land on the same target, or a target collides with a file outside
/// the batch that isn't itself being renamed away. Mirrors the teacher's
/// collect-then-detect-conflicts shape instead of renaming file-by-file and
/// silently letting `fs::rename` overwrite whatever got there first.
fn plan_renames(replacer: &Replacer, files: &[PathBuf]) -> Result<Vec<(PathBuf, PathBuf)>> {
    let mut planned = Vec::new();
    let mut targets: HashMap<PathBuf, Vec<PathBuf>> = HashMap::new();

    for path in files {
        if let Some(target) = rename_target(replacer, path)? {
            targets.entry(target.clone()).or_default().push(path.clone());
            planned.push((path.clone(), target));
        }
    }

    let sources: std::collections::HashSet<&PathBuf> = files.iter().collect();
    for (target, sources_for_target) in &targets {
        if sources_for_target.len() > 1 {
            bail!(
                "rename collision: {} would all be renamed to {}",
                sources_for_target.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", "),
                target.display()
            );
        }
        if target.exists() && !sources.contains(target) {
            bail!("rename collision: {} already exists and is not part of this run", target.display());
        }
    }

    Ok(planned)
}

fn rename_all(planned: &[(PathBuf, PathBuf)], options: &RunOptions) -> Result<usize> {
    for (path, target) in planned {
        if options.verbose {
            eprintln!(
                "{} {} -> {}",
                if options.dry_run { "would rename" } else { "renamed" },
                path.display(),
                target.display()
            );
        }
        if !options.dry_run {
            fs::rename(path, target).with_context(|| format!("renaming {} to {}", path.display(), target.display()))?;
        }
    }
    Ok(planned.len())
}

/// Applies `replacer` across `files`. Each file's read/replace/write is
/// independent, so for a large recursive walk the per-file work runs across
/// a `rayon` pool rather than one at a time. Renames are planned and checked
/// for collisions across the whole batch before any of them run.
pub fn run_all(replacer: &Replacer, files: &[PathBuf], options: &RunOptions) -> Result<Summary> {
    let mut outcomes: Vec<FileOutcome> =
        files.par_iter().map(|path| apply_to_file(replacer, path, options)).collect::<Result<_>>()?;

    let mut files_renamed = 0;
    if options.rename {
        let planned = plan_renames(replacer, files)?;
        files_renamed = rename_all(&planned, options)?;
        let targets: HashMap<&PathBuf, &PathBuf> = planned.iter().map(|(path, target)| (path, target)).collect();
        for outcome in &mut outcomes {
            outcome.renamed_to = targets.get(&outcome.path).map(|t| (*t).clone());
        }
    }

    let mut summary = Summary::default();
    for outcome in outcomes {
        summary.files_scanned += 1;
        if outcome.changed {
            summary.files_changed += 1;
        }
        summary.outcomes.push(outcome);
    }
    summary.files_renamed = files_renamed;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use recase_core::CaseMode;

    fn opts(dry_run: bool, rename: bool) -> RunOptions {
        RunOptions { dry_run, rename, verbose: false, color: false }
    }

    fn replacer_for(find: &str, replace: &str) -> Replacer {
        let mut replacer = Replacer::new();
        replacer.add_replacement(find.as_bytes(), replace.as_bytes(), CaseMode::PreserveCase, true).unwrap();
        replacer
    }

    #[test]
    fn writes_back_changed_contents() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.txt");
        fs::write(&file, "old thing here").unwrap();
        let replacer = replacer_for("old thing", "new thing");

        let outcome = apply_to_file(&replacer, &file, &opts(false, false)).unwrap();
        assert!(outcome.changed);
        assert_eq!(fs::read_to_string(&file).unwrap(), "new thing here");
    }

    #[test]
    fn dry_run_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.txt");
        fs::write(&file, "old thing here").unwrap();
        let replacer = replacer_for("old thing", "new thing");

        let outcome = apply_to_file(&replacer, &file, &opts(true, false)).unwrap();
        assert!(outcome.changed);
        assert_eq!(fs::read_to_string(&file).unwrap(), "old thing here");
    }

    #[test]
    fn unchanged_file_is_reported_as_such() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.txt");
        fs::write(&file, "nothing to see").unwrap();
        let replacer = replacer_for("old thing", "new thing");

        let outcome = apply_to_file(&replacer, &file, &opts(false, false)).unwrap();
        assert!(!outcome.changed);
        assert_eq!(fs::read_to_string(&file).unwrap(), "nothing to see");
    }

    #[test]
    fn renames_file_when_name_matches() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("old_thing.txt");
        fs::write(&file, "body").unwrap();
        let replacer = replacer_for("old thing", "new thing");

        let summary = run_all(&replacer, &[file.clone()], &opts(false, true)).unwrap();
        let target = summary.outcomes[0].renamed_to.clone().expect("expected a rename");
        assert!(target.ends_with("new_thing.txt"));
        assert!(target.exists());
        assert!(!file.exists());
        assert_eq!(summary.files_renamed, 1);
    }

    #[test]
    fn dry_run_rename_does_not_touch_filesystem() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("old_thing.txt");
        fs::write(&file, "body").unwrap();
        let replacer = replacer_for("old thing", "new thing");

        let summary = run_all(&replacer, &[file.clone()], &opts(true, true)).unwrap();
        assert!(summary.outcomes[0].renamed_to.is_some());
        assert!(file.exists());
    }

    #[test]
    fn colliding_renames_are_rejected_without_touching_the_filesystem() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("foo.txt");
        let b = dir.path().join("bar.txt");
        fs::write(&a, "body a").unwrap();
        fs::write(&b, "body b").unwrap();
        let mut replacer = Replacer::new();
        replacer.add_replacement(b"foo", b"same", CaseMode::MatchCase, false).unwrap();
        replacer.add_replacement(b"bar", b"same", CaseMode::MatchCase, false).unwrap();

        let err = run_all(&replacer, &[a.clone(), b.clone()], &opts(false, true)).unwrap_err();
        assert!(err.to_string().contains("rename collision"));
        assert!(a.exists());
        assert!(b.exists());
    }

    #[test]
    fn rename_target_colliding_with_an_untouched_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("old_thing.txt");
        let bystander = dir.path().join("new_thing.txt");
        fs::write(&file, "body").unwrap();
        fs::write(&bystander, "already here").unwrap();
        let replacer = replacer_for("old thing", "new thing");

        let err = run_all(&replacer, &[file.clone()], &opts(false, true)).unwrap_err();
        assert!(err.to_string().contains("rename collision"));
        assert!(file.exists());
        assert_eq!(fs::read_to_string(&bystander).unwrap(), "already here");
    }

    #[test]
    fn run_all_tallies_summary_across_files() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        fs::write(&a, "old thing").unwrap();
        fs::write(&b, "unrelated").unwrap();
        let replacer = replacer_for("old thing", "new thing");

        let summary = run_all(&replacer, &[a, b], &opts(false, false)).unwrap();
        assert_eq!(summary.files_scanned, 2);
        assert_eq!(summary.files_changed, 1);
    }
}
