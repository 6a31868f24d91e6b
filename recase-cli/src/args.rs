use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Case-preserving multi-pattern find-and-replace
#[derive(Parser, Debug)]
#[command(name = "recase")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Text to search for (omit when using --replacements-file)
    pub find: Option<String>,

    /// Text to replace it with (omit when using --replacements-file)
    pub replace: Option<String>,

    /// How the find/replace pair is matched and cased
    #[arg(long, value_enum, default_value = "preserve")]
    pub case_mode: CaseModeArg,

    /// Only match at word boundaries
    #[arg(long)]
    pub match_whole_word: bool,

    /// Read find/replace rules from a file instead of FIND/REPLACE
    #[arg(short = 'f', long, value_name = "PATH", conflicts_with_all = ["find", "replace"])]
    pub replacements_file: Option<PathBuf>,

    /// Path to operate on (file or, with --recursive, a directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Recurse into subdirectories
    #[arg(short = 'r', long)]
    pub recursive: bool,

    /// Only touch files with these extensions (comma-separated, no dot)
    #[arg(long, value_delimiter = ',')]
    pub extensions: Vec<String>,

    /// Don't rename files/directories whose name matches a rule
    #[arg(long)]
    pub no_rename: bool,

    /// Show what would change without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Print per-file progress to stderr
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Output format for the final summary (defaults to recase.toml's
    /// `defaults.format`, falling back to `text`)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Disable colored diff output
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseModeArg {
    Preserve,
    Ignore,
    Match,
}

impl From<CaseModeArg> for recase_core::CaseMode {
    fn from(value: CaseModeArg) -> Self {
        match value {
            CaseModeArg::Preserve => Self::PreserveCase,
            CaseModeArg::Ignore => Self::IgnoreCase,
            CaseModeArg::Match => Self::MatchCase,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}
