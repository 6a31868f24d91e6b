#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

mod args;
mod config;
mod diff;
mod escape;
mod rules_file;
mod run;
mod walk;

use anyhow::{bail, Context, Result};
use args::{Cli, OutputFormat};
use clap::Parser;
use config::Config;
use escape::decode_escapes;
use recase_core::{CaseMode, Replacer};
use run::{run_all, RunOptions, Summary};
use std::io::IsTerminal;
use std::process;
use walk::{build_extension_filter, walk_files};

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(&std::env::current_dir().context("resolving current directory")?)?;

    let replacer = build_replacer(&cli, &config)?;

    let extensions = if cli.extensions.is_empty() { config.defaults.extensions.clone() } else { cli.extensions.clone() };
    let filter = build_extension_filter(&extensions).context("invalid --extensions pattern")?;
    let files = walk_files(&cli.path, cli.recursive, &filter);
    if files.is_empty() {
        bail!("no files found at {}", cli.path.display());
    }

    let options = RunOptions {
        dry_run: cli.dry_run,
        rename: !cli.no_rename,
        verbose: cli.verbose,
        color: !cli.no_color && std::io::stdout().is_terminal(),
    };

    let summary = run_all(&replacer, &files, &options)?;

    let format = match cli.format {
        Some(format) => format,
        None => parse_format(&config.defaults.format)?,
    };
    print_summary(&summary, format)?;

    Ok(())
}

fn build_replacer(cli: &Cli, config: &Config) -> Result<Replacer> {
    let mut replacer = Replacer::new();

    if let Some(path) = &cli.replacements_file {
        let contents = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let rules = rules_file::parse_rules_file(&contents)?;
        for rule in rules {
            replacer
                .add_replacement(rule.find.as_bytes(), rule.replace.as_bytes(), rule.mode, rule.whole_word)
                .with_context(|| format!("installing rule `{}` -> `{}`", rule.find, rule.replace))?;
        }
        return Ok(replacer);
    }

    let find = cli.find.as_deref().context("FIND is required unless --replacements-file is given")?;
    let replace = cli.replace.as_deref().context("REPLACE is required unless --replacements-file is given")?;
    let find = decode_escapes(find);
    let replace = decode_escapes(replace);
    let whole_word = cli.match_whole_word || config.defaults.match_whole_word;
    let mode = CaseMode::from(cli.case_mode);
    replacer
        .add_replacement(find.as_bytes(), replace.as_bytes(), mode, whole_word)
        .with_context(|| format!("installing rule `{find}` -> `{replace}`"))?;
    Ok(replacer)
}

fn parse_format(value: &str) -> Result<OutputFormat> {
    match value {
        "text" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        other => bail!("unknown output format `{other}` in recase.toml (expected text or json)"),
    }
}

fn print_summary(summary: &Summary, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(summary).context("serializing summary")?;
            println!("{json}");
        },
        OutputFormat::Text => {
            println!(
                "{} file(s) scanned, {} changed, {} renamed",
                summary.files_scanned, summary.files_changed, summary.files_renamed
            );
        },
    }
    Ok(())
}
