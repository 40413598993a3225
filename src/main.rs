use std::{ffi::OsString, path::PathBuf};

use anyhow::bail;
use clap::{command, Arg, ArgAction, ArgMatches, Command};
use context::Context;
use rewriter::rewrite;

mod context;
mod metadata;
mod rewriter;

fn build_command() -> Command {
    command!().args([
        Arg::new("file")
            .help("The path of the markdown file to process")
            .short('f')
            .long("file")
            .action(ArgAction::Set)
            .num_args(0..=1)
            .default_missing_value("")
            .value_name("PATH"),
        Arg::new("no_duplicate_heading")
            .help("Do not re-insert the first heading at the top of the body")
            .long("no-duplicate-heading")
            .action(ArgAction::SetTrue),
        Arg::new("dry_run")
            .help("Print the rewritten content instead of writing the file")
            .long("dry-run")
            .action(ArgAction::SetTrue),
    ])
}

/// Accepts the single-dash `-file` form by turning it into `--file`.
///
/// Only arguments in flag position are rewritten; the value following a file
/// flag is passed through as is.
fn normalize_args<I: IntoIterator<Item = OsString>>(args: I) -> Vec<OsString> {
    let mut pending_value = false;
    args.into_iter()
        .map(|arg| {
            let is_value = std::mem::replace(&mut pending_value, false);
            if is_value {
                return arg;
            }
            match arg.to_str() {
                Some(s) if s == "-file" || s.starts_with("-file=") => {
                    pending_value = s == "-file";
                    OsString::from(format!("-{s}"))
                }
                Some("--file" | "-f") => {
                    pending_value = true;
                    arg
                }
                _ => arg,
            }
        })
        .collect()
}

fn file_path(matches: &ArgMatches) -> anyhow::Result<PathBuf> {
    match matches.get_one::<String>("file") {
        Some(path) if !path.is_empty() => Ok(PathBuf::from(path)),
        _ => bail!("Error: file path is required"),
    }
}

fn run() -> anyhow::Result<()> {
    let matches = build_command().get_matches_from(normalize_args(std::env::args_os()));

    Context::init(
        file_path(&matches)?,
        !matches.get_flag("no_duplicate_heading"),
        matches.get_flag("dry_run"),
    )?;

    rewrite(Context::instance())
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        println!("{e:#}");
        std::process::exit(1);
    }
}
