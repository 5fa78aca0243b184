use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use comment_checker::checker::{parse_hook_bytes, CheckOptions, Checker, Outcome};
use comment_checker::config::Overrides;
use comment_checker::input::read_file;
use comment_checker::server::run_stdio_server;
use std::io::{Read, Write};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "comment-checker")]
#[command(version)]
#[command(about = "Blocks agent edits that introduce new code comments or docstrings")]
struct Cli {
    /// Replace the default report. `{{comments}}` is substituted with the detected comment blocks.
    #[arg(long, value_name = "TEMPLATE")]
    prompt: Option<String>,

    /// Skip docstring queries; only plain comments are detected.
    #[arg(long)]
    no_docstrings: bool,

    /// Detect docstrings but never report them.
    #[arg(long)]
    suppress_docstrings: bool,

    #[command(subcommand)]
    cmd: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check a file on disk as if it had just been written in full
    Check {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Line-delimited JSON server: one hook record per line in, one decision per line out
    Serve,
}

fn read_stdin() -> Result<Vec<u8>> {
    let mut raw = Vec::new();
    std::io::stdin().read_to_end(&mut raw).context("reading hook input from stdin")?;
    Ok(raw)
}

fn hook_outcome(raw: &[u8], overrides: &Overrides) -> Outcome {
    match parse_hook_bytes(raw) {
        Ok(input) => {
            let cfg = overrides.resolve(&input.cwd);
            Checker::new(CheckOptions::from(&cfg)).check_input(&input)
        }
        Err(reason) => Outcome::Skip(reason),
    }
}

fn check_outcome(file: &PathBuf, overrides: &Overrides) -> Outcome {
    let cfg = overrides.resolve("");
    let content = read_file(file);
    Checker::new(CheckOptions::from(&cfg)).check_content(&content, &file.to_string_lossy())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let overrides = Overrides {
        custom_prompt: cli.prompt,
        no_docstrings: cli.no_docstrings,
        suppress_docstrings: cli.suppress_docstrings,
    };

    let outcome = match cli.cmd {
        Some(Command::Serve) => return run_stdio_server(overrides),
        Some(Command::Check { file }) => check_outcome(&file, &overrides),
        None => {
            // An unreadable stdin is treated like an empty one.
            let raw = read_stdin().unwrap_or_default();
            hook_outcome(&raw, &overrides)
        }
    };

    let mut stderr = std::io::stderr();
    write!(stderr, "{}", outcome.render())?;
    stderr.flush()?;

    std::process::exit(outcome.exit_code());
}
