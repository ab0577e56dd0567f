// ABOUTME: CLI binary for the tidymail HTML sanitizer.
// ABOUTME: Cleans HTML files or stdin and prints cleaned markup, plain text, or a JSON envelope.

mod input;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tidymail_sanitize::{Options, Sanitizer};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "tidymail")]
#[command(about = "Strip presentational and tracking markup from HTML e-mail", long_about = None)]
struct Args {
    /// HTML files to clean. Use "-" (or nothing) to read from stdin.
    #[arg()]
    inputs: Vec<String>,

    /// Extract plain text instead of cleaned markup
    #[arg(long)]
    text: bool,

    /// Keep HTML comments
    #[arg(long)]
    keep_comments: bool,

    /// Keep empty elements
    #[arg(long)]
    keep_empty: bool,

    /// Keep id attributes
    #[arg(long)]
    preserve_structure: bool,

    /// JSON options file (camelCase or snake_case keys); flags override it
    #[arg(long = "options")]
    options: Option<PathBuf>,

    /// Output file path (default: stdout)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Output a JSON envelope per input instead of raw content
    #[arg(long = "json")]
    json_output: bool,

    /// Print elapsed time in ms to stderr
    #[arg(long = "timing")]
    timing: bool,
}

/// Result for one input, as printed by `--json`.
#[derive(Debug, Serialize)]
struct Outcome {
    input: String,
    ok: bool,
    output: Option<String>,
    error: Option<String>,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Loads the options file if given, then applies CLI flags on top.
fn resolve_options(args: &Args) -> Result<Options> {
    let mut opts = match &args.options {
        Some(path) => load_options(path)?,
        None => Options::default(),
    };
    if args.text {
        opts.extract_text_only = true;
    }
    if args.keep_comments {
        opts.remove_comments = false;
    }
    if args.keep_empty {
        opts.remove_empty_elements = false;
    }
    if args.preserve_structure {
        opts.preserve_structure = true;
    }
    Ok(opts)
}

fn load_options(path: &Path) -> Result<Options> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read options file {}", path.display()))?;
    Options::from_json(&raw).with_context(|| format!("in options file {}", path.display()))
}

fn clean_one(sanitizer: &Sanitizer, target: &str) -> Result<String> {
    let html = input::load(target)?;
    let cleaned = sanitizer
        .clean(&html)
        .with_context(|| format!("failed to clean {}", target))?;
    Ok(cleaned)
}

/// Format output based on whether JSON output is requested.
///
/// JSON mode prints one envelope for a single input, an array otherwise.
/// Raw mode prints the successful outputs separated by blank lines.
fn format_output(outcomes: &[Outcome], json_output: bool) -> Result<String> {
    if json_output {
        let json = if outcomes.len() == 1 {
            serde_json::to_string_pretty(&outcomes[0])?
        } else {
            serde_json::to_string_pretty(outcomes)?
        };
        return Ok(json);
    }
    Ok(outcomes
        .iter()
        .filter_map(|o| o.output.as_deref())
        .collect::<Vec<_>>()
        .join("\n\n"))
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging();

    let opts = match resolve_options(&args) {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("error: {:#}", e);
            return ExitCode::from(1);
        }
    };
    tracing::debug!(?opts, "resolved options");
    let sanitizer = Sanitizer::builder().options(opts).build();

    let targets = if args.inputs.is_empty() {
        vec![input::STDIN.to_string()]
    } else {
        args.inputs.clone()
    };

    let start = Instant::now();
    let mut outcomes = Vec::with_capacity(targets.len());
    let mut had_error = false;

    for target in &targets {
        match clean_one(&sanitizer, target) {
            Ok(output) => outcomes.push(Outcome {
                input: target.clone(),
                ok: true,
                output: Some(output),
                error: None,
            }),
            Err(e) => {
                eprintln!("error: {:#}", e);
                had_error = true;
                outcomes.push(Outcome {
                    input: target.clone(),
                    ok: false,
                    output: None,
                    error: Some(format!("{:#}", e)),
                });
            }
        }
    }

    let elapsed = start.elapsed();

    match format_output(&outcomes, args.json_output) {
        Ok(output_str) => {
            if let Some(output_path) = &args.output {
                if let Err(e) = fs::write(output_path, &output_str) {
                    eprintln!("error writing to {:?}: {}", output_path, e);
                    had_error = true;
                }
            } else if args.json_output || outcomes.iter().any(|o| o.ok) {
                println!("{}", output_str);
            }
        }
        Err(e) => {
            eprintln!("error: {:#}", e);
            had_error = true;
        }
    }

    if args.timing {
        let _ = writeln!(io::stderr(), "elapsed: {}ms", elapsed.as_millis());
    }

    if had_error {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}
