use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use bee::{Regex, Scanner, SyntaxMap, TokenKind};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Abandon any single pattern match after this many steps
    #[arg(long, global = true, value_name = "N")]
    max_steps: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the tokens of a Bee source file
    Lex {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Match a pattern against the start of an input string
    Match { pattern: String, input: String },
    /// Print the compiled graph of a pattern in Graphviz format
    Graph {
        pattern: String,

        /// Label of the graph, defaults to the pattern itself
        #[arg(short, long)]
        name: Option<String>,
    },
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    // Only initialize if RUST_LOG is set
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn lex(file: &Path, max_steps: Option<usize>) -> Result<()> {
    let src = fs::read(file).with_context(|| format!("Failed to read {}", file.display()))?;
    let map = SyntaxMap::bee().context("Failed to build the Bee rule table")?;

    let mut scanner = Scanner::new(&src, &map);
    if let Some(limit) = max_steps {
        scanner = scanner.with_step_limit(limit);
    }
    loop {
        let token = scanner.next_token();
        println!("{token}");
        if token.kind == TokenKind::End {
            return Ok(());
        }
    }
}

fn match_pattern(pattern: &str, input: &str, max_steps: Option<usize>) -> Result<()> {
    let regex = Regex::new(pattern).with_context(|| format!("Invalid pattern {pattern:?}"))?;
    let mut matcher = regex.matcher();
    if let Some(limit) = max_steps {
        matcher = matcher.with_step_limit(limit);
    }

    let matched = matcher.run(input.as_bytes())?;
    println!("{}", match_report(pattern, input, matched));
    Ok(())
}

/// `"PATTERN" -> "INPUT" : PREFIX`, both sides printed as given.
fn match_report(pattern: &str, input: &str, matched: Option<usize>) -> String {
    match matched {
        Some(len) => format!(
            "\"{pattern}\" -> \"{input}\" : {}",
            String::from_utf8_lossy(&input.as_bytes()[..len])
        ),
        None => format!("\"{pattern}\" -> \"{input}\" : no-match"),
    }
}

fn graph(pattern: &str, name: Option<&str>) -> Result<()> {
    let regex = Regex::new(pattern).with_context(|| format!("Invalid pattern {pattern:?}"))?;
    print!("{}", regex.to_dot(name.unwrap_or(pattern)));
    Ok(())
}

fn run(args: Args) -> Result<()> {
    match &args.command {
        Command::Lex { file } => lex(file, args.max_steps),
        Command::Match { pattern, input } => match_pattern(pattern, input, args.max_steps),
        Command::Graph { pattern, name } => graph(pattern, name.as_deref()),
    }
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
