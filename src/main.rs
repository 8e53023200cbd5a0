//! Mox CLI
//!
//! Scans a script file, or lines typed at an interactive prompt, and prints
//! the resulting tokens.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use mox_lang::{
    scan, Diagnostic, Diagnostics, MoxError, MoxResult, Scanner, Token, VERSION,
};
use tracing_subscriber::EnvFilter;

/// Input data was malformed (sysexits EX_DATAERR)
const EXIT_DATA_ERROR: u8 = 65;
/// Input file could not be read (sysexits EX_NOINPUT)
const EXIT_NO_INPUT: u8 = 66;

#[derive(Debug, Parser)]
#[command(name = "mox", version = VERSION, about = "Tokenize Mox scripts")]
struct Cli {
    /// Script to scan; starts the interactive prompt when omitted
    script: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// When to color diagnostics
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "mox=debug,mox_lang=debug"
    } else {
        "mox=warn,mox_lang=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(io::stderr)
        .init();

    match cli.color {
        ColorChoice::Auto => {}
        ColorChoice::Always => colored::control::set_override(true),
        ColorChoice::Never => colored::control::set_override(false),
    }

    match cli.script {
        Some(path) => run_file(&path),
        None => match run_prompt() {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error reading input: {}", e);
                ExitCode::FAILURE
            }
        },
    }
}

/// Scan a whole script; any scan error makes the exit status 65
fn run_file(path: &Path) -> ExitCode {
    let source = match read_source(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("{}", Diagnostic::new(&e));
            return ExitCode::from(EXIT_NO_INPUT);
        }
    };

    let filename = path.display().to_string();
    let outcome = scan(&source, Some(&filename));
    print_tokens(&outcome.tokens);
    print_diagnostics(&outcome.diagnostics, &source);

    if outcome.had_error() {
        ExitCode::from(EXIT_DATA_ERROR)
    } else {
        ExitCode::SUCCESS
    }
}

fn read_source(path: &Path) -> MoxResult<String> {
    let bytes = fs::read(path).map_err(|e| MoxError::io(path.display().to_string(), &e))?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "read script");
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Interactive prompt. Each line is scanned on its own and the diagnostics
/// are cleared before the next one, so errors never carry over.
fn run_prompt() -> io::Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut buf = Vec::new();
    let mut diagnostics = Diagnostics::new();

    loop {
        print!("> ");
        io::stdout().flush()?;

        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }

        // Invalid UTF-8 becomes U+FFFD and is reported like any other
        // unexpected character.
        let decoded = String::from_utf8_lossy(&buf);
        let line = strip_line_terminator(&decoded);

        diagnostics.clear();
        let tokens = Scanner::new(line, Some("<prompt>")).scan_tokens(&mut diagnostics);
        print_tokens(&tokens);
        print_diagnostics(&diagnostics, line);
    }

    println!();
    Ok(())
}

fn strip_line_terminator(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

fn print_tokens(tokens: &[Token]) {
    for token in tokens {
        println!("token: {}", token);
    }
}

fn print_diagnostics(diagnostics: &Diagnostics, source: &str) {
    for error in diagnostics {
        eprint!("{}", Diagnostic::with_source(error, source));
    }
}
