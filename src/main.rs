//! CLI tool to dump, check and format noctern source files.
//!
//! Exit status is 0 when every file is clean, 1 when any file has errors
//! (or, for `fmt --check`, is not formatted) and 2 for usage or I/O
//! problems. Set `NOCTERN_LOG=debug` to trace the parser on stderr.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use noctern::{Config, Diagnostic, Error, Lexer, NewlineMode, Outcome, Source, TokenKind};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "noctern", version, about = "Lex, parse and format noctern source files")]
struct Cli {
    #[command(flatten)]
    settings: Settings,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct Settings {
    /// Columns per tab stop in reported positions
    #[arg(long, global = true, default_value_t = Config::DEFAULT_TAB_WIDTH)]
    tab_width: usize,

    /// Tokens the parser may look ahead
    #[arg(long, global = true, default_value_t = Config::DEFAULT_MAX_LOOKAHEAD)]
    max_lookahead: usize,

    /// Which line endings count as newlines
    #[arg(long, global = true, value_enum, default_value_t = Newline::Both)]
    newline: Newline,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Newline {
    /// Only `\n`
    Lf,
    /// `\n`, `\r\n` and `\r`
    Both,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the tokens of each file, one per line
    Lex {
        /// Include whitespace, newline and comment tokens
        #[arg(long)]
        trivia: bool,
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Print the syntax tree of each file as S-expressions
    Parse {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Print each file in canonical format
    Fmt {
        /// Only report files that are not already formatted
        #[arg(long)]
        check: bool,
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Report diagnostics without printing anything else
    Check {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

impl Settings {
    fn to_config(&self) -> Result<Config, Error> {
        let newline = match self.newline {
            Newline::Lf => NewlineMode::Lf,
            Newline::Both => NewlineMode::Both,
        };
        let config = Config::new()
            .tab_width(self.tab_width)
            .max_lookahead(self.max_lookahead)
            .newline(newline);
        config.validate()?;
        Ok(config)
    }
}

fn main() -> ExitCode {
    // Log to stderr; stdout carries the command output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("NOCTERN_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    let config = match cli.settings.to_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(2);
        }
    };

    let files = match &cli.command {
        Command::Lex { files, .. }
        | Command::Parse { files }
        | Command::Fmt { files, .. }
        | Command::Check { files } => files,
    };

    let mut had_error = false;
    let mut had_failure = false;

    for path in files {
        let result = Source::from_path(path).and_then(|source| {
            tracing::debug!(path = %path.display(), "processing");
            run(&cli.command, &source, &config)
        });
        match result {
            Ok(clean) => had_error |= !clean,
            Err(e) => {
                eprintln!("error: {e}");
                had_failure = true;
            }
        }
    }

    if had_failure {
        ExitCode::from(2)
    } else if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Run one command on one file. `Ok(false)` means the file has errors.
fn run(command: &Command, source: &Source, config: &Config) -> Result<bool, Error> {
    match command {
        Command::Lex { trivia, .. } => lex(source, config, *trivia),
        Command::Parse { .. } => {
            let parsed = noctern::parse(source, config)?;
            print!("{}", parsed.program);
            report(source, config, &parsed.diagnostics);
            if parsed.outcome == Outcome::Partial {
                eprintln!("{}: note: input ended during error recovery", display_name(source));
            }
            Ok(!parsed.has_errors())
        }
        Command::Fmt { check, .. } => {
            let parsed = noctern::parse(source, config)?;
            report(source, config, &parsed.diagnostics);
            if parsed.has_errors() {
                return Ok(false);
            }
            let formatted = noctern::format(&parsed.program);
            if !*check {
                print!("{formatted}");
                return Ok(true);
            }
            let name = display_name(source);
            if formatted == source.text() {
                eprintln!("{name}: formatted");
                Ok(true)
            } else {
                eprintln!("{name}: not formatted");
                Ok(false)
            }
        }
        Command::Check { .. } => {
            let parsed = noctern::parse(source, config)?;
            report(source, config, &parsed.diagnostics);
            if parsed.has_errors() {
                return Ok(false);
            }
            let items = parsed.program.items.len();
            let warnings = parsed.diagnostics.len();
            eprintln!(
                "{}: ok ({items} item(s), {warnings} warning(s))",
                display_name(source)
            );
            Ok(true)
        }
    }
}

fn lex(source: &Source, config: &Config, trivia: bool) -> Result<bool, Error> {
    let lexer = Lexer::new(source, config)?;
    let mut lexer = if trivia { lexer.with_trivia() } else { lexer };
    loop {
        let token = lexer.next_token()?;
        println!("{} {token}", token.start);
        if token.kind == TokenKind::EndOfInput {
            break;
        }
    }
    let diagnostics = lexer.into_diagnostics();
    let clean = !diagnostics.has_errors();
    report(source, config, diagnostics.all());
    Ok(clean)
}

fn report(source: &Source, config: &Config, diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        eprint!("{}", diagnostic.render_with(source, config));
    }
}

fn display_name(source: &Source) -> &str {
    source.name().unwrap_or("<input>")
}
