// basl: lex, parse and print a basl source file

use std::error::Error;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser as CliParser};
use crossterm::style::Stylize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use basl::parser::{lex_with_diagnostics, write_tokens, Diagnostic, Parser, Severity};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

#[derive(Debug, CliParser)]
#[command(name = "basl", version, about = "Parse a basl source file and print its syntax tree")]
struct Cli {
    /// Source file to parse
    #[arg(short, long, value_name = "PATH")]
    input: PathBuf,

    /// Write the token stream as JSON to this path
    #[arg(short, long, value_name = "PATH")]
    tokens: Option<PathBuf>,

    /// Do not report warnings
    #[arg(short = 'w', long)]
    no_warnings: bool,

    /// Colorize diagnostics
    #[arg(long)]
    color: bool,

    /// Do not print the syntax tree
    #[arg(short, long)]
    quiet: bool,

    /// Increase logging verbosity (-v: info, -vv: debug, -vvv+: trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<ExitCode, Box<dyn Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(directive_for_verbosity(cli.verbose))),
        )
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    let file_name = cli.input.display().to_string();
    let source = read_source(&cli)?;
    info!(file = %file_name, bytes = source.len(), "read source");

    let (tokens, mut diagnostics) = lex_with_diagnostics(&source, &file_name);

    if let Some(path) = &cli.tokens {
        let writer = BufWriter::new(File::create(path)?);
        write_tokens(&tokens, writer)?;
        debug!(path = %path.display(), tokens = tokens.len(), "wrote token stream");
    }

    let mut parser = Parser::new(tokens).with_file(file_name.as_str());
    let statements = parser.parse();
    let rendering = parser.print_ast(&statements);
    diagnostics.extend(parser.into_diagnostics());

    for diag in &diagnostics {
        if cli.no_warnings && diag.severity == Severity::Warning {
            continue;
        }
        eprintln!("{}", render_diagnostic(diag, cli.color));
        if let Some(snippet) = underline(&source, diag) {
            eprintln!("{}", snippet);
        }
    }

    if !cli.quiet {
        print!("{}", rendering);
    }

    let failed = diagnostics.iter().any(Diagnostic::is_error);
    info!(
        file = %file_name,
        statements = statements.len(),
        diagnostics = diagnostics.len(),
        failed,
        "done"
    );

    Ok(if failed {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    })
}

/// Read the input file as UTF-8, dropping a leading byte order mark.
fn read_source(cli: &Cli) -> Result<String, Box<dyn Error>> {
    let bytes = fs::read(&cli.input)
        .map_err(|e| format!("cannot read '{}': {}", cli.input.display(), e))?;
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes);
    let source = String::from_utf8(bytes.to_vec())
        .map_err(|e| format!("'{}' is not valid UTF-8: {}", cli.input.display(), e))?;
    Ok(source)
}

fn render_diagnostic(diag: &Diagnostic, color: bool) -> String {
    let text = diag.to_string();
    if !color {
        return text;
    }
    match diag.severity {
        Severity::Error => text.red().bold().to_string(),
        Severity::Warning => text.yellow().to_string(),
        Severity::Internal => text.magenta().bold().to_string(),
    }
}

/// The offending source line with `^` under the diagnostic's span. `None`
/// for diagnostics at end of file.
fn underline(source: &str, diag: &Diagnostic) -> Option<String> {
    if diag.lexeme.is_empty() {
        return None;
    }
    let line = source.lines().nth(diag.location.line.checked_sub(1)?)?;
    let start = diag.location.column.saturating_sub(1);
    let width = (diag.end_column + 1).saturating_sub(diag.location.column).max(1);

    // Tabs stay tabs so the carets line up.
    let pad: String = line
        .chars()
        .take(start)
        .map(|c| if c == '\t' { '\t' } else { ' ' })
        .collect();
    Some(format!("  | {}\n  | {}{}", line, pad, "^".repeat(width)))
}

fn directive_for_verbosity(v: u8) -> &'static str {
    match v {
        0 => "basl=warn",
        1 => "basl=info",
        2 => "basl=debug",
        _ => "basl=trace",
    }
}
