//! Purpose: `tradelens` CLI entry point and command dispatch.
//! Role: Binary crate root; parses args, runs commands, emits JSON on stdout.
//! Invariants: Commands emit stable stdout formats (pretty on a TTY, compact otherwise).
//! Invariants: Non-interactive errors are emitted as JSON on stderr.
//! Invariants: Process exit code is derived from `core::error::to_exit_code`.
use std::error::Error as StdError;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

use clap::{
    CommandFactory, Parser, Subcommand, ValueEnum, ValueHint, error::ErrorKind as ClapErrorKind,
};
use clap_complete::aot::Shell;
use serde_json::{Map, Value, json};

mod color_json;
mod command_dispatch;

use color_json::colorize_json;
use tradelens::core::codec::{encode_document, parse_document, read_document};
use tradelens::core::error::{Error, ErrorKind, to_exit_code};
use tradelens::core::export::{DEFAULT_PLANET, TradeExport};

#[derive(Copy, Clone, Debug)]
struct RunOutcome {
    exit_code: i32,
}

impl RunOutcome {
    fn ok() -> Self {
        Self { exit_code: 0 }
    }

    fn with_code(exit_code: i32) -> Self {
        Self { exit_code }
    }
}

fn main() {
    let exit_code = match run() {
        Ok(outcome) => outcome.exit_code,
        Err((err, color_mode)) => {
            emit_error(&err, color_mode);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<RunOutcome, (Error, ColorMode)> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp
            | ClapErrorKind::DisplayVersion
            | ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                err.print().map_err(|io_err| {
                    (
                        Error::new(ErrorKind::Io)
                            .with_message("failed to write help")
                            .with_source(io_err),
                        ColorMode::Auto,
                    )
                })?;
                let exit_code = if matches!(
                    err.kind(),
                    ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) {
                    2
                } else {
                    0
                };
                return Ok(RunOutcome::with_code(exit_code));
            }
            _ => {
                let message = err
                    .to_string()
                    .lines()
                    .next()
                    .unwrap_or("invalid arguments")
                    .trim_start_matches("error: ")
                    .to_string();
                return Err((
                    Error::new(ErrorKind::Usage)
                        .with_message(message)
                        .with_hint("Run `tradelens --help` for usage."),
                    ColorMode::Auto,
                ));
            }
        },
    };

    let color_mode = cli.color;
    command_dispatch::dispatch_command(cli.command, color_mode).map_err(|err| (err, color_mode))
}

#[derive(Parser)]
#[command(
    name = "tradelens",
    version,
    about = "Inspect encoded trade exports from Factorio script-output",
    after_help = r#"EXAMPLES
  $ tradelens show script-output/all-trades-encoded-json.txt
  $ tradelens values export.txt --planet gleba
  $ tradelens trades export.txt
  $ tradelens planets export.txt
  $ tradelens dump export.txt
  $ tradelens encode document.json > export.txt

The export file is base64 text; decoding it yields a zlib stream whose
inflated bytes are one JSON document with "item_values" and "trades"."#,
    arg_required_else_help = true
)]
struct Cli {
    #[arg(
        long,
        default_value = "auto",
        value_enum,
        global = true,
        help = "Colorize stderr diagnostics and pretty JSON output: auto|always|never"
    )]
    color: ColorMode,

    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn use_color(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    #[command(
        about = "Print item values, then trades, for one planet",
        after_help = r#"EXAMPLES
  $ tradelens show export.txt
  $ tradelens show export.txt --planet fulgora

NOTES
  - Output is two JSON values: the planet's item-value map, then its trades"#
    )]
    Show {
        #[arg(help = "Path to the encoded export file", value_hint = ValueHint::FilePath)]
        file: PathBuf,
        #[arg(long, default_value = DEFAULT_PLANET, help = "Planet identifier to inspect")]
        planet: String,
    },
    #[command(about = "Print the item-value map for one planet")]
    Values {
        #[arg(help = "Path to the encoded export file", value_hint = ValueHint::FilePath)]
        file: PathBuf,
        #[arg(long, default_value = DEFAULT_PLANET, help = "Planet identifier to inspect")]
        planet: String,
    },
    #[command(about = "Print the discovered trades for one planet")]
    Trades {
        #[arg(help = "Path to the encoded export file", value_hint = ValueHint::FilePath)]
        file: PathBuf,
        #[arg(long, default_value = DEFAULT_PLANET, help = "Planet identifier to inspect")]
        planet: String,
    },
    #[command(about = "List planet identifiers present in an export")]
    Planets {
        #[arg(help = "Path to the encoded export file", value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },
    #[command(about = "Print the entire decoded document")]
    Dump {
        #[arg(help = "Path to the encoded export file", value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },
    #[command(
        about = "Encode a JSON document into the export wire format",
        after_help = r#"EXAMPLES
  $ tradelens encode document.json > export.txt
  $ echo '{"item_values":{"nauvis":{}},"trades":{"nauvis":[]}}' | tradelens encode -"#
    )]
    Encode {
        #[arg(
            default_value = "-",
            help = "Path to a JSON document (use - for stdin)",
            value_hint = ValueHint::FilePath
        )]
        file: String,
    },
    #[command(about = "Generate shell completions")]
    Completion {
        #[arg(value_enum, help = "Shell to generate completions for")]
        shell: Shell,
    },
}

fn load_export(path: &Path) -> Result<TradeExport, Error> {
    let document = read_document(path)?;
    TradeExport::from_value(document).map_err(|err| err.with_path(path))
}

fn read_json_input(file: &str) -> Result<Value, Error> {
    if file == "-" {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text).map_err(|err| {
            Error::new(ErrorKind::Io)
                .with_message("cannot read stdin")
                .with_source(err)
        })?;
        return parse_document(text.as_bytes());
    }
    let bytes = std::fs::read(file).map_err(|err| {
        let kind = if err.kind() == std::io::ErrorKind::NotFound {
            ErrorKind::NotFound
        } else {
            ErrorKind::Io
        };
        Error::new(kind)
            .with_message("cannot read input file")
            .with_path(file)
            .with_source(err)
    })?;
    parse_document(&bytes).map_err(|err| err.with_path(file))
}

fn emit_json(value: Value, color_mode: ColorMode) {
    let is_tty = io::stdout().is_terminal();
    let use_color = color_mode.use_color(is_tty);
    let pretty = is_tty || use_color;
    let json = if pretty {
        if use_color {
            colorize_json(&value, true)
        } else {
            serde_json::to_string_pretty(&value)
                .unwrap_or_else(|_| "{\"error\":\"json encode failed\"}".to_string())
        }
    } else {
        serde_json::to_string(&value)
            .unwrap_or_else(|_| "{\"error\":\"json encode failed\"}".to_string())
    };
    println!("{json}");
}

#[derive(Copy, Clone, Debug)]
enum AnsiColor {
    Red,
    Yellow,
}

fn colorize_label(label: &str, enabled: bool, color: AnsiColor) -> String {
    if !enabled {
        return label.to_string();
    }
    let code = match color {
        AnsiColor::Red => "31",
        AnsiColor::Yellow => "33",
    };
    format!("\u{1b}[{code}m{label}\u{1b}[0m")
}

fn emit_error(err: &Error, color_mode: ColorMode) {
    let is_tty = io::stderr().is_terminal();
    if is_tty {
        eprintln!("{}", error_text(err, color_mode.use_color(is_tty)));
        return;
    }

    let value = error_json(err);
    let json = serde_json::to_string(&value).unwrap_or_else(|_| {
        "{\"error\":{\"kind\":\"Internal\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn error_message(err: &Error) -> String {
    if let Some(message) = err.message() {
        return message.to_string();
    }
    match err.kind() {
        ErrorKind::Internal => "internal error".to_string(),
        ErrorKind::Usage => "usage error".to_string(),
        ErrorKind::NotFound => "not found".to_string(),
        ErrorKind::Io => "i/o error".to_string(),
        ErrorKind::Encoding => "base64 decoding failed".to_string(),
        ErrorKind::Compression => "zlib inflation failed".to_string(),
        ErrorKind::Parse => "JSON parsing failed".to_string(),
        ErrorKind::Schema => "unexpected document shape".to_string(),
    }
}

fn error_causes(err: &Error) -> Vec<String> {
    let mut causes = Vec::new();
    let mut cur = err.source();
    while let Some(source) = cur {
        causes.push(source.to_string());
        cur = source.source();
    }
    causes
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    inner.insert("message".to_string(), json!(error_message(err)));
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }
    if let Some(path) = err.path() {
        inner.insert("path".to_string(), json!(path.display().to_string()));
    }
    let causes = error_causes(err);
    if !causes.is_empty() {
        inner.insert("causes".to_string(), json!(causes));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
}

fn error_text(err: &Error, use_color: bool) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "{} {}",
        colorize_label("error:", use_color, AnsiColor::Red),
        error_message(err)
    ));

    if let Some(hint) = err.hint() {
        lines.push(format!(
            "{} {hint}",
            colorize_label("hint:", use_color, AnsiColor::Yellow)
        ));
    }
    if let Some(path) = err.path() {
        lines.push(format!(
            "{} {}",
            colorize_label("path:", use_color, AnsiColor::Yellow),
            path.display()
        ));
    }
    for cause in error_causes(err) {
        lines.push(format!(
            "{} {cause}",
            colorize_label("cause:", use_color, AnsiColor::Yellow)
        ));
    }
    lines.join("\n")
}
