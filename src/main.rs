//! Command line entry point: check, query and export the locale table.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{
    Parser,
    Subcommand,
    ValueEnum,
};
use spectra_locale::config::LocaleSettings;
use spectra_locale::{
    LoadError,
    LocaleTable,
    LookupError,
    export,
    load_workspace,
};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (e.g. `debug`).
const LOG_ENV: &str = "SPECTRA_LOCALE_LOG";

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(name = "spectra-locale")]
#[command(version)]
#[command(about = "Check, query and export the Spectra Film Loops storefront strings")]
struct Cli {
    /// Workspace root holding `.spectra-locale.json` and translation files
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    workspace: PathBuf,

    /// Action to run
    #[command(subcommand)]
    command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Validate the table and summarize each locale
    Check,

    /// Print the display string for a locale and message key
    Get {
        /// Locale code, e.g. `fr`
        #[arg(value_name = "LOCALE")]
        locale: String,

        /// Message key, e.g. `add_to_cart`
        #[arg(value_name = "KEY")]
        key: String,
    },

    /// List locales, or the message keys of one locale
    Keys {
        /// Locale whose keys to list
        #[arg(value_name = "LOCALE")]
        locale: Option<String>,
    },

    /// Render the table for the storefront page
    Export {
        /// Output format
        #[arg(short, long, value_enum, default_value = "js")]
        format: ExportFormat,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Export output format.
#[derive(ValueEnum, Clone, Copy, Debug)]
enum ExportFormat {
    /// `window.<globalName> = {...};`
    Js,
    /// Plain JSON object
    Json,
}

/// Failures reported by the binary.
#[derive(Error, Debug)]
enum CliError {
    /// Settings or table could not be loaded
    #[error(transparent)]
    Load(#[from] LoadError),

    /// `get`/`keys` named an unknown locale or key
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// Export serialization failed
    #[error("Failed to serialize table: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Writing output failed
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

fn main() -> ExitCode {
    let (writer, _guard) = tracing_appender::non_blocking(std::io::stderr());
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(writer)
        .init();

    let cli = Cli::parse();
    tracing::debug!(?cli, "Starting");

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

/// Execute one command against the workspace table.
fn run(cli: &Cli) -> Result<(), CliError> {
    let (settings, table) = load_workspace(&cli.workspace)?;
    let mut out = std::io::stdout().lock();

    match &cli.command {
        Command::Check => check(&mut out, &table)?,
        Command::Get { locale, key } => writeln!(out, "{}", table.get(locale, key)?)?,
        Command::Keys { locale: None } => {
            for locale in table.locales() {
                writeln!(out, "{locale}")?;
            }
        }
        Command::Keys { locale: Some(locale) } => {
            for key in table.keys(locale)? {
                writeln!(out, "{key}")?;
            }
        }
        Command::Export { format, output } => {
            let rendered = render(&table, &settings, *format)?;
            if let Some(path) = output {
                std::fs::write(path, rendered)?;
                tracing::info!(path = %path.display(), "Wrote export");
            } else {
                out.write_all(rendered.as_bytes())?;
            }
        }
    }

    Ok(())
}

/// One summary line per locale.
fn check(out: &mut impl Write, table: &LocaleTable) -> std::io::Result<()> {
    for (locale, messages) in table.iter() {
        writeln!(out, "{locale}: {} messages", messages.len())?;
    }
    writeln!(out, "ok: {} locales with identical key sets", table.len())
}

/// Serialize the table in the requested format.
fn render(
    table: &LocaleTable,
    settings: &LocaleSettings,
    format: ExportFormat,
) -> Result<String, serde_json::Error> {
    match format {
        ExportFormat::Js => export::to_script(table, &settings.export.global_name),
        ExportFormat::Json => export::to_json(table).map(|json| json + "\n"),
    }
}
