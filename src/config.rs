use anyhow::{Context, Result, bail};
use argh::FromArgs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_NAME: &str = "Printer";
pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(FromArgs, Debug, Default)]
/// Drive a printer paper tray from the terminal.
///
/// Without a command or script, an interactive console is started.
pub struct Args {
    #[argh(option)]
    /// printer name. Falls back to $PRINTER_NAME, then "Printer".
    pub name: Option<String>,

    #[argh(option)]
    /// sheets loaded at start-up. Falls back to $PRINTER_SHEETS, then 0.
    pub sheets: Option<u32>,

    #[argh(option)]
    /// log filter directive, e.g. "debug". Falls back to $RUST_LOG, then "warn".
    pub log: Option<String>,

    #[argh(option)]
    /// run console commands from this file, one per line.
    pub script: Option<PathBuf>,

    #[argh(positional, greedy)]
    /// a single console command to run, e.g. `print-job Essay.docx 3`.
    pub command: Vec<String>,
}

/// What the binary should do once the printer is set up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Repl,
    Script(PathBuf),
    Command(Vec<String>),
}

/// Start-up settings resolved from flags, then environment, then defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub name: String,
    pub sheets: u32,
    pub log_filter: String,
    pub mode: Mode,
}

impl Settings {
    /// Resolve settings from the process environment.
    pub fn from_env(args: Args) -> Result<Self> {
        Self::resolve(args, |key| std::env::var(key).ok())
    }

    /// Resolve settings, looking up environment variables through `get_var`.
    pub fn resolve(args: Args, get_var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let name = args
            .name
            .or_else(|| get_var("PRINTER_NAME"))
            .unwrap_or_else(|| DEFAULT_NAME.to_string());

        let sheets = match args.sheets {
            Some(n) => n,
            None => match get_var("PRINTER_SHEETS") {
                Some(raw) => raw
                    .trim()
                    .parse::<u32>()
                    .with_context(|| format!("PRINTER_SHEETS must be a non-negative integer, got `{raw}`"))?,
                None => 0,
            },
        };

        let log_filter = args
            .log
            .or_else(|| get_var("RUST_LOG"))
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        let mode = match (args.script, args.command.is_empty()) {
            (Some(_), false) => bail!("--script can't be combined with a command"),
            (Some(path), true) => Mode::Script(path),
            (None, false) => Mode::Command(args.command),
            (None, true) => Mode::Repl,
        };

        Ok(Self {
            name,
            sheets,
            log_filter,
            mode,
        })
    }

    /// Parse the configured log filter.
    pub fn env_filter(&self) -> Result<EnvFilter> {
        EnvFilter::try_new(&self.log_filter)
            .with_context(|| format!("invalid log filter `{}`", self.log_filter))
    }
}
