use crate::command::{CommandFactory, ExitCode};
use crate::lexer;
use crate::printer::Printer;
use crate::station::Station;
use anyhow::Context;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result};
use std::io::Write;
use tracing::{debug, info};

/// Factory allows creating instances of ExecutableCommand.
///
/// Only supports the builtin commands defined in this crate.
pub(crate) struct Factory<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Default for Factory<T> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

/// A console that drives one [`Printer`] through shell-like commands.
///
/// The session owns a [`Station`] and a list of [`CommandFactory`] objects that are
/// queried to create commands by name. See [`Session::with_printer`] for the
/// commands included out of the box.
///
/// Example
/// ```
/// use printer_tray::{Printer, Session};
/// let mut session = Session::with_printer(Printer::with_sheets("Canon Wifi", 5));
/// let mut out = Vec::new();
/// let code = session.run_line("print-job Essay.docx 3", &mut out).unwrap();
/// assert_eq!(code, 0);
/// assert_eq!(session.printer().sheet_count(), 2);
/// ```
pub struct Session {
    station: Station,
    commands: Vec<Box<dyn CommandFactory>>,
}

impl Session {
    /// Create a session with a custom set of command factories.
    pub fn new(printer: Printer, commands: Vec<Box<dyn CommandFactory>>) -> Self {
        Self {
            station: Station::new(printer),
            commands,
        }
    }

    /// Create a session with the default commands:
    /// `name`, `sheets`, `add-sheets`, `print-job`, `set`, `exit`.
    pub fn with_printer(printer: Printer) -> Self {
        use crate::builtin::*;
        Self::new(
            printer,
            vec![
                Box::new(Factory::<Name>::default()),
                Box::new(Factory::<Sheets>::default()),
                Box::new(Factory::<AddSheets>::default()),
                Box::new(Factory::<PrintJob>::default()),
                Box::new(Factory::<Set>::default()),
                Box::new(Factory::<Exit>::default()),
            ],
        )
    }

    pub fn printer(&self) -> &Printer {
        &self.station.printer
    }

    /// Whether an `exit` command has been executed.
    pub fn should_exit(&self) -> bool {
        self.station.should_exit
    }

    /// Run a single command invocation by name with arguments.
    ///
    /// Command failures (such as a job without enough paper) are written to
    /// `stdout` and reported through the exit code. An error is returned only when
    /// the command is unknown or the output cannot be written.
    pub fn run(
        &mut self,
        name: &str,
        args: &[&str],
        stdout: &mut dyn Write,
    ) -> anyhow::Result<ExitCode> {
        for factory in &self.commands {
            if let Some(cmd) = factory.try_create(name, args) {
                let code = cmd.execute(stdout, &mut self.station)?;
                debug!(command = name, code, "command finished");
                return Ok(code);
            }
        }
        Err(anyhow::anyhow!("command not found: {}", name))
    }

    /// Split `line` into words and run it as a command. Blank lines succeed with 0.
    pub fn run_line(&mut self, line: &str, stdout: &mut dyn Write) -> anyhow::Result<ExitCode> {
        let words = lexer::split_into_words(line).with_context(|| format!("can't parse `{line}`"))?;
        let Some((name, args)) = words.split_first() else {
            return Ok(0);
        };
        let args_ref: Vec<&str> = args.iter().map(|s| s.as_str()).collect();
        self.run(name, &args_ref, stdout)
    }

    /// Run every line of `script` in order and return the last exit code.
    ///
    /// Blank lines and lines starting with `#` are skipped. Execution stops after
    /// an `exit` command or at the first line that can't be run.
    pub fn run_script(&mut self, script: &str, stdout: &mut dyn Write) -> anyhow::Result<ExitCode> {
        let mut last_exit = 0;
        for (idx, line) in script.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            last_exit = self
                .run_line(trimmed, stdout)
                .with_context(|| format!("line {}", idx + 1))?;
            if self.should_exit() {
                break;
            }
        }
        Ok(last_exit)
    }

    /// Interactive read-eval-print loop on the terminal.
    pub fn repl(&mut self) -> Result<()> {
        let mut rl = DefaultEditor::new()?;
        info!(printer = self.printer().name(), "console started");

        while !self.should_exit() {
            let prompt = format!("{}> ", self.printer().name());
            match rl.readline(&prompt) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        rl.add_history_entry(line.as_str())?;
                    }
                    let mut stdout = std::io::stdout();
                    if let Err(err) = self.run_line(&line, &mut stdout) {
                        println!("Error: {err:#}");
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => break,
                Err(err) => {
                    println!("Error: {:?}", err);
                    break;
                }
            }
        }

        info!(sheets = self.printer().sheet_count(), "console closed");
        Ok(())
    }
}
