use crate::command::{CommandFactory, ExecutableCommand, ExitCode};
use crate::printer::Property;
use crate::session::Factory;
use crate::station::Station;
use anyhow::Result;
use argh::{EarlyExit, FromArgs};
use std::io::Write;
use tracing::debug;

/// Built-in console commands known at compile time.
///
/// Builtins are parsed using the [`argh`] crate (`FromArgs`) and executed directly
/// against the [`Station`].
pub(crate) trait BuiltinCommand: Sized + FromArgs {
    /// Canonical name of the command, e.g. "print-job".
    fn name() -> &'static str;

    /// Executes the command using the provided output stream and station.
    ///
    /// Return value follows shell conventions: 0 for success, non-zero for error.
    fn execute(self, stdout: &mut dyn Write, station: &mut Station) -> Result<ExitCode>;
}

impl<T: BuiltinCommand> ExecutableCommand for T {
    fn execute(self: Box<Self>, stdout: &mut dyn Write, station: &mut Station) -> Result<ExitCode> {
        match T::execute(*self, stdout, station) {
            Ok(x) => Ok(x),
            Err(e) => {
                debug!(command = T::name(), error = %e, "command failed");
                writeln!(stdout, "{e}")?;
                Ok(1)
            }
        }
    }
}

struct InvalidArgs {
    output: String,
    is_error: bool,
}

impl ExecutableCommand for InvalidArgs {
    fn execute(self: Box<Self>, stdout: &mut dyn Write, _station: &mut Station) -> Result<ExitCode> {
        stdout.write_all(self.output.as_bytes())?;
        if !self.output.ends_with('\n') {
            writeln!(stdout)?;
        }
        Ok(if self.is_error { 1 } else { 0 })
    }
}

impl<T: BuiltinCommand + 'static> CommandFactory for Factory<T> {
    fn try_create(&self, name: &str, args: &[&str]) -> Option<Box<dyn ExecutableCommand>> {
        if name == T::name() {
            Some(match T::from_args(&[name], args) {
                Ok(cmd) => Box::new(cmd),
                Err(EarlyExit { output, status }) => Box::new(InvalidArgs {
                    output,
                    is_error: status.is_err(),
                }),
            })
        } else {
            None
        }
    }
}

#[derive(FromArgs)]
/// Print the printer name.
pub struct Name {}

impl BuiltinCommand for Name {
    fn name() -> &'static str {
        "name"
    }

    fn execute(self, stdout: &mut dyn Write, station: &mut Station) -> Result<ExitCode> {
        writeln!(stdout, "{}", station.printer.name())?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Print the number of sheets loaded in the tray.
pub struct Sheets {}

impl BuiltinCommand for Sheets {
    fn name() -> &'static str {
        "sheets"
    }

    fn execute(self, stdout: &mut dyn Write, station: &mut Station) -> Result<ExitCode> {
        writeln!(stdout, "{}", station.printer.sheet_count())?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Load more sheets into the paper tray.
pub struct AddSheets {
    #[argh(positional)]
    /// number of sheets to load.
    pub count: u32,
}

impl BuiltinCommand for AddSheets {
    fn name() -> &'static str {
        "add-sheets"
    }

    fn execute(self, _stdout: &mut dyn Write, station: &mut Station) -> Result<ExitCode> {
        station.printer.add_sheets(self.count)?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Print a job, one line per page, consuming one sheet per page.
pub struct PrintJob {
    #[argh(positional)]
    /// name of the document to print; quote it if it contains spaces.
    pub job_name: String,

    #[argh(positional)]
    /// number of pages in the job.
    pub pages: u32,
}

impl BuiltinCommand for PrintJob {
    fn name() -> &'static str {
        "print-job"
    }

    fn execute(self, stdout: &mut dyn Write, station: &mut Station) -> Result<ExitCode> {
        station.printer.print_job(&self.job_name, self.pages, stdout)?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Try to assign a printer property. Both properties are read-only, so this always fails.
pub struct Set {
    #[argh(positional)]
    /// property to assign: name or sheetCount.
    pub property: String,

    #[argh(positional)]
    /// value to assign.
    pub value: String,
}

impl BuiltinCommand for Set {
    fn name() -> &'static str {
        "set"
    }

    fn execute(self, _stdout: &mut dyn Write, station: &mut Station) -> Result<ExitCode> {
        let property: Property = self.property.parse()?;
        station.printer.set(property, &self.value)?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Leave the interactive console.
pub struct Exit {}

impl BuiltinCommand for Exit {
    fn name() -> &'static str {
        "exit"
    }

    fn execute(self, _stdout: &mut dyn Write, station: &mut Station) -> Result<ExitCode> {
        station.should_exit = true;
        Ok(0)
    }
}
