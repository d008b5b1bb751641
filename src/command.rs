use crate::station::Station;
use anyhow::Result;
use std::io::Write;

/// Conventional exit code type used by console commands.
///
/// A value of 0 indicates success; any non-zero value indicates failure.
pub type ExitCode = i32;

/// Object-safe trait for any command the console can execute.
///
/// Built-ins implement it through a blanket impl over [`crate::builtin`] commands.
pub trait ExecutableCommand {
    /// Executes the command against the station, writing user-facing text to `stdout`.
    fn execute(self: Box<Self>, stdout: &mut dyn Write, station: &mut Station) -> Result<ExitCode>;
}

/// Factory that tries to create a command from a name and its arguments.
///
/// Returns `None` when the factory doesn't recognize the `name`.
pub trait CommandFactory {
    /// Attempt to create a command instance for the provided name and arguments.
    fn try_create(&self, name: &str, args: &[&str]) -> Option<Box<dyn ExecutableCommand>>;
}
