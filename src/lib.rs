//! A printer with a read-only name and a paper tray that only changes through
//! its own operations.
//!
//! The core type is [`Printer`]: its `name` and `sheet_count` can be read but never
//! assigned from outside. Sheets are loaded with [`Printer::add_sheets`] and consumed
//! by [`Printer::print_job`], which writes one line per page and refuses jobs larger
//! than the tray without touching the sheet count.
//!
//! On top of that sits a small console, [`Session`], which drives a printer through
//! shell-like commands (`add-sheets 5`, `print-job "Essay.docx" 3`, ...). The public
//! modules [`command`] and [`config`] expose the traits for adding your own commands
//! and the start-up settings used by the `printer` binary.

mod builtin;
pub mod command;
pub mod config;
mod error;
mod lexer;
mod printer;
mod session;
mod station;

pub use error::{JOB_FAILED_MESSAGE, PrintError};
pub use lexer::LexingError;
pub use printer::{Printer, Property};
pub use session::Session;
pub use station::Station;
