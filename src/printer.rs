use crate::error::PrintError;
use std::fmt;
use std::io::Write;
use std::str::FromStr;
use tracing::{debug, warn};

/// A printer with a fixed name and a tray of loaded sheets.
///
/// Both properties are readable through accessors and cannot be assigned from
/// outside the type. The sheet count changes only through
/// [`Printer::add_sheets`] and [`Printer::print_job`].
///
/// Example
/// ```
/// use printer_tray::Printer;
/// let mut printer = Printer::with_sheets("Canon Wifi", 5);
/// let mut out = Vec::new();
/// printer.print_job("Essay.docx", 3, &mut out).unwrap();
/// assert_eq!(printer.sheet_count(), 2);
/// assert_eq!(
///     String::from_utf8(out).unwrap(),
///     "Printing Essay.docx page 1 of 3\n\
///      Printing Essay.docx page 2 of 3\n\
///      Printing Essay.docx page 3 of 3\n"
/// );
/// ```
///
/// Assigning a property directly does not compile:
/// ```compile_fail
/// let mut printer = printer_tray::Printer::new("Canon Wifi");
/// printer.sheet_count = 100;
/// ```
/// ```compile_fail
/// let mut printer = printer_tray::Printer::new("Canon Wifi");
/// printer.name = String::from("HP");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Printer {
    name: String,
    sheet_count: u32,
}

impl Printer {
    /// Create a printer with an empty tray.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_sheets(name, 0)
    }

    /// Create a printer with `sheet_count` sheets already loaded.
    pub fn with_sheets(name: impl Into<String>, sheet_count: u32) -> Self {
        let name = name.into();
        debug!(%name, sheet_count, "printer created");
        Self { name, sheet_count }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sheet_count(&self) -> u32 {
        self.sheet_count
    }

    /// Load `num_sheets` more sheets into the tray.
    ///
    /// Fails with [`PrintError::TrayOverflow`] if the counter would overflow; the
    /// tray is left untouched in that case.
    pub fn add_sheets(&mut self, num_sheets: u32) -> Result<(), PrintError> {
        let total = self
            .sheet_count
            .checked_add(num_sheets)
            .ok_or(PrintError::TrayOverflow {
                loaded: self.sheet_count,
                requested: num_sheets,
            })?;
        debug!(printer = %self.name, added = num_sheets, total, "sheets added");
        self.sheet_count = total;
        Ok(())
    }

    /// Print `page_count` pages of `job_name`, one line per page, to `out`.
    ///
    /// Sheets are consumed only after every page line has been written. If the
    /// tray holds fewer than `page_count` sheets nothing is written and
    /// [`PrintError::JobFailed`] is returned.
    pub fn print_job(
        &mut self,
        job_name: &str,
        page_count: u32,
        out: &mut dyn Write,
    ) -> Result<(), PrintError> {
        if page_count > self.sheet_count {
            warn!(
                printer = %self.name,
                job = job_name,
                page_count,
                sheet_count = self.sheet_count,
                "not enough paper for job"
            );
            return Err(PrintError::JobFailed);
        }

        for page in 1..=page_count {
            writeln!(out, "Printing {job_name} page {page} of {page_count}")?;
        }
        out.flush()?;

        self.sheet_count -= page_count;
        debug!(
            printer = %self.name,
            job = job_name,
            page_count,
            remaining = self.sheet_count,
            "job printed"
        );
        Ok(())
    }

    /// Attempt an external write to `property`.
    ///
    /// Both properties are read-only, so this always fails with
    /// [`PrintError::ReadOnly`] and the printer is unchanged.
    pub fn set(&mut self, property: Property, value: &str) -> Result<(), PrintError> {
        warn!(
            printer = %self.name,
            property = property.as_str(),
            value,
            "rejected write to read-only property"
        );
        Err(PrintError::ReadOnly {
            property: property.as_str(),
        })
    }
}

/// Publicly visible properties of a [`Printer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Property {
    Name,
    SheetCount,
}

impl Property {
    pub fn as_str(self) -> &'static str {
        match self {
            Property::Name => "name",
            Property::SheetCount => "sheetCount",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Property {
    type Err = PrintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Property::Name),
            "sheetCount" | "sheet_count" | "sheets" => Ok(Property::SheetCount),
            other => Err(PrintError::UnknownProperty(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::JOB_FAILED_MESSAGE;
    use std::io;

    /// Writer that accepts `lines_left` complete lines and then fails.
    struct FailingWriter {
        lines_left: usize,
        written: Vec<u8>,
    }

    impl Write for FailingWriter {
        fn write(&mut self, data: &[u8]) -> io::Result<usize> {
            if self.lines_left == 0 {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "tray jammed"));
            }
            self.written.extend_from_slice(data);
            let newlines = data.iter().filter(|&&b| b == b'\n').count();
            self.lines_left = self.lines_left.saturating_sub(newlines);
            Ok(data.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_new_defaults_to_empty_tray() {
        let printer = Printer::new("Canon Wifi");
        assert_eq!(printer.name(), "Canon Wifi");
        assert_eq!(printer.sheet_count(), 0);
    }

    #[test]
    fn test_with_sheets_keeps_supplied_count() {
        let printer = Printer::with_sheets("Canon Wifi", 12);
        assert_eq!(printer.sheet_count(), 12);
    }

    #[test]
    fn test_add_sheets_increments_count() {
        let mut printer = Printer::with_sheets("Canon Wifi", 3);
        printer.add_sheets(7).unwrap();
        assert_eq!(printer.sheet_count(), 10);

        printer.add_sheets(0).unwrap();
        assert_eq!(printer.sheet_count(), 10);
    }

    #[test]
    fn test_add_sheets_overflow_leaves_tray_untouched() {
        let mut printer = Printer::with_sheets("Canon Wifi", u32::MAX - 1);
        let err = printer.add_sheets(2).unwrap_err();

        assert!(matches!(
            err,
            PrintError::TrayOverflow {
                loaded,
                requested: 2
            } if loaded == u32::MAX - 1
        ));
        assert_eq!(printer.sheet_count(), u32::MAX - 1);
    }

    #[test]
    fn test_print_job_writes_pages_in_order() {
        let mut printer = Printer::with_sheets("Canon Wifi", 5);
        let mut out = Vec::new();

        printer.print_job("Essay.docx", 3, &mut out).unwrap();

        let s = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = s.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Printing Essay.docx page 1 of 3",
                "Printing Essay.docx page 2 of 3",
                "Printing Essay.docx page 3 of 3",
            ]
        );
        assert_eq!(printer.sheet_count(), 2);
    }

    #[test]
    fn test_print_job_can_use_every_sheet() {
        let mut printer = Printer::with_sheets("Canon Wifi", 2);
        let mut out = Vec::new();

        printer.print_job("cover.pdf", 2, &mut out).unwrap();

        assert_eq!(printer.sheet_count(), 0);
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 2);
    }

    #[test]
    fn test_print_job_without_paper_fails_and_keeps_count() {
        let mut printer = Printer::with_sheets("Canon Wifi", 4);
        let mut out = Vec::new();

        let err = printer
            .print_job("Court Proceedings.pdf", 10, &mut out)
            .unwrap_err();

        assert!(matches!(err, PrintError::JobFailed));
        assert_eq!(err.to_string(), JOB_FAILED_MESSAGE);
        assert_eq!(printer.sheet_count(), 4);
        assert!(out.is_empty());
    }

    #[test]
    fn test_print_job_zero_pages_is_noop() {
        let mut printer = Printer::new("Canon Wifi");
        let mut out = Vec::new();

        printer.print_job("blank", 0, &mut out).unwrap();

        assert!(out.is_empty());
        assert_eq!(printer.sheet_count(), 0);
    }

    #[test]
    fn test_print_job_output_failure_keeps_count() {
        let mut printer = Printer::with_sheets("Canon Wifi", 5);
        let mut out = FailingWriter {
            lines_left: 1,
            written: Vec::new(),
        };

        let err = printer.print_job("Essay.docx", 3, &mut out).unwrap_err();

        assert!(matches!(err, PrintError::Output(_)));
        assert_eq!(printer.sheet_count(), 5);
        assert_eq!(out.written, b"Printing Essay.docx page 1 of 3\n");
    }

    #[test]
    fn test_set_is_rejected_for_both_properties() {
        let mut printer = Printer::with_sheets("Canon Wifi", 5);

        let err = printer.set(Property::SheetCount, "100").unwrap_err();
        assert!(matches!(err, PrintError::ReadOnly { property: "sheetCount" }));

        let err = printer.set(Property::Name, "HP").unwrap_err();
        assert!(matches!(err, PrintError::ReadOnly { property: "name" }));

        assert_eq!(printer.name(), "Canon Wifi");
        assert_eq!(printer.sheet_count(), 5);
    }

    #[test]
    fn test_property_parsing() {
        assert_eq!("name".parse::<Property>().unwrap(), Property::Name);
        assert_eq!("sheetCount".parse::<Property>().unwrap(), Property::SheetCount);
        assert_eq!("sheets".parse::<Property>().unwrap(), Property::SheetCount);

        let err = "color".parse::<Property>().unwrap_err();
        assert!(matches!(err, PrintError::UnknownProperty(ref p) if p == "color"));
    }
}
