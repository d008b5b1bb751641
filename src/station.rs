use crate::printer::Printer;

/// Mutable state shared by console commands: the printer being driven and the
/// loop-control flag.
#[derive(Debug, Clone)]
pub struct Station {
    /// The printer commands operate on. Its own properties stay read-only.
    pub printer: Printer,
    /// When set to true, indicates that an interactive loop should exit.
    pub should_exit: bool,
}

impl Station {
    pub fn new(printer: Printer) -> Self {
        Self {
            printer,
            should_exit: false,
        }
    }
}
