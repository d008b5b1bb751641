use thiserror::Error;

/// Message reported when a job needs more sheets than the tray holds.
pub const JOB_FAILED_MESSAGE: &str = "Job failed: please refill paper tray!";

/// Errors produced by [`crate::Printer`] operations.
#[derive(Debug, Error)]
pub enum PrintError {
    /// The job asked for more pages than there are sheets loaded.
    #[error("{}", JOB_FAILED_MESSAGE)]
    JobFailed,

    /// An external write to a read-only property was attempted.
    #[error("cannot assign to read-only property '{property}'")]
    ReadOnly { property: &'static str },

    /// The property does not exist on a printer and cannot be added.
    #[error("printer has no property '{0}'")]
    UnknownProperty(String),

    /// Adding sheets would overflow the tray counter.
    #[error("cannot add {requested} sheets to a tray holding {loaded}")]
    TrayOverflow { loaded: u32, requested: u32 },

    /// Writing a printed page to the output failed.
    #[error("failed to write printed page: {0}")]
    Output(#[from] std::io::Error),
}
