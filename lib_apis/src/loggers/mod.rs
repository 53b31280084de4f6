/// Global `tracing` subscriber setup with console and rolling JSON file output.
pub mod loggersetup;

pub use loggersetup::{setup_logging, LoggerError, LoggerOptions};
