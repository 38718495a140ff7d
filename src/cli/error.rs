//! Common error types for command line operations

use crate::list;

/// Errors reported by the line editor, the registry and the tokenizer.
///
/// Errors returned from [`Session::process`](super::Session::process) have
/// already been reported on the terminal (or, for
/// [`LineOverflow`](Error::LineOverflow), deliberately not reported) and the
/// session is ready for the next byte; the value only tells the host what
/// happened.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// The line grew past the buffer capacity and was discarded.
    LineOverflow,
    /// The first word of the line names no registered command.
    CommandNotFound,
    /// The line is not valid UTF-8 and could not be tokenized.
    InvalidInput,
    /// A command with an empty name cannot be registered.
    InvalidName,
    /// The command is already linked into a registry.
    AlreadyRegistered,
    /// More arguments than [`MAX_ARGS`](super::MAX_ARGS) slots.
    TooManyArgs,
    /// The configuration could not be parsed or does not fit.
    InvalidConfig,
}

impl From<list::Error> for Error {
    fn from(err: list::Error) -> Self {
        match err {
            list::Error::AlreadyLinked => Error::AlreadyRegistered,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::LineOverflow => defmt::write!(f, "LineOverflow"),
            Error::CommandNotFound => defmt::write!(f, "CommandNotFound"),
            Error::InvalidInput => defmt::write!(f, "InvalidInput"),
            Error::InvalidName => defmt::write!(f, "InvalidName"),
            Error::AlreadyRegistered => defmt::write!(f, "AlreadyRegistered"),
            Error::TooManyArgs => defmt::write!(f, "TooManyArgs"),
            Error::InvalidConfig => defmt::write!(f, "InvalidConfig"),
        }
    }
}
