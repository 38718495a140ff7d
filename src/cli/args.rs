//! Resumable tokenizer for the line being dispatched.

use heapless::Vec;

use super::error::Error;

/// Maximum number of argument slots [`Args::slots`] fills.
pub const MAX_ARGS: usize = 8;

/// Whitespace-separated words of a command line, pulled on demand.
///
/// The dispatcher takes the first word as the command name and hands the
/// same `Args` to the handler, which continues from where dispatch stopped.
/// A handler can therefore parse subcommands word by word, or look up
/// another command by name and pass the remaining words along.
///
/// ```rust
/// use libcli::cli::Args;
///
/// let mut args = Args::new("power  laser 1");
/// assert_eq!(args.next(), Some("power"));
/// assert_eq!(args.remainder(), "laser 1");
/// assert_eq!(args.next(), Some("laser"));
/// assert_eq!(args.next(), Some("1"));
/// assert_eq!(args.next(), None);
/// ```
#[derive(Debug, Clone)]
pub struct Args<'l> {
    rest: &'l str,
}

impl<'l> Args<'l> {
    /// Tokenize `line`.
    pub fn new(line: &'l str) -> Self {
        Self { rest: line }
    }

    /// The not yet consumed part of the line, without leading whitespace.
    pub fn remainder(&self) -> &'l str {
        self.rest.trim_start_matches(is_separator)
    }

    /// Look at the next word without consuming it.
    pub fn peek(&self) -> Option<&'l str> {
        self.clone().next()
    }

    /// Collect every remaining word into argument slots.
    ///
    /// Fails with [`Error::TooManyArgs`] if more than [`MAX_ARGS`] words are
    /// left; the words are consumed either way.
    pub fn slots(&mut self) -> Result<Vec<&'l str, MAX_ARGS>, Error> {
        let mut slots = Vec::new();
        let mut overflow = false;
        for word in self.by_ref() {
            if slots.push(word).is_err() {
                overflow = true;
            }
        }

        if overflow {
            Err(Error::TooManyArgs)
        } else {
            Ok(slots)
        }
    }
}

impl<'l> Iterator for Args<'l> {
    type Item = &'l str;

    fn next(&mut self) -> Option<&'l str> {
        let rest = self.remainder();
        if rest.is_empty() {
            self.rest = rest;
            return None;
        }

        let end = rest.find(is_separator).unwrap_or(rest.len());
        let (word, rest) = rest.split_at(end);
        self.rest = rest;
        Some(word)
    }
}

fn is_separator(c: char) -> bool {
    c.is_ascii_whitespace()
}
