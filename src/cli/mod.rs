//! Byte-at-a-time command line interpreter.
//!
//! This module turns a stream of single input bytes (from a UART interrupt,
//! a USB CDC endpoint, or a replayed test string) into command invocations.
//! It keeps a bounded line buffer, echoes and edits locally, and hands every
//! completed line to the handler registered under its first word.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   Host Byte     │───▶│    Session      │───▶│    Registry     │
//! │   Source        │    │  (line editor)  │    │  (intrusive     │
//! │                 │    │                 │    │   list)         │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!                                 │                       │
//!                                 ▼                       ▼
//!                        ┌─────────────────┐    ┌─────────────────┐
//!                        │   Output Sink   │◀───│    Handler      │
//!                        │  (echo, replies)│    │ (Shell + Args)  │
//!                        └─────────────────┘    └─────────────────┘
//! ```
//!
//! # Line editing
//!
//! For every byte, [`Session::process`]:
//!
//! 1. discards the whole line if the byte would not fit (see below)
//! 2. echoes the byte, whatever it is
//! 3. ignores `'\r'`, so both `"\n"` and `"\r\n"` terminate a line once
//! 4. on `'\b'` drops the last character and writes `" \b"` to wipe it
//! 5. on `'\n'` dispatches the line, clears it and writes the prompt
//! 6. stores anything else
//!
//! A session of capacity `N` holds at most `N - 1` characters. The byte that
//! would exceed that is dropped together with the line so far, and the user
//! only sees a fresh line and prompt. No message is printed.
//!
//! # Usage
//!
//! ```rust
//! use libcli::cli::{help, Args, Command, Config, Registry, Session, Shell};
//!
//! fn hello(shell: &mut Shell<'_>, _cmd: &Command, args: &mut Args<'_>) {
//!     let eol = shell.eol();
//!     let who = args.next().unwrap_or("world");
//!     shell.print(format_args!("hello, {}{}", who, eol));
//! }
//!
//! static HELP: Command = Command::new("help", "list commands", help);
//! static HELLO: Command = Command::new("hello", "say hello", hello);
//!
//! let registry: Registry = Registry::new();
//! let mut session: Session<'_, '_, heapless::Vec<u8, 256>> =
//!     Session::new(&registry, heapless::Vec::new(), Config::default());
//! session.register(&HELP).unwrap();
//! session.register(&HELLO).unwrap();
//!
//! session.input(b"hello rust\r\n").unwrap();
//! assert_eq!(session.output().as_slice(), b"> hello rust\r\nhello, rust\r\n> ");
//!
//! let _output = session.close();
//! assert!(!HELLO.is_registered());
//! ```

#![deny(unsafe_code)]

use core::any::Any;
use core::fmt;
use core::str;

use heapless::Vec;
use lock_api::RawRwLock;

use crate::list::NoLock;

/// Resumable tokenizer
pub mod args;
/// Command descriptors and registry
pub mod command;
/// Session configuration
pub mod config;
/// Common error types for command line operations
pub mod error;
/// Output sinks
pub mod output;
/// Handler context and the built-in help handler
pub mod shell;

pub use args::{Args, MAX_ARGS};
pub use command::{Command, Commands, Handler, Registry};
pub use config::{Config, LineEnding, DEFAULT_PROMPT, MAX_PROMPT_LEN};
pub use error::Error;
pub use output::{FnOutput, Output};
pub use shell::{help, Shell};

/// Line buffer capacity used when none is given.
pub const DEFAULT_CAPACITY: usize = 64;

/// ASCII backspace character (0x08).
pub const ASCII_BACKSPACE: u8 = 0x08;
/// ASCII line feed character (0x0A).
pub const ASCII_LF: u8 = 0x0A;
/// ASCII carriage return character (0x0D).
pub const ASCII_CR: u8 = 0x0D;

// Written after an echoed backspace: blank the cell, step back onto it.
const ERASE: &[u8] = b" \x08";

const INVALID_INPUT: &str = "invalid input";

/// One interactive line editor bound to a registry and an output sink.
///
/// `N` is the line buffer capacity, one byte of which is kept in reserve, so
/// a line can hold `N - 1` characters. `R` is the registry's locking
/// strategy.
///
/// The session writes its first prompt when created and is consumed by
/// [`close`](Session::close), which also unlinks every registered command.
pub struct Session<'r, 'c, O: Output, const N: usize = DEFAULT_CAPACITY, R: RawRwLock = NoLock> {
    buffer: Vec<u8, N>,
    registry: &'r Registry<'c, R>,
    out: O,
    config: Config,
    context: Option<&'r mut (dyn Any + 'static)>,
}

impl<'r, 'c, O: Output, const N: usize, R: RawRwLock> Session<'r, 'c, O, N, R> {
    /// Start a session and write the initial prompt.
    pub fn new(registry: &'r Registry<'c, R>, out: O, config: Config) -> Self {
        Self::start(registry, out, config, None)
    }

    /// Start a session carrying a user context that handlers can reach
    /// through [`Shell::context`].
    pub fn with_context(
        registry: &'r Registry<'c, R>,
        out: O,
        config: Config,
        context: &'r mut (dyn Any + 'static),
    ) -> Self {
        Self::start(registry, out, config, Some(context))
    }

    fn start(
        registry: &'r Registry<'c, R>,
        out: O,
        config: Config,
        context: Option<&'r mut (dyn Any + 'static)>,
    ) -> Self {
        let mut session = Self {
            buffer: Vec::new(),
            registry,
            out,
            config,
            context,
        };
        session.prompt();
        session
    }

    /// Register a command with this session's registry.
    pub fn register(&self, command: &'c Command) -> Result<(), Error> {
        self.registry.register(command)
    }

    /// Process one input byte.
    ///
    /// Errors have already been reported to the user (or, for
    /// [`Error::LineOverflow`], silently recovered from); the session is
    /// ready for the next byte either way.
    pub fn process(&mut self, byte: u8) -> Result<(), Error> {
        if self.buffer.len() + 1 >= N {
            return self.discard_line();
        }

        if self.config.echo {
            self.out.put_bytes(&[byte]);
        }

        match byte {
            ASCII_CR => Ok(()),
            ASCII_BACKSPACE => {
                if self.buffer.pop().is_some() && self.config.echo {
                    self.out.put_bytes(ERASE);
                }
                Ok(())
            }
            ASCII_LF => {
                let result = self.execute();
                self.reset_buffer();
                self.prompt();
                result
            }
            _ => match self.buffer.push(byte) {
                Ok(()) => Ok(()),
                Err(_) => self.discard_line(),
            },
        }
    }

    /// Process every byte of `data`.
    ///
    /// All bytes are processed even if some fail; the first error is
    /// returned.
    pub fn input(&mut self, data: &[u8]) -> Result<(), Error> {
        let mut result = Ok(());
        for &byte in data {
            let status = self.process(byte);
            if result.is_ok() {
                result = status;
            }
        }
        result
    }

    /// Close the session: unlink every command from the registry and hand
    /// back the output sink.
    pub fn close(self) -> O {
        let unlinked = self.registry.clear();
        log::debug!("session closed, {} commands unlinked", unlinked);
        self.out
    }

    /// The characters of the line being edited.
    pub fn line(&self) -> &[u8] {
        &self.buffer
    }

    /// Number of characters in the line being edited.
    pub fn cursor(&self) -> usize {
        self.buffer.len()
    }

    /// Line buffer capacity, including the reserved byte.
    pub fn capacity(&self) -> usize {
        N
    }

    /// The session configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The registry commands are dispatched to.
    pub fn registry(&self) -> &'r Registry<'c, R> {
        self.registry
    }

    /// The output sink.
    pub fn output(&self) -> &O {
        &self.out
    }

    /// The output sink, mutably (e.g. to drain a capture buffer).
    pub fn output_mut(&mut self) -> &mut O {
        &mut self.out
    }

    fn prompt(&mut self) {
        self.out.put_str(self.config.prompt());
    }

    fn discard_line(&mut self) -> Result<(), Error> {
        log::debug!("line longer than {} bytes discarded", N.saturating_sub(1));
        self.reset_buffer();
        self.out.put_str(self.config.eol());
        self.prompt();
        Err(Error::LineOverflow)
    }

    fn reset_buffer(&mut self) {
        self.buffer.clear();
    }

    fn execute(&mut self) -> Result<(), Error> {
        let Ok(line) = str::from_utf8(&self.buffer) else {
            self.out.put_str(INVALID_INPUT);
            self.out.put_str(self.config.eol());
            return Err(Error::InvalidInput);
        };

        let mut args = Args::new(line);
        let Some(name) = args.next() else {
            return Ok(());
        };

        let registry = self.registry;
        let mut shell = Shell::new(
            &mut self.out,
            registry,
            &self.config,
            self.context.as_deref_mut(),
        );

        match registry.find(name) {
            Some(command) => {
                log::debug!("dispatching '{}'", name);
                shell.invoke(command, &mut args);
                Ok(())
            }
            None => {
                log::debug!("no command '{}'", name);
                shell.not_found(name);
                Err(Error::CommandNotFound)
            }
        }
    }
}

impl<O: Output, const N: usize, R: RawRwLock> fmt::Debug for Session<'_, '_, O, N, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("line", &self.buffer)
            .field("capacity", &N)
            .field("config", &self.config)
            .field("registry", self.registry)
            .finish()
    }
}
