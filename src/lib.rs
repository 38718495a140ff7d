//! # libcli - command line interpreter for embedded devices
//!
//! A small interpreter that is fed one input byte at a time, typically from
//! a serial interrupt, and dispatches completed lines to registered command
//! handlers. It never allocates and runs in `no_std` environments.
//!
//! ## Features
//!
//! ### Line editing
//! - Local echo of every received byte
//! - Backspace with visual erase, CR/LF and CRLF line endings
//! - Bounded line buffer with silent discard of over-long lines
//!
//! ### Command dispatch
//! - Registry of `const`-constructible, reusable command descriptors
//! - Resumable tokenizer so handlers parse their own subcommands
//! - Built-in `help` handler
//!
//! ### Intrusive lists
//! - Generic singly-linked list over caller-owned nodes
//! - Locking strategy chosen per list: none, spin lock, or any
//!   [`lock_api::RawRwLock`]
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! libcli = "0.1.0"
//! ```
//!
//! ### Serial console
//!
//! ```rust
//! use libcli::cli::{help, Command, Config, FnOutput, Registry, Session};
//!
//! static HELP: Command = Command::new("help", "show this list", help);
//!
//! fn uart_write(_bytes: &[u8]) {
//!     // write to the UART TX register
//! }
//!
//! let registry: Registry = Registry::new();
//! let mut console: Session<'_, '_, _, 80> =
//!     Session::new(&registry, FnOutput(uart_write), Config::default());
//! console.register(&HELP).unwrap();
//!
//! // from the RX interrupt
//! for &byte in b"help\r\n" {
//!     let _ = console.process(byte);
//! }
//! ```
//!
//! ## Optional Features
//!
//! - `std`: Enable standard library support (default: disabled)
//! - `defmt`: Enable defmt logging support for embedded debugging

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]
#![warn(missing_debug_implementations)]

/// Intrusive singly-linked lists with optional locking.
///
/// The building block of the command registry, also usable for any other
/// table of statically allocated records.
pub mod list;

/// Line editor, command registry and dispatch.
///
/// Contains the byte-driven [`cli::Session`], the [`cli::Registry`] it
/// dispatches to and the [`cli::Shell`] handlers reply through.
pub mod cli;
