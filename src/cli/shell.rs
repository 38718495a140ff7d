//! The view of a session that command handlers work with.

use core::any::Any;
use core::fmt;

use super::args::Args;
use super::command::{Command, Commands};
use super::config::Config;
use super::output::Output;

/// Handler-side access to a session.
///
/// A `Shell` is built by the dispatcher for the duration of one handler
/// call. It gives access to the output, the registry and the session's user
/// context, but not to the line buffer: a handler cannot feed input back
/// into the session that is running it.
///
/// Formatted replies go through [`core::fmt`]:
///
/// ```rust
/// use core::fmt::Write;
/// use libcli::cli::{Args, Command, Shell};
///
/// fn uptime(shell: &mut Shell<'_>, _cmd: &Command, _args: &mut Args<'_>) {
///     let eol = shell.eol();
///     let _ = write!(shell, "up {} s{}", 12345, eol);
/// }
/// ```
pub struct Shell<'s> {
    out: &'s mut dyn Output,
    commands: &'s dyn Commands,
    config: &'s Config,
    context: Option<&'s mut (dyn Any + 'static)>,
}

impl<'s> Shell<'s> {
    pub(crate) fn new(
        out: &'s mut dyn Output,
        commands: &'s dyn Commands,
        config: &'s Config,
        context: Option<&'s mut (dyn Any + 'static)>,
    ) -> Self {
        Self {
            out,
            commands,
            config,
            context,
        }
    }

    /// Write raw bytes.
    pub fn put_bytes(&mut self, bytes: &[u8]) {
        self.out.put_bytes(bytes);
    }

    /// Write text.
    pub fn put_str(&mut self, text: &str) {
        self.out.put_str(text);
    }

    /// Write formatted text, e.g. `shell.print(format_args!("{:#x}", v))`.
    pub fn print(&mut self, args: fmt::Arguments<'_>) {
        if fmt::Write::write_fmt(self, args).is_err() {
            log::warn!("formatting a reply failed, output is incomplete");
        }
    }

    /// The configured end-of-line sequence.
    pub fn eol(&self) -> &'static str {
        self.config.eol()
    }

    /// The configured prompt.
    pub fn prompt(&self) -> &'s str {
        let config = self.config;
        config.prompt()
    }

    /// The user context the session was created with, downcast to `T`.
    pub fn context<T: Any>(&mut self) -> Option<&mut T> {
        self.context.as_deref_mut()?.downcast_mut()
    }

    /// Look up a registered command by name.
    pub fn find(&self, name: &str) -> Option<&'s Command> {
        let commands = self.commands;
        commands.find(name)
    }

    /// Run `command`'s handler with the remaining words of `args`.
    pub fn invoke(&mut self, command: &Command, args: &mut Args<'_>) {
        log::trace!("invoking '{}'", command.name());
        (command.handler())(self, command, args);
    }

    /// Write `<name> : <help>` and the end-of-line sequence.
    pub fn describe(&mut self, command: &Command) {
        let eol = self.eol();
        self.put_str(command.name());
        self.put_str(" : ");
        self.put_str(command.help());
        self.put_str(eol);
    }

    /// Describe every registered command in registration order.
    pub fn list(&mut self) {
        let commands = self.commands;
        commands.visit(&mut |command: &Command| self.describe(command));
    }

    /// Write `'<name>' not found` and the end-of-line sequence.
    pub fn not_found(&mut self, name: &str) {
        let eol = self.eol();
        self.put_str("'");
        self.put_str(name);
        self.put_str("' not found");
        self.put_str(eol);
    }

    /// Dispatch the next word of `args` into `command`'s subcommand table.
    ///
    /// With no word left, every subcommand is described; an unknown word gets
    /// the usual not-found line. Returns whether a subcommand ran.
    pub fn dispatch_subcommand(&mut self, command: &Command, args: &mut Args<'_>) -> bool {
        let table = command.subcommands().unwrap_or(&[]);
        let Some(name) = args.next() else {
            table.iter().for_each(|sub| self.describe(sub));
            return false;
        };

        match table.iter().find(|sub| sub.name() == name) {
            Some(sub) => {
                self.invoke(sub, args);
                true
            }
            None => {
                self.not_found(name);
                false
            }
        }
    }
}

impl fmt::Write for Shell<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.put_str(s);
        Ok(())
    }
}

impl fmt::Debug for Shell<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shell")
            .field("config", self.config)
            .field("context", &self.context.is_some())
            .finish()
    }
}

/// The built-in `help` handler.
///
/// `help` lists every registered command as `<name> : <help>`, in
/// registration order. `help <name>` shows just that command, or the
/// not-found line if there is no such command.
///
/// ```rust
/// use libcli::cli::{help, Command};
///
/// static HELP: Command = Command::new("help", "list commands", help);
/// ```
pub fn help(shell: &mut Shell<'_>, _command: &Command, args: &mut Args<'_>) {
    match args.next() {
        Some(name) => match shell.find(name) {
            Some(command) => shell.describe(command),
            None => shell.not_found(name),
        },
        None => shell.list(),
    }
}
