//! Command descriptors and the registry that links them.

use core::any::Any;
use core::fmt;

use lock_api::RawRwLock;

use super::args::Args;
use super::error::Error;
use super::shell::Shell;
use crate::list::{Link, List, NoLock, Node};

/// Function signature for command handlers.
///
/// A handler receives the [`Shell`] it can reply through, the command entry
/// that matched (so one handler can serve several entries and read their
/// [`context`](Command::context)), and the tokenizer positioned just after
/// the command name.
///
/// Argument validation is up to the handler: it decides what, if anything,
/// to print for bad input.
pub type Handler = fn(shell: &mut Shell<'_>, command: &Command, args: &mut Args<'_>);

/// A command descriptor.
///
/// Descriptors are `const`-constructible so they can be `static`. A
/// descriptor is linked into at most one [`Registry`] at a time; closing the
/// session (or dropping the registry) unlinks it again so it can be reused.
///
/// # Examples
///
/// ```rust
/// use libcli::cli::{Args, Command, Shell};
///
/// fn reboot(shell: &mut Shell<'_>, _cmd: &Command, _args: &mut Args<'_>) {
///     let eol = shell.eol();
///     shell.put_str("rebooting");
///     shell.put_str(eol);
/// }
///
/// static REBOOT: Command = Command::new("reboot", "restart the device", reboot);
/// assert_eq!(REBOOT.name(), "reboot");
/// assert!(!REBOOT.is_registered());
/// ```
pub struct Command {
    name: &'static str,
    help: &'static str,
    handler: Handler,
    subcommands: Option<&'static [Command]>,
    context: Option<&'static (dyn Any + Sync)>,
    link: Link<Command>,
}

impl Command {
    /// Create a command with a name, a one-line help text and a handler.
    pub const fn new(name: &'static str, help: &'static str, handler: Handler) -> Self {
        Self {
            name,
            help,
            handler,
            subcommands: None,
            context: None,
            link: Link::new(),
        }
    }

    /// Attach a table of subcommands, dispatched with
    /// [`Shell::dispatch_subcommand`].
    pub const fn with_subcommands(mut self, subcommands: &'static [Command]) -> Self {
        self.subcommands = Some(subcommands);
        self
    }

    /// Attach per-command data the handler can downcast.
    pub const fn with_context(mut self, context: &'static (dyn Any + Sync)) -> Self {
        self.context = Some(context);
        self
    }

    /// The name typed to invoke the command.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The one-line help text.
    pub fn help(&self) -> &'static str {
        self.help
    }

    /// The handler.
    pub fn handler(&self) -> Handler {
        self.handler
    }

    /// The subcommand table, if any.
    pub fn subcommands(&self) -> Option<&'static [Command]> {
        self.subcommands
    }

    /// Per-command data, downcast to `T`.
    pub fn context<T: Any>(&self) -> Option<&'static T> {
        let context: &'static dyn Any = self.context?;
        context.downcast_ref()
    }

    /// Whether the command is currently linked into a registry.
    pub fn is_registered(&self) -> bool {
        self.link.is_linked()
    }
}

impl Node for Command {
    fn link(&self) -> &Link<Self> {
        &self.link
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("help", &self.help)
            .field("subcommands", &self.subcommands.map_or(0, <[Command]>::len))
            .field("registered", &self.is_registered())
            .finish()
    }
}

/// Read access to a set of commands, as seen by handlers.
pub trait Commands {
    /// First command called `name`.
    fn find(&self, name: &str) -> Option<&Command>;

    /// Call `visitor` on every command in registration order.
    fn visit(&self, visitor: &mut dyn FnMut(&Command));
}

/// The commands a session dispatches to, in registration order.
///
/// Names are not required to be unique: [`find`](Registry::find) returns the
/// first registered match and later duplicates are unreachable by name. A
/// duplicate is accepted with a warning in the log.
///
/// Choose [`SpinLock`](crate::list::SpinLock) (or another thread-safe
/// [`RawRwLock`]) as `R` to share a registry between threads or sessions;
/// the default [`NoLock`] registry cannot leave its thread.
pub struct Registry<'a, R: RawRwLock = NoLock> {
    commands: List<'a, Command, R>,
}

impl<'a, R: RawRwLock> Registry<'a, R> {
    /// Create an empty registry.
    pub const fn new() -> Self {
        Self {
            commands: List::new(),
        }
    }

    /// Append `command`; listing order is registration order.
    pub fn register(&self, command: &'a Command) -> Result<(), Error> {
        if command.name.is_empty() {
            return Err(Error::InvalidName);
        }

        if self.find(command.name).is_some() {
            log::warn!(
                "command '{}' registered twice, the first one wins",
                command.name
            );
        }

        self.commands.append(command)?;
        log::debug!("registered command '{}'", command.name);
        Ok(())
    }

    /// Unlink `command`. Returns `false` if it was not registered here.
    pub fn unregister(&self, command: &Command) -> bool {
        self.commands.remove(command)
    }

    /// First command called `name`.
    pub fn find(&self, name: &str) -> Option<&'a Command> {
        self.commands.find(|command| command.name == name)
    }

    /// Call `visitor` on every command in registration order.
    ///
    /// The registry is locked meanwhile; the visitor must not register or
    /// unregister commands.
    pub fn visit<F: FnMut(&'a Command)>(&self, visitor: F) {
        self.commands.visit(visitor);
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether no command is registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Unlink every command so the descriptors can be registered again.
    pub fn clear(&self) -> usize {
        self.commands.clear()
    }
}

impl<R: RawRwLock> Default for Registry<'_, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RawRwLock> Commands for Registry<'_, R> {
    fn find(&self, name: &str) -> Option<&Command> {
        Registry::find(self, name)
    }

    fn visit(&self, visitor: &mut dyn FnMut(&Command)) {
        Registry::visit(self, |command| visitor(command));
    }
}

impl<R: RawRwLock> fmt::Debug for Registry<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("commands", &self.commands)
            .finish()
    }
}
