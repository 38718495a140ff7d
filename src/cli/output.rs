//! Output sinks for echo, prompts and command replies.

use core::fmt;

/// Destination for everything the interpreter writes.
///
/// The sink receives raw bytes: echoed input is reflected verbatim, control
/// characters included, so it may not be valid UTF-8. Writes are expected to
/// complete synchronously; a sink that cannot keep up should drop bytes
/// rather than block forever.
///
/// # Examples
///
/// ```rust
/// use libcli::cli::Output;
///
/// struct Uart {
///     sent: usize,
/// }
///
/// impl Output for Uart {
///     fn put_bytes(&mut self, bytes: &[u8]) {
///         // push to the TX FIFO here
///         self.sent += bytes.len();
///     }
/// }
/// ```
pub trait Output {
    /// Write raw bytes.
    fn put_bytes(&mut self, bytes: &[u8]);

    /// Write text.
    fn put_str(&mut self, text: &str) {
        self.put_bytes(text.as_bytes());
    }
}

impl<O: Output + ?Sized> Output for &mut O {
    fn put_bytes(&mut self, bytes: &[u8]) {
        (**self).put_bytes(bytes);
    }

    fn put_str(&mut self, text: &str) {
        (**self).put_str(text);
    }
}

/// Collects output in a fixed buffer. Bytes past the capacity are dropped.
impl<const N: usize> Output for heapless::Vec<u8, N> {
    fn put_bytes(&mut self, bytes: &[u8]) {
        let room = N - self.len();
        let written = self.extend_from_slice(&bytes[..bytes.len().min(room)]);
        debug_assert!(written.is_ok());
    }
}

#[cfg(feature = "std")]
impl Output for std::vec::Vec<u8> {
    fn put_bytes(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }
}

/// Adapts a plain function or closure into an [`Output`].
///
/// ```rust
/// use libcli::cli::{FnOutput, Output};
///
/// let mut count = 0;
/// let mut sink = FnOutput(|bytes: &[u8]| count += bytes.len());
/// sink.put_str("> ");
/// drop(sink);
/// assert_eq!(count, 2);
/// ```
pub struct FnOutput<F>(
    /// The wrapped function.
    pub F,
);

impl<F: FnMut(&[u8])> Output for FnOutput<F> {
    fn put_bytes(&mut self, bytes: &[u8]) {
        (self.0)(bytes);
    }
}

impl<F> fmt::Debug for FnOutput<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnOutput")
    }
}
