#![allow(dead_code)]

use libcli::cli::{Config, Output, Registry, Session};

/// In-memory output sink that records everything the session writes.
#[derive(Debug, Default)]
pub struct Capture {
    bytes: Vec<u8>,
}

impl Capture {
    /// Everything written since the last call, as text.
    pub fn take(&mut self) -> String {
        let bytes = std::mem::take(&mut self.bytes);
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Everything written since the last call, as raw bytes.
    pub fn take_bytes(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.bytes)
    }
}

impl Output for Capture {
    fn put_bytes(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }
}

/// A session with the default configuration writing to a [`Capture`].
pub fn session<'r, 'c, const N: usize>(registry: &'r Registry<'c>) -> Session<'r, 'c, Capture, N> {
    Session::new(registry, Capture::default(), Config::default())
}

/// Feed `text` and return what the session wrote in response.
pub fn send<const N: usize>(session: &mut Session<'_, '_, Capture, N>, text: &str) -> String {
    let _ = session.input(text.as_bytes());
    session.output_mut().take()
}

/// The session's current line as text.
pub fn line<const N: usize>(session: &Session<'_, '_, Capture, N>) -> String {
    String::from_utf8_lossy(session.line()).into_owned()
}
