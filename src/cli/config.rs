//! Session configuration.
//!
//! A [`Config`] can be built in code or loaded from a small JSON document,
//! for example one stored in flash next to other device settings:
//!
//! ```rust
//! use libcli::cli::{Config, LineEnding};
//!
//! let config = Config::from_json(br#"{"prompt":"dev$ ","eol":"lf"}"#).unwrap();
//! assert_eq!(config.prompt(), "dev$ ");
//! assert_eq!(config.eol, LineEnding::Lf);
//! assert!(config.echo);
//! ```

use heapless::String;
use serde::{Deserialize, Serialize};

use super::error::Error;

/// Longest prompt a [`Config`] can hold.
pub const MAX_PROMPT_LEN: usize = 16;

/// Prompt used when none is configured.
pub const DEFAULT_PROMPT: &str = "> ";

const _: () = assert!(DEFAULT_PROMPT.len() <= MAX_PROMPT_LEN);

/// The sequence written at the end of every line the interpreter produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    /// `"\r\n"`, what most serial terminals expect.
    #[default]
    CrLf,
    /// `"\n"`
    Lf,
    /// `"\r"`
    Cr,
}

impl LineEnding {
    /// The bytes of this line ending.
    pub const fn as_str(self) -> &'static str {
        match self {
            LineEnding::CrLf => "\r\n",
            LineEnding::Lf => "\n",
            LineEnding::Cr => "\r",
        }
    }
}

/// Prompt, line ending and echo settings for a [`Session`](super::Session).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Written after start-up and after every completed or discarded line.
    pub prompt: String<MAX_PROMPT_LEN>,
    /// End-of-line sequence for replies.
    pub eol: LineEnding,
    /// Reflect every received byte back to the output. Turn off when the
    /// terminal echoes locally.
    pub echo: bool,
}

impl Default for Config {
    fn default() -> Self {
        let mut prompt = String::new();
        let pushed = prompt.push_str(DEFAULT_PROMPT);
        debug_assert!(pushed.is_ok());
        Self {
            prompt,
            eol: LineEnding::default(),
            echo: true,
        }
    }
}

impl Config {
    /// Build a configuration with the given prompt and line ending.
    ///
    /// Fails with [`Error::InvalidConfig`] if the prompt is longer than
    /// [`MAX_PROMPT_LEN`].
    pub fn new(prompt: &str, eol: LineEnding) -> Result<Self, Error> {
        Ok(Self {
            prompt: String::try_from(prompt).map_err(|_| Error::InvalidConfig)?,
            eol,
            echo: true,
        })
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &[u8]) -> Result<Self, Error> {
        let (config, _) = serde_json_core::from_slice(json).map_err(|_| Error::InvalidConfig)?;
        Ok(config)
    }

    /// Write the configuration as JSON into `buf`, returning the number of
    /// bytes used.
    ///
    /// The output is accepted by [`Config::from_json`], so a configuration
    /// changed at runtime can be stored and loaded again on the next boot.
    pub fn to_json(&self, buf: &mut [u8]) -> Result<usize, Error> {
        serde_json_core::to_slice(self, buf).map_err(|_| Error::InvalidConfig)
    }

    /// Enable or disable echo.
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// The prompt text.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// The end-of-line text.
    pub fn eol(&self) -> &'static str {
        self.eol.as_str()
    }
}
