//! Configuration types for the chat application.
//!
//! This module provides CLI argument parsing via `arrrg` and configuration
//! structures for controlling the client.

use std::path::PathBuf;
use std::time::Duration;

use arrrg_derive::CommandLine;

use crate::client::DEFAULT_SERVER_URL;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Command-line arguments for the loanchat tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct ChatArgs {
    /// Base URL of the loan server.
    #[arrrg(optional, "Loan server URL (default: http://localhost:5000)", "URL")]
    pub server: Option<String>,

    /// Request timeout.
    #[arrrg(optional, "Request timeout in seconds (default: 60)", "SECONDS")]
    pub timeout: Option<u64>,

    /// Where to save the sanction letter.
    #[arrrg(optional, "Directory for downloaded sanction letters (default: .)", "DIR")]
    pub download_dir: Option<String>,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,
}

/// Configuration for a chat client.
///
/// This struct holds the resolved configuration values after processing
/// command-line arguments with appropriate defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    /// Base URL of the loan server.
    pub server: String,

    /// Request timeout.
    pub timeout: Duration,

    /// Directory the sanction letter is written to.
    pub download_dir: PathBuf,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,
}

impl ChatConfig {
    /// Creates a new ChatConfig with default values.
    ///
    /// Defaults:
    /// - Server: http://localhost:5000
    /// - Timeout: 60 seconds
    /// - Download directory: the current directory
    /// - Color: enabled
    pub fn new() -> Self {
        Self {
            server: DEFAULT_SERVER_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            download_dir: PathBuf::from("."),
            use_color: true,
        }
    }

    /// Sets the server URL.
    pub fn with_server(mut self, server: impl Into<String>) -> Self {
        self.server = server.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the download directory.
    pub fn with_download_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.download_dir = dir.into();
        self
    }

    /// Disables ANSI color output.
    pub fn without_color(mut self) -> Self {
        self.use_color = false;
        self
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ChatArgs> for ChatConfig {
    fn from(args: ChatArgs) -> Self {
        let defaults = ChatConfig::new();
        ChatConfig {
            server: args.server.unwrap_or(defaults.server),
            timeout: args
                .timeout
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            download_dir: args
                .download_dir
                .map(PathBuf::from)
                .unwrap_or(defaults.download_dir),
            use_color: !args.no_color,
        }
    }
}
