//! Terminal front end for the loan chat client.
//!
//! This module provides the pieces the `loanchat` binary is assembled from:
//!
//! - [`config`]: CLI argument parsing and configuration
//! - [`commands`]: Slash command parsing for uploads, downloads and input modes

mod commands;
mod config;

pub use crate::render::{PlainTextRenderer, Presenter, Renderer};
pub use commands::{ChatCommand, help_text, parse_command};
pub use config::{ChatArgs, ChatConfig};
