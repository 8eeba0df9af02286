//! Slash command parsing for the chat application.
//!
//! This module handles parsing of special commands that start with `/`,
//! which drive the upload, download and input-mode panels instead of being
//! sent to the loan assistant.

use crate::types::InputType;

/// A parsed chat command.
///
/// These commands act on the client and are not sent as chat messages.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatCommand {
    /// Upload the document at the given path.
    Upload(String),

    /// Download the sanction letter.
    Download,

    /// Switch the input mode.
    Mode(InputType),

    /// Show the loan status and details panel.
    Status,

    /// Display help information.
    Help,

    /// Exit the chat application.
    Quit,

    /// Report a parsing error back to the caller.
    Invalid(String),
}

/// Parses user input for slash commands.
///
/// Returns `Some(ChatCommand)` if the input is a valid command,
/// or `None` if it should be treated as a regular message.
///
/// # Examples
///
/// ```
/// # use loanchat::chat::parse_command;
/// assert!(parse_command("/quit").is_some());
/// assert!(parse_command("/upload salary_slip.pdf").is_some());
/// assert!(parse_command("I need a personal loan").is_none());
/// ```
pub fn parse_command(input: &str) -> Option<ChatCommand> {
    let input = input.trim();

    let rest = input.strip_prefix('/')?;
    let mut parts = rest.splitn(2, ' ');
    let command = parts.next()?.to_lowercase();
    let argument = parts.next().map(|s| s.trim()).filter(|s| !s.is_empty());

    let result = match command.as_str() {
        "upload" => match argument {
            Some(path) => ChatCommand::Upload(path.to_string()),
            None => ChatCommand::Invalid("/upload requires a file path".to_string()),
        },
        "download" => ChatCommand::Download,
        "mode" => match argument.map(str::parse::<InputType>) {
            Some(Ok(input_type)) => ChatCommand::Mode(input_type),
            Some(Err(_)) | None => {
                ChatCommand::Invalid("/mode expects 'text', 'number', or 'phone'".to_string())
            }
        },
        "status" | "stats" => ChatCommand::Status,
        "help" | "?" => ChatCommand::Help,
        "quit" | "exit" | "q" => ChatCommand::Quit,
        _ => ChatCommand::Invalid(format!("Unknown command: /{}", command)),
    };

    Some(result)
}

/// Returns help text describing available commands.
pub fn help_text() -> &'static str {
    r#"Available commands:
  /upload <path>         Upload a salary slip or document (PDF, JPG, PNG; max 5MB)
  /download              Save the sanction letter once it is ready
  /mode <type>           Switch input mode: text, number, or phone
  /status                Show loan status and details
  /help                  Show this help message
  /quit                  Exit the chat"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_quit_commands() {
        assert_eq!(parse_command("/quit"), Some(ChatCommand::Quit));
        assert_eq!(parse_command("/exit"), Some(ChatCommand::Quit));
        assert_eq!(parse_command("/q"), Some(ChatCommand::Quit));
        assert_eq!(parse_command("  /quit  "), Some(ChatCommand::Quit));
    }

    #[test]
    fn parse_upload() {
        assert_eq!(
            parse_command("/upload ~/docs/salary slip.pdf"),
            Some(ChatCommand::Upload("~/docs/salary slip.pdf".to_string()))
        );
        assert_eq!(
            parse_command("/upload"),
            Some(ChatCommand::Invalid(
                "/upload requires a file path".to_string()
            ))
        );
    }

    #[test]
    fn parse_download() {
        assert_eq!(parse_command("/download"), Some(ChatCommand::Download));
        assert_eq!(parse_command("/DOWNLOAD"), Some(ChatCommand::Download));
    }

    #[test]
    fn parse_mode() {
        assert_eq!(
            parse_command("/mode number"),
            Some(ChatCommand::Mode(InputType::Number))
        );
        assert_eq!(
            parse_command("/mode Phone"),
            Some(ChatCommand::Mode(InputType::Phone))
        );
        assert!(matches!(
            parse_command("/mode email"),
            Some(ChatCommand::Invalid(msg)) if msg.contains("expects")
        ));
        assert!(matches!(
            parse_command("/mode"),
            Some(ChatCommand::Invalid(_))
        ));
    }

    #[test]
    fn parse_unknown() {
        assert_eq!(
            parse_command("/model claude"),
            Some(ChatCommand::Invalid("Unknown command: /model".to_string()))
        );
    }

    #[test]
    fn non_commands() {
        assert_eq!(parse_command("I want 500000"), None);
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("  "), None);
    }

    #[test]
    fn help_text_not_empty() {
        let help = help_text();
        assert!(help.contains("/upload"));
        assert!(help.contains("/download"));
        assert!(help.contains("/mode"));
        assert!(help.contains("/quit"));
    }
}
