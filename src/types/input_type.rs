use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The three input modes of the message box.
///
/// Switching modes is presentational: it changes the placeholder and the
/// constraint applied to what the user types, nothing else.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputType {
    /// Free text.
    #[default]
    Text,

    /// A numeric amount.
    Number,

    /// A 10-digit phone number.
    Phone,
}

impl InputType {
    /// Placeholder shown in the empty input box.
    pub fn placeholder(&self) -> &'static str {
        match self {
            InputType::Text => "Type your message here...",
            InputType::Number => "Enter a number...",
            InputType::Phone => "Enter 10-digit phone number...",
        }
    }

    /// Maps the server's `input_type` hint onto a mode.
    ///
    /// Anything other than `"number"` or `"phone"`, including no hint at all,
    /// is free text.
    pub fn from_hint(hint: Option<&str>) -> Self {
        match hint {
            Some("number") => InputType::Number,
            Some("phone") => InputType::Phone,
            _ => InputType::Text,
        }
    }

    /// Returns true if `text` satisfies this mode's input constraint.
    pub fn accepts(&self, text: &str) -> bool {
        let text = text.trim();
        match self {
            InputType::Text => true,
            InputType::Number => text.parse::<f64>().is_ok_and(f64::is_finite),
            InputType::Phone => {
                let digits: Vec<char> = text.chars().filter(|c| *c != ' ' && *c != '-').collect();
                digits.len() == 10 && digits.iter().all(char::is_ascii_digit)
            }
        }
    }
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputType::Text => write!(f, "text"),
            InputType::Number => write!(f, "number"),
            InputType::Phone => write!(f, "phone"),
        }
    }
}

/// Error returned when parsing an unknown input mode.
#[derive(Debug)]
pub struct InputTypeParseError {
    /// The invalid string value that could not be parsed.
    pub invalid_value: String,
}

impl fmt::Display for InputTypeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown input type: {}", self.invalid_value)
    }
}

impl std::error::Error for InputTypeParseError {}

impl FromStr for InputType {
    type Err = InputTypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(InputType::Text),
            "number" => Ok(InputType::Number),
            "phone" | "tel" => Ok(InputType::Phone),
            _ => Err(InputTypeParseError {
                invalid_value: s.to_string(),
            }),
        }
    }
}
