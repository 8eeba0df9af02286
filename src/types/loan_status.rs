use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stage of the loan application as reported by the server.
///
/// The server owns the conversation state machine; the client only maps
/// the stage to a label and a two-state indicator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LoanStatus {
    /// No information collected yet.
    #[default]
    Initial,

    /// The sales agent is collecting loan details.
    Sales,

    /// KYC and CRM verification.
    Verification,

    /// Credit assessment.
    Underwriting,

    /// The sanction letter is being generated.
    Sanction,

    /// The loan has been approved and the letter is ready.
    Completed,

    /// A stage this client does not know about.
    Other(String),
}

impl LoanStatus {
    /// Human-readable label shown next to the status indicator.
    pub fn label(&self) -> &'static str {
        match self {
            LoanStatus::Initial => "Getting Started",
            LoanStatus::Sales => "Collecting Information",
            LoanStatus::Verification => "Verifying Details",
            LoanStatus::Underwriting => "Processing Application",
            LoanStatus::Sanction => "Generating Documents",
            LoanStatus::Completed => "Approved",
            LoanStatus::Other(_) => "In Progress",
        }
    }

    /// Returns true once the application has been approved.
    pub fn is_completed(&self) -> bool {
        matches!(self, LoanStatus::Completed)
    }

    /// The status indicator text: only two states exist.
    pub fn indicator(&self) -> &'static str {
        if self.is_completed() {
            "Completed"
        } else {
            "Processing"
        }
    }
}

impl fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoanStatus::Initial => write!(f, "initial"),
            LoanStatus::Sales => write!(f, "sales"),
            LoanStatus::Verification => write!(f, "verification"),
            LoanStatus::Underwriting => write!(f, "underwriting"),
            LoanStatus::Sanction => write!(f, "sanction"),
            LoanStatus::Completed => write!(f, "completed"),
            LoanStatus::Other(s) => write!(f, "{s}"),
        }
    }
}

impl FromStr for LoanStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "initial" => LoanStatus::Initial,
            "sales" => LoanStatus::Sales,
            "verification" => LoanStatus::Verification,
            "underwriting" => LoanStatus::Underwriting,
            "sanction" => LoanStatus::Sanction,
            "completed" => LoanStatus::Completed,
            other => LoanStatus::Other(other.to_string()),
        })
    }
}

impl From<String> for LoanStatus {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(status) => status,
            Err(never) => match never {},
        }
    }
}

impl From<LoanStatus> for String {
    fn from(status: LoanStatus) -> Self {
        status.to_string()
    }
}
