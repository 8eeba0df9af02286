//! View-model for the chat client.
//!
//! [`UiState`] is the whole presentational state of the client apart from
//! the transcript.  Server replies drive it through [`UiState::apply_reply`],
//! and [`render`] turns a [`ChatView`] snapshot into the strings a front end
//! needs.  Nothing here performs I/O.

use serde::{Deserialize, Serialize};

use crate::toast::Toast;
use crate::types::{ChatReply, InputType, LoanStatus, Message};

/// Visible configuration of the client's panels and flags.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UiState {
    /// A chat or upload request is in flight.
    pub is_loading: bool,
    /// The active input mode.
    pub input_type: InputType,
    /// The input-mode selector is showing.
    pub input_options_visible: bool,
    /// The document upload panel is showing.
    pub file_upload_visible: bool,
    /// The sanction-letter download panel is showing.
    pub download_visible: bool,
    /// Stage of the application.
    pub loan_status: LoanStatus,
}

impl UiState {
    /// State of a freshly loaded client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a server reply.
    ///
    /// Every panel flag and the status are recomputed from `reply` alone;
    /// only `is_loading` is carried over.
    pub fn apply_reply(&mut self, reply: &ChatReply) {
        if reply.requires_input {
            self.input_options_visible = true;
            self.input_type = InputType::from_hint(reply.input_type.as_deref());
        } else {
            self.input_options_visible = false;
            self.input_type = InputType::Text;
        }

        let text = reply.response.as_str();
        self.file_upload_visible = text.contains("salary slip") || text.contains("upload");
        self.download_visible = reply.status.is_completed() || text.contains("sanction letter");
        self.loan_status = reply.status.clone();
    }

    /// Switches the input mode by hand.  The selector stays open.
    pub fn set_input_type(&mut self, input_type: InputType) {
        self.input_type = input_type;
        self.input_options_visible = true;
    }
}

/// Loan details shown beside the status.
///
/// The server never sends these, so they keep their placeholder values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanSummary {
    /// Requested amount.
    pub amount: String,
    /// Offered interest rate.
    pub interest_rate: String,
    /// Tenure.
    pub tenure: String,
    /// Monthly instalment.
    pub emi: String,
}

impl Default for LoanSummary {
    fn default() -> Self {
        Self {
            amount: "Not specified".to_string(),
            interest_rate: "TBD".to_string(),
            tenure: "Not specified".to_string(),
            emi: "TBD".to_string(),
        }
    }
}

/// A consistent snapshot of everything the client displays.
#[derive(Debug, Clone)]
pub struct ChatView {
    /// Session this view belongs to.
    pub session_id: String,
    /// The transcript, oldest first.
    pub messages: Vec<Message>,
    /// Panels and flags.
    pub ui: UiState,
    /// Current contents of the input box.
    pub input: String,
    /// Toasts visible when the snapshot was taken, oldest first.
    pub toasts: Vec<Toast>,
    /// Loan details panel.
    pub loan: LoanSummary,
}

/// Colour of the status indicator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum IndicatorColor {
    /// Approved.
    Green,
    /// Anything short of approved.
    Amber,
}

/// Presentational strings derived from a [`ChatView`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedView {
    /// Label for the current stage, e.g. "Collecting Information".
    pub status_label: &'static str,
    /// "Completed" or "Processing".
    pub status_indicator: &'static str,
    /// Colour of the indicator.
    pub indicator_color: IndicatorColor,
    /// Placeholder for the input box.
    pub placeholder: &'static str,
    /// The mode the input box is in.
    pub input_type: InputType,
    /// The input-mode selector is showing.
    pub show_input_options: bool,
    /// The upload panel is showing.
    pub show_file_upload: bool,
    /// The download panel is showing.
    pub show_download: bool,
    /// The loading spinner is showing and input is disabled.
    pub show_spinner: bool,
    /// Loan details as label/value pairs.
    pub loan_lines: Vec<(&'static str, String)>,
}

/// Derives everything a front end displays from a snapshot.
pub fn render(view: &ChatView) -> RenderedView {
    let ui = &view.ui;
    // With the selector hidden the box always reads as free text.
    let input_type = if ui.input_options_visible {
        ui.input_type
    } else {
        InputType::Text
    };
    RenderedView {
        status_label: ui.loan_status.label(),
        status_indicator: ui.loan_status.indicator(),
        indicator_color: if ui.loan_status.is_completed() {
            IndicatorColor::Green
        } else {
            IndicatorColor::Amber
        },
        placeholder: input_type.placeholder(),
        input_type,
        show_input_options: ui.input_options_visible,
        show_file_upload: ui.file_upload_visible,
        show_download: ui.download_visible,
        show_spinner: ui.is_loading,
        loan_lines: vec![
            ("Loan Amount", view.loan.amount.clone()),
            ("Interest Rate", view.loan.interest_rate.clone()),
            ("Tenure", view.loan.tenure.clone()),
            ("EMI", view.loan.emi.clone()),
            ("Status", ui.loan_status.label().to_string()),
        ],
    }
}
