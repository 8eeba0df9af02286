//! Terminal output for the chat client.
//!
//! The [`Renderer`] trait receives already-derived view data; the
//! [`Presenter`] decides what is new since the last call so a scrolling
//! terminal only ever prints each message and toast once.

use std::io::{self, Stdout, Write};

use crate::toast::{Severity, Toast};
use crate::types::{Message, Sender};
use crate::view::{ChatView, IndicatorColor, RenderedView, render};

/// ANSI escape code for dim text (used for timestamps).
const ANSI_DIM: &str = "\x1b[2m";

/// ANSI escape code for bold text (used for the speaker label).
const ANSI_BOLD: &str = "\x1b[1m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// ANSI escape code for cyan text (used for info toasts).
const ANSI_CYAN: &str = "\x1b[36m";

/// ANSI escape code for yellow text (used for the in-progress indicator).
const ANSI_YELLOW: &str = "\x1b[33m";

/// ANSI escape code for green text (used for success toasts and approval).
const ANSI_GREEN: &str = "\x1b[32m";

/// ANSI escape code for red text (used for error toasts).
const ANSI_RED: &str = "\x1b[31m";

/// Trait for rendering chat output.
///
/// This abstraction allows for different rendering strategies:
/// - Plain text with ANSI styling
/// - Plain text without styling (for piping/redirecting)
pub trait Renderer: Send {
    /// Print one transcript entry.
    fn print_message(&mut self, message: &Message);

    /// Print a notification.
    fn print_toast(&mut self, toast: &Toast);

    /// Print the status line.
    fn print_status(&mut self, view: &RenderedView);

    /// Print hints for the panels that are open.
    fn print_panels(&mut self, view: &RenderedView);

    /// Print the loan details panel.
    fn print_loan_summary(&mut self, view: &RenderedView) {
        for (label, value) in &view.loan_lines {
            self.print_info(&format!("    {label}: {value}"));
        }
    }

    /// Print an error message.
    fn print_error(&mut self, error: &str);

    /// Print an informational message.
    fn print_info(&mut self, info: &str);
}

/// Plain text renderer with optional ANSI styling.
pub struct PlainTextRenderer {
    stdout: Stdout,
    use_color: bool,
}

impl PlainTextRenderer {
    /// Creates a new PlainTextRenderer with ANSI colors enabled.
    pub fn new() -> Self {
        Self::with_color(true)
    }

    /// Creates a new PlainTextRenderer with specified color setting.
    pub fn with_color(use_color: bool) -> Self {
        Self {
            stdout: io::stdout(),
            use_color,
        }
    }

    /// Flushes stdout so output appears before the next prompt.
    fn flush(&mut self) {
        let _ = self.stdout.flush();
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.use_color {
            format!("{color}{text}{ANSI_RESET}")
        } else {
            text.to_string()
        }
    }

    /// Formats a transcript entry as one or more lines.
    pub fn format_message(&self, message: &Message) -> String {
        let who = match message.sender {
            Sender::User => "You",
            Sender::Bot => "Assistant",
        };
        format!(
            "{} {}: {}",
            self.paint(ANSI_DIM, &format!("[{}]", message.timestamp)),
            self.paint(ANSI_BOLD, who),
            message.content
        )
    }

    /// Formats a toast.
    pub fn format_toast(&self, toast: &Toast) -> String {
        let (color, tag) = match toast.severity {
            Severity::Info => (ANSI_CYAN, "info"),
            Severity::Success => (ANSI_GREEN, "ok"),
            Severity::Error => (ANSI_RED, "error"),
        };
        self.paint(color, &format!("[{tag}] {}", toast.message))
    }

    /// Formats the status line.
    pub fn format_status(&self, view: &RenderedView) -> String {
        let color = match view.indicator_color {
            IndicatorColor::Green => ANSI_GREEN,
            IndicatorColor::Amber => ANSI_YELLOW,
        };
        format!(
            "Status: {} ({})",
            view.status_label,
            self.paint(color, view.status_indicator)
        )
    }
}

impl Default for PlainTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for PlainTextRenderer {
    fn print_message(&mut self, message: &Message) {
        println!("{}", self.format_message(message));
        self.flush();
    }

    fn print_toast(&mut self, toast: &Toast) {
        println!("{}", self.format_toast(toast));
        self.flush();
    }

    fn print_status(&mut self, view: &RenderedView) {
        println!("{}", self.format_status(view));
        self.flush();
    }

    fn print_panels(&mut self, view: &RenderedView) {
        for hint in panel_hints(view) {
            println!("{}", self.paint(ANSI_DIM, &hint));
        }
        self.flush();
    }

    fn print_error(&mut self, error: &str) {
        eprintln!("Error: {error}");
    }

    fn print_info(&mut self, info: &str) {
        println!("{info}");
        self.flush();
    }
}

/// One line per open panel, describing how to act on it.
pub fn panel_hints(view: &RenderedView) -> Vec<String> {
    let mut hints = Vec::new();
    if view.show_input_options {
        hints.push(format!(
            "  input mode: {} (/mode text|number|phone)",
            view.input_type
        ));
    }
    if view.show_file_upload {
        hints.push("  upload a PDF, JPG, or PNG (max 5MB) with /upload <path>".to_string());
    }
    if view.show_download {
        hints.push("  your sanction letter is ready: /download".to_string());
    }
    hints
}

/// Tracks what has already been shown and prints only what changed.
#[derive(Debug, Default)]
pub struct Presenter {
    messages_shown: usize,
    last_toast_id: Option<u64>,
    last_view: Option<RenderedView>,
}

impl Presenter {
    /// Creates a presenter that has shown nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Prints new messages and toasts, then the status and panel hints if
    /// they differ from what was last printed.  Returns the rendered view.
    pub fn present(&mut self, view: &ChatView, renderer: &mut dyn Renderer) -> RenderedView {
        for message in view.messages.iter().skip(self.messages_shown) {
            renderer.print_message(message);
        }
        self.messages_shown = view.messages.len();

        for toast in &view.toasts {
            if self.last_toast_id.is_none_or(|last| toast.id > last) {
                renderer.print_toast(toast);
                self.last_toast_id = Some(toast.id);
            }
        }

        let rendered = render(view);
        let changed = self.last_view.as_ref().is_none_or(|last| {
            last.status_label != rendered.status_label
                || last.status_indicator != rendered.status_indicator
                || panel_hints(last) != panel_hints(&rendered)
        });
        if changed {
            renderer.print_status(&rendered);
            renderer.print_panels(&rendered);
        }
        self.last_view = Some(rendered.clone());
        rendered
    }
}

#[cfg(test)]
mod tests {
    use tokio::time::Instant;

    use super::*;
    use crate::types::{ChatReply, InputType, LoanStatus};
    use crate::view::{LoanSummary, UiState};

    #[derive(Default)]
    struct Recorder {
        lines: Vec<String>,
    }

    impl Renderer for Recorder {
        fn print_message(&mut self, message: &Message) {
            self.lines.push(format!("msg {}", message.content));
        }

        fn print_toast(&mut self, toast: &Toast) {
            self.lines.push(format!("toast {}", toast.message));
        }

        fn print_status(&mut self, view: &RenderedView) {
            self.lines.push(format!("status {}", view.status_label));
        }

        fn print_panels(&mut self, view: &RenderedView) {
            for hint in panel_hints(view) {
                self.lines.push(format!("panel {}", hint.trim()));
            }
        }

        fn print_error(&mut self, error: &str) {
            self.lines.push(format!("error {error}"));
        }

        fn print_info(&mut self, info: &str) {
            self.lines.push(format!("info {info}"));
        }
    }

    fn empty_view() -> ChatView {
        ChatView {
            session_id: "session_test_2".to_string(),
            messages: Vec::new(),
            ui: UiState::new(),
            input: String::new(),
            toasts: Vec::new(),
            loan: LoanSummary::default(),
        }
    }

    fn toast(id: u64, message: &str) -> Toast {
        Toast {
            id,
            message: message.to_string(),
            severity: Severity::Info,
            created_at: Instant::now(),
        }
    }

    #[test]
    fn renderer_default_has_color() {
        let renderer = PlainTextRenderer::new();
        assert!(renderer.use_color);
    }

    #[test]
    fn plain_formatting() {
        let renderer = PlainTextRenderer::with_color(false);
        let message = Message {
            content: "Hello".to_string(),
            sender: Sender::User,
            timestamp: "09:30".to_string(),
        };
        assert_eq!(renderer.format_message(&message), "[09:30] You: Hello");
        let mut t = toast(0, "File uploaded successfully!");
        t.severity = Severity::Success;
        assert_eq!(renderer.format_toast(&t), "[ok] File uploaded successfully!");

        let mut view = empty_view();
        view.ui.loan_status = LoanStatus::Completed;
        assert_eq!(
            renderer.format_status(&render(&view)),
            "Status: Approved (Completed)"
        );
    }

    #[test]
    fn colored_error_toast() {
        let renderer = PlainTextRenderer::with_color(true);
        let mut t = toast(0, "Upload failed");
        t.severity = Severity::Error;
        assert_eq!(
            renderer.format_toast(&t),
            format!("{ANSI_RED}[error] Upload failed{ANSI_RESET}")
        );
    }

    #[test]
    fn hints_follow_panels() {
        let mut ui = UiState::new();
        ui.apply_reply(
            &ChatReply::new("Please upload your salary slip", LoanStatus::Verification)
                .with_input("phone"),
        );
        let mut view = empty_view();
        view.ui = ui;
        let hints = panel_hints(&render(&view));
        assert_eq!(hints.len(), 2);
        assert!(hints[0].contains(&InputType::Phone.to_string()));
        assert!(hints[1].contains("/upload"));
    }

    #[test]
    fn presenter_prints_each_item_once() {
        let mut presenter = Presenter::new();
        let mut out = Recorder::default();
        let mut view = empty_view();

        presenter.present(&view, &mut out);
        assert_eq!(out.lines, vec!["status Getting Started"]);
        out.lines.clear();

        view.messages.push(Message::user("Hello"));
        view.messages.push(Message::bot("Hi"));
        view.toasts.push(toast(0, "one"));
        presenter.present(&view, &mut out);
        assert_eq!(out.lines, vec!["msg Hello", "msg Hi", "toast one"]);
        out.lines.clear();

        view.toasts.push(toast(1, "two"));
        view.ui.apply_reply(&ChatReply::new("Your sanction letter", LoanStatus::Completed));
        presenter.present(&view, &mut out);
        assert_eq!(
            out.lines,
            vec![
                "toast two",
                "status Approved",
                "panel your sanction letter is ready: /download"
            ]
        );
        out.lines.clear();

        presenter.present(&view, &mut out);
        assert!(out.lines.is_empty());
    }
}
