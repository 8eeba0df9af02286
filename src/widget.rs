//! The chat client controller.
//!
//! [`ChatClient`] owns the transcript, the [`UiState`], the input draft and
//! the toast tray for one session, and drives them from user actions and
//! server replies.  Front ends read it through [`ChatClient::snapshot`] and
//! render with [`crate::view::render`].

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::time::Instant;

use crate::client::LoanApi;
use crate::error::{Error, Result};
use crate::observability::{CHAT_SKIPPED, UPLOAD_REJECTED};
use crate::session::SessionId;
use crate::toast::{Severity, ToastTray};
use crate::types::{ChatRequest, InputType, Message, UploadedFile};
use crate::view::{ChatView, LoanSummary, UiState};

/// Delay between a successful upload and the follow-up chat turn.
pub const UPLOAD_CONTINUATION_DELAY: Duration = Duration::from_secs(1);

const CHAT_APOLOGY: &str = "Sorry, I encountered an error. Please try again.";
const CHAT_FAILED: &str = "Error occurred while processing your request";
const UPLOAD_SUCCEEDED: &str = "File uploaded successfully!";
const UPLOAD_FAILED: &str = "Upload failed";
const UPLOAD_FAILED_RETRY: &str = "Upload failed. Please try again.";
const UPLOAD_BUSY: &str = "Please wait for the current request to finish";
const DOWNLOAD_SUCCEEDED: &str = "Sanction letter downloaded successfully!";
const DOWNLOAD_FAILED: &str = "Download failed. Please try again.";

/// What became of a user action.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// Preconditions were not met; nothing was sent.
    Skipped,
    /// The request succeeded.
    Completed,
    /// The request failed.  The user has already been told.
    Failed(Error),
}

impl Outcome {
    /// Returns true for [`Outcome::Completed`].
    pub fn is_completed(&self) -> bool {
        matches!(self, Outcome::Completed)
    }

    /// Returns true for [`Outcome::Skipped`].
    pub fn is_skipped(&self) -> bool {
        matches!(self, Outcome::Skipped)
    }

    /// The error, for [`Outcome::Failed`].
    pub fn error(&self) -> Option<&Error> {
        match self {
            Outcome::Failed(err) => Some(err),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
struct ClientState {
    messages: Vec<Message>,
    ui: UiState,
    input: String,
    toasts: ToastTray,
    loan: LoanSummary,
}

/// Holds the loading flag for the duration of one request.
///
/// Dropping the guard clears the flag, so it is released on every exit path.
struct LoadingGuard<'a> {
    state: &'a Mutex<ClientState>,
}

impl<'a> LoadingGuard<'a> {
    /// Sets the loading flag, or returns `None` if it was already set.
    fn acquire(state: &'a Mutex<ClientState>) -> Option<Self> {
        let mut locked = lock(state);
        if locked.ui.is_loading {
            return None;
        }
        locked.ui.is_loading = true;
        Some(Self { state })
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        lock(self.state).ui.is_loading = false;
    }
}

fn lock(state: &Mutex<ClientState>) -> MutexGuard<'_, ClientState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Controller for one chat session.
///
/// All methods take `&self`; the state lock is never held across a request,
/// so a snapshot taken while a request is in flight shows the spinner.
pub struct ChatClient<A: LoanApi> {
    api: A,
    session_id: SessionId,
    download_dir: PathBuf,
    state: Mutex<ClientState>,
}

impl<A: LoanApi> ChatClient<A> {
    /// Creates a client with a freshly generated session id that saves
    /// downloads into the current directory.
    pub fn new(api: A) -> Self {
        Self::with_session(api, SessionId::generate())
    }

    /// Creates a client for an existing session id.
    pub fn with_session(api: A, session_id: SessionId) -> Self {
        Self {
            api,
            session_id,
            download_dir: PathBuf::from("."),
            state: Mutex::new(ClientState::default()),
        }
    }

    /// Sets the directory sanction letters are written to.
    pub fn with_download_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.download_dir = dir.into();
        self
    }

    /// The session this client belongs to.
    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// The transport.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Where the sanction letter for this session is saved.
    pub fn sanction_letter_path(&self) -> PathBuf {
        self.download_dir
            .join(format!("sanction_letter_{}.pdf", self.session_id))
    }

    /// Replaces the input draft.
    pub fn set_input(&self, text: impl Into<String>) {
        lock(&self.state).input = text.into();
    }

    /// The input draft.
    pub fn input(&self) -> String {
        lock(&self.state).input.clone()
    }

    /// Returns true while a chat or upload request is in flight.
    pub fn is_loading(&self) -> bool {
        lock(&self.state).ui.is_loading
    }

    /// Switches the input mode by hand.
    pub fn set_input_type(&self, input_type: InputType) {
        lock(&self.state).ui.set_input_type(input_type);
    }

    /// Raises a toast.
    pub fn show_toast(&self, message: impl Into<String>, severity: Severity) {
        lock(&self.state)
            .toasts
            .push(message, severity, Instant::now());
    }

    /// A consistent copy of everything the client displays right now.
    pub fn snapshot(&self) -> ChatView {
        let mut state = lock(&self.state);
        let now = Instant::now();
        state.toasts.prune(now);
        ChatView {
            session_id: self.session_id.to_string(),
            messages: state.messages.clone(),
            ui: state.ui.clone(),
            input: state.input.clone(),
            toasts: state.toasts.visible(now),
            loan: state.loan.clone(),
        }
    }

    /// Sends whatever is in the input draft.
    pub async fn send_input(&self) -> Outcome {
        let text = self.input();
        self.send_message(&text).await
    }

    /// Sends one user turn and applies the reply.
    ///
    /// Skipped when `text` is blank or a request is already in flight.
    pub async fn send_message(&self, text: &str) -> Outcome {
        let text = text.trim();
        if text.is_empty() {
            CHAT_SKIPPED.click();
            return Outcome::Skipped;
        }
        let Some(_loading) = LoadingGuard::acquire(&self.state) else {
            CHAT_SKIPPED.click();
            return Outcome::Skipped;
        };
        {
            let mut state = lock(&self.state);
            state.messages.push(Message::user(text));
            state.input.clear();
        }

        let request = ChatRequest::new(text, self.session_id.as_str());
        let result = self.api.chat(&request).await;

        let mut state = lock(&self.state);
        match result {
            Ok(reply) => {
                state.messages.push(Message::bot(reply.response.clone()));
                state.ui.apply_reply(&reply);
                Outcome::Completed
            }
            Err(err) => {
                state.messages.push(Message::bot(CHAT_APOLOGY));
                state.toasts.push(CHAT_FAILED, Severity::Error, Instant::now());
                Outcome::Failed(err)
            }
        }
    }

    /// Validates and uploads a document, then continues the conversation.
    ///
    /// After a successful upload the client waits
    /// [`UPLOAD_CONTINUATION_DELAY`] and sends the current input draft, which
    /// is a no-op if the draft is blank.
    pub async fn handle_file_upload(&self, file: UploadedFile) -> Outcome {
        if let Err(err) = file.validate() {
            UPLOAD_REJECTED.click();
            self.show_toast(validation_message(&err), Severity::Error);
            return Outcome::Failed(err);
        }
        let Some(loading) = LoadingGuard::acquire(&self.state) else {
            self.show_toast(UPLOAD_BUSY, Severity::Info);
            return Outcome::Skipped;
        };

        let result = self.api.upload(self.session_id.as_str(), &file).await;
        {
            let mut state = lock(&self.state);
            let now = Instant::now();
            match &result {
                Ok(_) => {
                    state.toasts.push(UPLOAD_SUCCEEDED, Severity::Success, now);
                    state
                        .messages
                        .push(Message::user(format!("File uploaded: {}", file.name)));
                }
                Err(err) if err.is_api() => {
                    let message = err.server_message().unwrap_or(UPLOAD_FAILED).to_string();
                    state.toasts.push(message, Severity::Error, now);
                }
                Err(_) => {
                    state.toasts.push(UPLOAD_FAILED_RETRY, Severity::Error, now);
                }
            }
        }
        drop(loading);

        match result {
            Ok(_) => {
                tokio::time::sleep(UPLOAD_CONTINUATION_DELAY).await;
                self.send_input().await;
                Outcome::Completed
            }
            Err(err) => Outcome::Failed(err),
        }
    }

    /// Reads `path` and uploads it.
    ///
    /// A file that cannot be read is reported with the generic upload
    /// failure toast.
    pub async fn upload_path(&self, path: impl AsRef<Path>) -> Outcome {
        match UploadedFile::from_path(path).await {
            Ok(file) => self.handle_file_upload(file).await,
            Err(err) => {
                self.show_toast(UPLOAD_FAILED_RETRY, Severity::Error);
                Outcome::Failed(err)
            }
        }
    }

    /// Fetches the sanction letter and saves it as
    /// `sanction_letter_{session_id}.pdf` in the download directory.
    pub async fn download_sanction_letter(&self) -> Outcome {
        match self.fetch_and_save().await {
            Ok(_) => {
                self.show_toast(DOWNLOAD_SUCCEEDED, Severity::Success);
                Outcome::Completed
            }
            Err(err) => {
                self.show_toast(DOWNLOAD_FAILED, Severity::Error);
                Outcome::Failed(err)
            }
        }
    }

    async fn fetch_and_save(&self) -> Result<PathBuf> {
        let bytes = self.api.download(self.session_id.as_str()).await?;
        let path = self.sanction_letter_path();
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|err| Error::io(format!("failed to write {}", path.display()), err))?;
        Ok(path)
    }
}

fn validation_message(err: &Error) -> String {
    match err {
        Error::Validation { message, .. } => message.clone(),
        other => other.to_string(),
    }
}
