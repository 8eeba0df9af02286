// Public modules
pub mod chat;
pub mod client;
pub mod client_logger;
pub mod error;
pub mod render;
pub mod session;
pub mod toast;
pub mod types;
pub mod utils;
pub mod view;
pub mod widget;

mod observability;

// Re-exports
pub use client::{DEFAULT_SERVER_URL, LoanApi, LoanServer};
pub use client_logger::ClientLogger;
pub use error::{Error, Result};
pub use observability::register_biometrics;
pub use session::SessionId;
pub use toast::{Severity, TOAST_LIFETIME, Toast, ToastTray};
pub use types::*;
pub use view::{ChatView, IndicatorColor, LoanSummary, RenderedView, UiState, render};
pub use widget::{ChatClient, Outcome, UPLOAD_CONTINUATION_DELAY};
