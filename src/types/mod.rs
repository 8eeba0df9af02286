// Public modules
pub mod chat_reply;
pub mod chat_request;
pub mod input_type;
pub mod loan_status;
pub mod message;
pub mod upload_reply;
pub mod uploaded_file;

// Re-exports
pub use chat_reply::ChatReply;
pub use chat_request::ChatRequest;
pub use input_type::{InputType, InputTypeParseError};
pub use loan_status::LoanStatus;
pub use message::{Message, Sender};
pub use upload_reply::{ErrorReply, UploadReply};
pub use uploaded_file::{ALLOWED_MIME_TYPES, MAX_UPLOAD_BYTES, UploadedFile, mime_type_for};
