//! Logging trait for loan server exchanges.
//!
//! This module provides the [`ClientLogger`] trait that allows users to capture
//! and log every request passing through the [`LoanServer`](crate::LoanServer)
//! transport.

use crate::error::Error;
use crate::types::{ChatReply, ChatRequest};

/// A trait for logging loan server operations.
///
/// Implement this trait to capture and record every HTTP exchange the client
/// makes, successful or not.
///
/// # Example
///
/// ```rust,ignore
/// use loanchat::{ChatReply, ChatRequest, ClientLogger, Error};
/// use std::io::Write;
/// use std::sync::Mutex;
///
/// struct FileLogger {
///     file: Mutex<std::fs::File>,
/// }
///
/// impl ClientLogger for FileLogger {
///     fn log_chat(&self, request: &ChatRequest, reply: Result<&ChatReply, &Error>) {
///         let mut file = self.file.lock().unwrap();
///         writeln!(file, "chat {:?} -> {:?}", request, reply).unwrap();
///     }
/// }
/// ```
pub trait ClientLogger: Send + Sync {
    /// Log one chat turn and what came back.
    fn log_chat(&self, request: &ChatRequest, reply: Result<&ChatReply, &Error>);

    /// Log the result of an upload.
    ///
    /// Called once per `upload` with the file name and size that were sent.
    fn log_upload(&self, session_id: &str, file_name: &str, size: u64, result: Result<(), &Error>) {
        _ = (session_id, file_name, size, result);
    }

    /// Log the result of a sanction-letter download.
    ///
    /// On success `result` carries the number of bytes received.
    fn log_download(&self, session_id: &str, result: Result<u64, &Error>) {
        _ = (session_id, result);
    }
}
