use biometrics::{Collector, Counter, Moments};

pub(crate) static CHAT_REQUESTS: Counter = Counter::new("loanchat.chat.requests");
pub(crate) static CHAT_REQUEST_ERRORS: Counter = Counter::new("loanchat.chat.request_errors");
pub(crate) static CHAT_SKIPPED: Counter = Counter::new("loanchat.chat.skipped");
pub(crate) static CHAT_REQUEST_DURATION: Moments =
    Moments::new("loanchat.chat.request_duration_seconds");

pub(crate) static UPLOADS: Counter = Counter::new("loanchat.upload.requests");
pub(crate) static UPLOAD_REJECTED: Counter = Counter::new("loanchat.upload.rejected");
pub(crate) static UPLOAD_ERRORS: Counter = Counter::new("loanchat.upload.errors");
pub(crate) static UPLOAD_BYTES: Counter = Counter::new("loanchat.upload.bytes");

pub(crate) static DOWNLOADS: Counter = Counter::new("loanchat.download.requests");
pub(crate) static DOWNLOAD_ERRORS: Counter = Counter::new("loanchat.download.errors");
pub(crate) static DOWNLOAD_BYTES: Counter = Counter::new("loanchat.download.bytes");

pub(crate) static TOASTS: Counter = Counter::new("loanchat.toasts");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&CHAT_REQUESTS);
    collector.register_counter(&CHAT_REQUEST_ERRORS);
    collector.register_counter(&CHAT_SKIPPED);
    collector.register_moments(&CHAT_REQUEST_DURATION);

    collector.register_counter(&UPLOADS);
    collector.register_counter(&UPLOAD_REJECTED);
    collector.register_counter(&UPLOAD_ERRORS);
    collector.register_counter(&UPLOAD_BYTES);

    collector.register_counter(&DOWNLOADS);
    collector.register_counter(&DOWNLOAD_ERRORS);
    collector.register_counter(&DOWNLOAD_BYTES);

    collector.register_counter(&TOASTS);
}
