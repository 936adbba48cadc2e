use std::error::Error;

/// Receives errors that were redacted from the response
///
/// The normalization layer reports every error it converts into a server
/// fault here, with the original value intact, so operators keep the
/// detail that clients are not shown. Implementations must not panic.
pub trait ErrorSink: Send + Sync {
    /// Record an error that produced a server-fault response
    fn unknown_error(&self, error: &(dyn Error + 'static));
}

/// Default sink that emits a `tracing` event at error level
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ErrorSink for TracingSink {
    fn unknown_error(&self, error: &(dyn Error + 'static)) {
        tracing::error!(error = %error, "unknown error");
    }
}
