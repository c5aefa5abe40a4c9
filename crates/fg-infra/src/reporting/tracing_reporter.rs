use fg_core::ports::FeedErrorReporterPort;
use fg_core::{FeedError, FeedErrorKind};
use tracing::{info, warn};

/// Forwards feed failures to the tracing pipeline.
///
/// An empty result is an expected outcome and logs at `info`; everything
/// else logs at `warn`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingErrorReporter;

impl TracingErrorReporter {
    pub fn new() -> Self {
        Self
    }
}

impl FeedErrorReporterPort for TracingErrorReporter {
    fn report(&self, context: &str, error: &FeedError) {
        let kind = error.kind();
        let retryable = error.is_retryable();
        match kind {
            FeedErrorKind::EmptyResult => {
                info!(context, ?kind, error = %error, "Feed returned no results")
            }
            _ => warn!(context, ?kind, retryable, error = %error, "Feed operation failed"),
        }
    }
}
