use crate::feed::FeedError;

/// Sink for classified failures, decoupled from any output.
pub trait FeedErrorReporterPort: Send + Sync {
    fn report(&self, context: &str, error: &FeedError);
}
