mod tracing_reporter;

pub use tracing_reporter::TracingErrorReporter;
