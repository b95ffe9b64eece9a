use thiserror::Error;

/// Failure raised by, or injected into, a demonstration producer.
#[derive(Debug, Error)]
pub enum DemoError {
    /// The closure handed to the blocking sequence failed.
    #[error("producer closure failed")]
    ClosureFailed,

    /// An article fetch did not complete.
    #[error("fetch of article `{article}` failed")]
    Fetch {
        article: String,
        source: reqwest::Error,
    },
}
