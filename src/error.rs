use thiserror::Error;

/// Failures inside the page engine. None of these are fatal to the page:
/// each one degrades a single widget.
#[derive(Debug, Error)]
pub enum PageError {
    /// Metadata payload is not valid JSON.
    #[error("product metadata is not valid JSON: {0}")]
    MetadataParse(#[from] serde_json::Error),

    /// Metadata parsed but has no `offers` object to update.
    #[error("product metadata has no `offers` object")]
    MetadataShape,

    #[error("unknown timezone: {0}")]
    UnknownTimezone(String),

    /// A local wall-clock time could not be mapped to an instant.
    #[error("no valid instant for local time {0} in {1}")]
    UnresolvableLocalTime(String, String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("unknown command: {0:?}")]
    UnknownCommand(String),
}

pub type Result<T> = std::result::Result<T, PageError>;
