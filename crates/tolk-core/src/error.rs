use thiserror::Error;

/// Top-level error type for Tolk.
#[derive(Debug, Error)]
pub enum TolkError {
    /// The base-locale accessor was called without text.
    #[error("invalid argument: text for base locale '{locale}' is required")]
    InvalidArgument { locale: String },

    /// A locale accessor was called on a result that already collapsed to a string.
    #[error("invalid operation: cannot attach '{locale}' to a resolved string")]
    InvalidOperation { locale: String },

    /// A label map is missing an entry for a domain key.
    #[error("missing translation for label '{key}'")]
    MissingTranslation { key: String },

    /// A label chain does not cover every configured locale.
    #[error("incomplete translation for label '{key}': missing {missing:?}")]
    IncompleteTranslation { key: String, missing: Vec<String> },

    /// A locale outside the configured set.
    #[error("unknown locale: {0}")]
    UnknownLocale(String),

    /// The configured locale set is unusable.
    #[error("invalid locale set: {0}")]
    InvalidLocaleSet(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Error from a storage adapter.
    #[error("storage error: {0}")]
    Storage(String),

    /// Error from a locale detector.
    #[error("detector error: {0}")]
    Detector(String),

    /// Error raised by a locale-change subscriber.
    #[error("subscriber error: {0}")]
    Subscriber(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
