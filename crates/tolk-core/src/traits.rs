use crate::error::TolkError;

/// Key/value persistence for the current locale.
///
/// Every host environment (process memory, a JSON file on disk, a browser's
/// local storage bridge) implements this trait. The store only ever touches
/// the configured locale key.
pub trait Storage: Send + Sync {
    /// Human-readable adapter name.
    fn name(&self) -> &str;

    /// Read a value, `None` when nothing is stored under `key`.
    fn get_item(&self, key: &str) -> Result<Option<String>, TolkError>;

    /// Write a value. Errors propagate to the caller of `change_locale`.
    fn set_item(&self, key: &str, value: &str) -> Result<(), TolkError>;
}

/// Strategy proposing an initial locale from some external signal.
///
/// Detectors only read external state. `Ok(None)` means "no opinion";
/// an `Err` is a hard failure and aborts store initialization.
pub trait LocaleDetector {
    /// Human-readable detector name, used in logs.
    fn name(&self) -> &str;

    /// Propose a locale, or `None`.
    fn detect(&self) -> Result<Option<String>, TolkError>;
}
