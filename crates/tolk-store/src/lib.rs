//! # tolk-store
//!
//! Initial locale detection and the mutable store that owns the current
//! locale, its chain producer, and its labels.

pub mod resolver;
pub mod store;

pub use resolver::resolve_initial_locale;
pub use store::{Session, StoreBuilder, TranslationStore, DEFAULT_STORAGE_KEY};
