//! # tolk-core
//!
//! Core types, traits, configuration, and error handling shared by the
//! Tolk crates.

pub mod config;
pub mod error;
pub mod locale;
pub mod traits;

pub use config::shellexpand;
pub use error::TolkError;
pub use locale::{Locale, LocaleSet};
