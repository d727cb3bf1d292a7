//! # tolk-chain
//!
//! Fluent translation chains seeded with base-locale text, resolved lazily
//! against the locale of the [`Translator`] that produced them, plus label
//! sets for closed enumerated domains.

pub mod chain;
pub mod label;
mod macros;

pub use chain::{Chain, Translation, Translator};
pub use label::{Domain, DomainEntry, LabelDomain, Labels};
pub use tolk_core::TolkError;
