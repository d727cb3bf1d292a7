//! Translation chains: immutable locale → text maps resolved lazily.
//!
//! # Invariants
//!
//! 1. **Base is seeded**: every chain holds text for the base locale from
//!    the moment [`Translator::chain`] creates it, so resolution never fails.
//!
//! 2. **Attach never mutates**: [`Translation::with`] returns a new value and
//!    leaves the receiver untouched, so an incomplete chain can be reused as
//!    the prefix of several others.
//!
//! 3. **Keys are unique**: attaching a locale twice overwrites the first text.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | `UnknownLocale` | locale outside the configured set | attach rejected |
//! | `InvalidArgument` | base locale attached with `None` | attach rejected |
//! | `InvalidOperation` | attach on a collapsed [`Translation::Text`] | attach rejected |
//! | `None` text for a non-base locale | caller opted out | no entry, base fallback |

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Add;
use std::sync::Arc;

use tolk_core::{Locale, LocaleSet, TolkError};

/// What every chain produced by one [`Translator`] shares.
#[derive(Debug)]
struct Scope {
    locales: Arc<LocaleSet>,
    current: Locale,
    return_primitive: bool,
}

/// Chain producer bound to one current locale.
///
/// A new translator is created on every locale change; chains keep the
/// locale of the translator that seeded them.
#[derive(Debug, Clone)]
pub struct Translator {
    scope: Arc<Scope>,
}

impl Translator {
    /// Create a producer resolving against `current`.
    pub fn new(
        locales: Arc<LocaleSet>,
        current: &str,
        return_primitive: bool,
    ) -> Result<Self, TolkError> {
        if !locales.contains(current) {
            return Err(TolkError::UnknownLocale(current.to_string()));
        }
        Ok(Self {
            scope: Arc::new(Scope {
                locales,
                current: current.to_string(),
                return_primitive,
            }),
        })
    }

    /// Start a chain seeded with base-locale text.
    pub fn chain(&self, base_text: impl Into<String>) -> Translation {
        let mut entries = BTreeMap::new();
        entries.insert(self.scope.locales.base().to_string(), base_text.into());
        Translation::Chain(Chain {
            scope: Arc::clone(&self.scope),
            entries: Arc::new(entries),
        })
    }

    /// The locale chains from this producer resolve against.
    pub fn locale(&self) -> &str {
        &self.scope.current
    }

    /// The configured locale set.
    pub fn locales(&self) -> &LocaleSet {
        &self.scope.locales
    }

    /// Whether completing a chain collapses it into a plain string.
    pub fn return_primitive(&self) -> bool {
        self.scope.return_primitive
    }
}

/// An accumulating locale → text map.
#[derive(Debug, Clone)]
pub struct Chain {
    scope: Arc<Scope>,
    entries: Arc<BTreeMap<Locale, String>>,
}

impl Chain {
    /// Text attached for `locale`, if any.
    pub fn get(&self, locale: &str) -> Option<&str> {
        self.entries.get(locale).map(String::as_str)
    }

    /// Whether every configured locale has an entry.
    pub fn is_complete(&self) -> bool {
        self.scope
            .locales
            .iter()
            .all(|l| self.entries.contains_key(l))
    }

    /// Configured locales that have no entry yet, in configured order.
    pub fn missing_locales(&self) -> Vec<&str> {
        self.scope
            .locales
            .iter()
            .filter(|l| !self.entries.contains_key(*l))
            .collect()
    }

    /// Resolve against the locale this chain is bound to.
    pub fn resolve(&self) -> &str {
        self.resolve_for(&self.scope.current)
    }

    /// Resolve against an arbitrary locale, falling back to the base text.
    pub fn resolve_for(&self, locale: &str) -> &str {
        self.entries
            .get(locale)
            .or_else(|| self.entries.get(self.scope.locales.base()))
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// The locale this chain resolves against.
    pub fn locale(&self) -> &str {
        &self.scope.current
    }

    /// Iterate over attached `(locale, text)` pairs.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(l, t)| (l.as_str(), t.as_str()))
    }

    fn attach(&self, locale: &str, text: Option<&str>) -> Result<Chain, TolkError> {
        let locales = &self.scope.locales;
        if !locales.contains(locale) {
            return Err(TolkError::UnknownLocale(locale.to_string()));
        }
        let Some(text) = text else {
            if locales.is_base(locale) {
                return Err(TolkError::InvalidArgument {
                    locale: locale.to_string(),
                });
            }
            return Ok(self.clone());
        };
        let mut entries = (*self.entries).clone();
        entries.insert(locale.to_string(), text.to_string());
        Ok(Chain {
            scope: Arc::clone(&self.scope),
            entries: Arc::new(entries),
        })
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.resolve())
    }
}

/// Result of seeding or extending a chain.
///
/// `Text` only appears when the producer collapses complete chains
/// (`return_primitive`); it is the resolved string and accepts no further
/// locales.
#[derive(Debug, Clone)]
pub enum Translation {
    /// Still chainable.
    Chain(Chain),
    /// Collapsed to its resolved string.
    Text(String),
}

impl Translation {
    /// Attach text for `locale`, returning a new translation.
    ///
    /// `None` for a non-base locale is a no-op that still allows chaining.
    pub fn with<'a>(
        &self,
        locale: &str,
        text: impl Into<Option<&'a str>>,
    ) -> Result<Translation, TolkError> {
        let chain = match self {
            Self::Chain(chain) => chain,
            Self::Text(_) => {
                return Err(TolkError::InvalidOperation {
                    locale: locale.to_string(),
                })
            }
        };
        let next = chain.attach(locale, text.into())?;
        if next.scope.return_primitive && next.is_complete() {
            return Ok(Self::Text(next.resolve().to_string()));
        }
        Ok(Self::Chain(next))
    }

    /// The resolved string for the bound locale.
    pub fn resolve(&self) -> &str {
        match self {
            Self::Chain(chain) => chain.resolve(),
            Self::Text(text) => text,
        }
    }

    /// Whether every configured locale is covered. Collapsed text always is.
    pub fn is_complete(&self) -> bool {
        match self {
            Self::Chain(chain) => chain.is_complete(),
            Self::Text(_) => true,
        }
    }

    /// Configured locales still missing; empty once collapsed.
    pub fn missing_locales(&self) -> Vec<&str> {
        match self {
            Self::Chain(chain) => chain.missing_locales(),
            Self::Text(_) => Vec::new(),
        }
    }

    /// Whether this translation collapsed to a plain string.
    pub fn is_collapsed(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    /// The underlying chain, unless collapsed.
    pub fn as_chain(&self) -> Option<&Chain> {
        match self {
            Self::Chain(chain) => Some(chain),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Display for Translation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.resolve())
    }
}

impl From<Translation> for String {
    fn from(t: Translation) -> Self {
        match t {
            Translation::Chain(chain) => chain.resolve().to_string(),
            Translation::Text(text) => text,
        }
    }
}

impl PartialEq for Translation {
    fn eq(&self, other: &Self) -> bool {
        self.resolve() == other.resolve()
    }
}

impl PartialEq<str> for Translation {
    fn eq(&self, other: &str) -> bool {
        self.resolve() == other
    }
}

impl PartialEq<&str> for Translation {
    fn eq(&self, other: &&str) -> bool {
        self.resolve() == *other
    }
}

impl PartialEq<String> for Translation {
    fn eq(&self, other: &String) -> bool {
        self.resolve() == other
    }
}

impl PartialEq<Translation> for str {
    fn eq(&self, other: &Translation) -> bool {
        self == other.resolve()
    }
}

impl PartialEq<Translation> for &str {
    fn eq(&self, other: &Translation) -> bool {
        *self == other.resolve()
    }
}

impl PartialEq<Translation> for String {
    fn eq(&self, other: &Translation) -> bool {
        self == other.resolve()
    }
}

impl Add<&str> for &Translation {
    type Output = String;

    fn add(self, rhs: &str) -> String {
        let mut out = self.resolve().to_string();
        out.push_str(rhs);
        out
    }
}
