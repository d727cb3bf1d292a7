//! Locale detectors for the usual host signals.
//!
//! Detectors that read free-form language tags (environment variables,
//! browser language lists) map them onto the configured [`LocaleSet`] with
//! exact-then-prefix matching. The stored preference and URL parameter are
//! passed through verbatim; the resolver rejects anything unsupported.

use std::sync::Arc;

use tolk_core::traits::{LocaleDetector, Storage};
use tolk_core::{LocaleSet, TolkError};
use tracing::debug;

/// Environment variables consulted by [`EnvDetector`], in precedence order.
pub const LOCALE_ENV_VARS: [&str; 4] = ["LANGUAGE", "LC_ALL", "LC_MESSAGES", "LANG"];

/// Previously persisted preference.
pub struct StorageDetector {
    storage: Arc<dyn Storage>,
    key: String,
}

impl StorageDetector {
    pub fn new(storage: Arc<dyn Storage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }
}

impl LocaleDetector for StorageDetector {
    fn name(&self) -> &str {
        "storage"
    }

    fn detect(&self) -> Result<Option<String>, TolkError> {
        self.storage.get_item(&self.key)
    }
}

/// A query parameter of the current URL, e.g. `?lang=no`.
pub struct QueryParamDetector {
    url: String,
    param: String,
}

impl QueryParamDetector {
    pub fn new(url: impl Into<String>, param: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            param: param.into(),
        }
    }
}

impl LocaleDetector for QueryParamDetector {
    fn name(&self) -> &str {
        "query"
    }

    fn detect(&self) -> Result<Option<String>, TolkError> {
        Ok(query_param(&self.url, &self.param).filter(|v| !v.is_empty()))
    }
}

/// Decoded value of the first `param` in `url`'s query string.
pub fn query_param(url: &str, param: &str) -> Option<String> {
    let query = url.split_once('?')?.1;
    let query = query.split('#').next().unwrap_or(query);
    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        if decode(key) == param {
            Some(decode(value))
        } else {
            None
        }
    })
}

fn decode(component: &str) -> String {
    let spaced = component.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|s| s.into_owned())
        .unwrap_or(spaced)
}

type EnvLookup = Box<dyn Fn(&str) -> Option<String>>;
type SystemLookup = Box<dyn Fn() -> Option<String>>;

/// Host locale: the POSIX environment (`LANGUAGE`, `LC_ALL`, `LC_MESSAGES`,
/// `LANG`), then the operating system's preferred locale.
///
/// The first non-empty variable decides. `LANGUAGE` may hold a colon list;
/// its first supported entry is used. The system locale covers hosts that set
/// none of the variables (macOS, Windows).
pub struct EnvDetector {
    locales: Arc<LocaleSet>,
    lookup: EnvLookup,
    system: SystemLookup,
}

impl EnvDetector {
    /// Read the process environment and the system locale.
    pub fn new(locales: Arc<LocaleSet>) -> Self {
        Self::with_lookup(locales, |var| std::env::var(var).ok())
            .with_system_locale(sys_locale::get_locale)
    }

    /// Read variables through `lookup` instead of the process environment.
    /// The system locale is not consulted unless set with
    /// [`with_system_locale`](Self::with_system_locale).
    pub fn with_lookup<F>(locales: Arc<LocaleSet>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + 'static,
    {
        Self {
            locales,
            lookup: Box::new(lookup),
            system: Box::new(|| None),
        }
    }

    /// Fall back to `system` when no variable is set.
    pub fn with_system_locale<F>(mut self, system: F) -> Self
    where
        F: Fn() -> Option<String> + 'static,
    {
        self.system = Box::new(system);
        self
    }

    /// First supported tag, else the first tag verbatim.
    fn propose(&self, value: &str) -> Option<String> {
        let tags: Vec<&str> = value
            .split(':')
            .map(str::trim)
            .filter(|t| !t.is_empty() && *t != "C" && *t != "POSIX")
            .collect();
        let first = tags.first()?;
        let found = tags.iter().find_map(|t| self.locales.match_tag(t));
        Some(found.unwrap_or(*first).to_string())
    }
}

impl LocaleDetector for EnvDetector {
    fn name(&self) -> &str {
        "env"
    }

    fn detect(&self) -> Result<Option<String>, TolkError> {
        for var in LOCALE_ENV_VARS {
            let Some(value) = (self.lookup)(var) else {
                continue;
            };
            if let Some(locale) = self.propose(&value) {
                return Ok(Some(locale));
            }
        }
        let system = (self.system)();
        if let Some(raw) = &system {
            debug!("no locale variable set, system locale is '{raw}'");
        }
        Ok(system.and_then(|raw| self.propose(&raw)))
    }
}

/// Browser-reported languages, either as an ordered list (`navigator.languages`)
/// or as an `Accept-Language` header.
pub struct NavigatorDetector {
    locales: Arc<LocaleSet>,
    languages: Vec<String>,
}

impl NavigatorDetector {
    /// Languages in preference order.
    pub fn from_languages<I, S>(locales: Arc<LocaleSet>, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            locales,
            languages: languages.into_iter().map(Into::into).collect(),
        }
    }

    /// Languages from an `Accept-Language` header, ordered by q-weight.
    pub fn from_accept_language(locales: Arc<LocaleSet>, header: &str) -> Self {
        Self::from_languages(locales, parse_accept_language(header))
    }
}

impl LocaleDetector for NavigatorDetector {
    fn name(&self) -> &str {
        "navigator"
    }

    fn detect(&self) -> Result<Option<String>, TolkError> {
        Ok(self
            .languages
            .iter()
            .find_map(|lang| self.locales.match_tag(lang))
            .map(String::from))
    }
}

/// Parse an `Accept-Language` header into tags ordered by descending
/// q-weight. Ties keep header order; `q=0` and `*` are dropped.
pub fn parse_accept_language(header: &str) -> Vec<String> {
    let mut weighted: Vec<(String, f32)> = header
        .split(',')
        .filter_map(|part| {
            let mut pieces = part.split(';');
            let tag = pieces.next()?.trim();
            if tag.is_empty() || tag == "*" {
                return None;
            }
            let q = pieces
                .find_map(|p| {
                    let (name, value) = p.split_once('=')?;
                    name.trim().eq_ignore_ascii_case("q").then_some(value)
                })
                .and_then(|q| q.trim().parse::<f32>().ok())
                .unwrap_or(1.0);
            (q > 0.0).then(|| (tag.to_string(), q))
        })
        .collect();
    weighted.sort_by(|a, b| b.1.total_cmp(&a.1));
    weighted.into_iter().map(|(tag, _)| tag).collect()
}

/// A detector backed by a closure.
pub struct FnDetector {
    name: String,
    detect: Box<dyn Fn() -> Option<String>>,
}

impl FnDetector {
    pub fn new<F>(name: impl Into<String>, detect: F) -> Self
    where
        F: Fn() -> Option<String> + 'static,
    {
        Self {
            name: name.into(),
            detect: Box::new(detect),
        }
    }
}

impl LocaleDetector for FnDetector {
    fn name(&self) -> &str {
        &self.name
    }

    fn detect(&self) -> Result<Option<String>, TolkError> {
        Ok((self.detect)())
    }
}
