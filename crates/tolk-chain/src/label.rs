//! Display labels for closed enumerated domains.
//!
//! A [`Labels`] value is built from one complete translation per domain key
//! and stores the strings resolved for the translator's locale. It is rebuilt
//! on every locale change rather than re-resolved per lookup.

use std::collections::HashMap;
use std::fmt;

use tolk_core::TolkError;
use tracing::{debug, warn};

use crate::chain::Translation;

/// One member of a label domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainEntry {
    /// Key name (e.g. `"Active"`).
    pub key: String,
    /// Underlying value when it differs from the key (e.g. `"1"`).
    pub value: Option<String>,
}

impl DomainEntry {
    fn matches(&self, input: &str) -> bool {
        self.key == input || self.value.as_deref() == Some(input)
    }
}

/// Closed set of keys, optionally carrying code values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Domain {
    entries: Vec<DomainEntry>,
}

impl Domain {
    /// An empty domain.
    pub fn new() -> Self {
        Self::default()
    }

    /// A domain whose keys are their own values.
    pub fn keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        keys.into_iter()
            .fold(Self::new(), |d, key| d.entry(key, None::<String>))
    }

    /// A code/value domain: each key maps to a distinct underlying value.
    pub fn with_values<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        pairs
            .into_iter()
            .fold(Self::new(), |d, (key, value)| d.entry(key, Some(value)))
    }

    /// Append one entry.
    pub fn entry(mut self, key: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        self.entries.push(DomainEntry {
            key: key.into(),
            value: value.map(Into::into),
        });
        self
    }

    /// Iterate over entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &DomainEntry> {
        self.entries.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the domain has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// An enum (or other closed type) that describes its own label domain.
pub trait LabelDomain {
    /// The full domain, one entry per variant.
    fn domain() -> Domain;
}

/// Resolved per-key labels for one locale.
#[derive(Debug, Clone, Default)]
pub struct Labels {
    entries: Vec<(DomainEntry, String)>,
}

impl Labels {
    /// Build labels for `domain` from `(key, translation)` pairs.
    ///
    /// Every domain key needs a translation, and every translation must
    /// cover all configured locales. Pairs for keys outside the domain are
    /// ignored.
    pub fn new<I, K>(domain: &Domain, translations: I) -> Result<Self, TolkError>
    where
        I: IntoIterator<Item = (K, Translation)>,
        K: Into<String>,
    {
        let mut by_key: HashMap<String, Translation> = translations
            .into_iter()
            .map(|(k, t)| (k.into(), t))
            .collect();

        let mut entries = Vec::with_capacity(domain.len());
        for entry in domain.iter() {
            let Some(translation) = by_key.remove(&entry.key) else {
                return Err(TolkError::MissingTranslation {
                    key: entry.key.clone(),
                });
            };
            if !translation.is_complete() {
                return Err(TolkError::IncompleteTranslation {
                    key: entry.key.clone(),
                    missing: translation
                        .missing_locales()
                        .into_iter()
                        .map(String::from)
                        .collect(),
                });
            }
            entries.push((entry.clone(), String::from(translation)));
        }

        for extra in by_key.keys() {
            warn!("label translation for unknown key '{extra}' ignored");
        }
        debug!("built {} labels", entries.len());
        Ok(Self { entries })
    }

    /// Build labels for a type that knows its own domain.
    pub fn for_domain<D, I, K>(translations: I) -> Result<Self, TolkError>
    where
        D: LabelDomain,
        I: IntoIterator<Item = (K, Translation)>,
        K: Into<String>,
    {
        Self::new(&D::domain(), translations)
    }

    /// Label for a key name or underlying value.
    ///
    /// Unknown input falls back to its own string form.
    pub fn lookup(&self, input: impl fmt::Display) -> String {
        let input = input.to_string();
        self.entries
            .iter()
            .find(|(entry, _)| entry.matches(&input))
            .map(|(_, label)| label.clone())
            .unwrap_or(input)
    }

    /// Iterate over `(key, label)` pairs in domain order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(entry, label)| (entry.key.as_str(), label.as_str()))
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no labels.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::chain::Translator;
    use tolk_core::LocaleSet;

    fn translator(current: &str) -> Translator {
        let locales = Arc::new(LocaleSet::new(["en", "no"], "en").unwrap());
        Translator::new(locales, current, false).unwrap()
    }

    fn status_labels(tr: &Translator) -> Result<Labels, TolkError> {
        let domain = Domain::with_values([("Active", "1"), ("Inactive", "0")]);
        Labels::new(
            &domain,
            [
                ("Active", tr.chain("Active").with("no", "Aktiv")?),
                ("Inactive", tr.chain("Inactive").with("no", "Inaktiv")?),
            ],
        )
    }

    #[test]
    fn test_lookup_by_key_and_value() {
        let labels = status_labels(&translator("no")).unwrap();
        assert_eq!(labels.lookup("Active"), "Aktiv");
        assert_eq!(labels.lookup("0"), "Inaktiv");
        assert_eq!(labels.lookup(1), "Aktiv");
    }

    #[test]
    fn test_lookup_unknown_falls_back_to_input() {
        let labels = status_labels(&translator("no")).unwrap();
        assert_eq!(labels.lookup("Pending"), "Pending");
        assert_eq!(labels.lookup(42), "42");
    }

    #[test]
    fn test_labels_resolve_for_translator_locale() {
        let en = status_labels(&translator("en")).unwrap();
        assert_eq!(en.lookup("Active"), "Active");
        let pairs: Vec<_> = en.iter().collect();
        assert_eq!(pairs, vec![("Active", "Active"), ("Inactive", "Inactive")]);
    }

    #[test]
    fn test_missing_key_rejected() {
        let tr = translator("en");
        let domain = Domain::keys(["Draft", "Published"]);
        let err = Labels::new(
            &domain,
            [("Draft", tr.chain("Draft").with("no", "Utkast").unwrap())],
        )
        .unwrap_err();
        assert!(matches!(err, TolkError::MissingTranslation { ref key } if key == "Published"));
    }

    #[test]
    fn test_incomplete_translation_rejected() {
        let tr = translator("en");
        let domain = Domain::keys(["Draft"]);
        let err = Labels::new(&domain, [("Draft", tr.chain("Draft"))]).unwrap_err();
        match err {
            TolkError::IncompleteTranslation { key, missing } => {
                assert_eq!(key, "Draft");
                assert_eq!(missing, vec!["no".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_collapsed_translation_counts_as_complete() {
        let locales = Arc::new(LocaleSet::new(["en", "no"], "en").unwrap());
        let tr = Translator::new(locales, "no", true).unwrap();
        let domain = Domain::keys(["Draft"]);
        let labels =
            Labels::new(&domain, [("Draft", tr.chain("Draft").with("no", "Utkast").unwrap())])
                .unwrap();
        assert_eq!(labels.lookup("Draft"), "Utkast");
    }

    #[derive(Debug, Clone, Copy)]
    enum Priority {
        Low,
        High,
    }

    impl fmt::Display for Priority {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Self::Low => f.write_str("Low"),
                Self::High => f.write_str("High"),
            }
        }
    }

    impl LabelDomain for Priority {
        fn domain() -> Domain {
            Domain::keys(["Low", "High"])
        }
    }

    #[test]
    fn test_for_domain_with_enum_lookup() {
        let tr = translator("no");
        let labels = Labels::for_domain::<Priority, _, _>([
            ("Low", tr.chain("Low").with("no", "Lav").unwrap()),
            ("High", tr.chain("High").with("no", "Høy").unwrap()),
        ])
        .unwrap();
        assert_eq!(labels.lookup(Priority::High), "Høy");
        assert_eq!(labels.lookup(Priority::Low), "Lav");
        assert_eq!(labels.len(), 2);
    }
}
