//! Locale identifiers and the ordered set of supported locales.

use unic_langid::LanguageIdentifier;

use crate::error::TolkError;

/// Locale identifier (e.g. `"en"`, `"no"`, `"pt-BR"`).
///
/// Identifiers are opaque: they are compared verbatim everywhere except in
/// [`LocaleSet::match_tag`].
pub type Locale = String;

/// Ordered, duplicate-free set of supported locales with one base locale.
///
/// The base locale is the fallback for every resolution and the only locale
/// whose text is mandatory when a chain is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleSet {
    locales: Vec<Locale>,
    base: usize,
}

impl LocaleSet {
    /// Build a locale set, validating that it is non-empty, free of
    /// duplicates, and contains `base`.
    pub fn new<I, S>(locales: I, base: &str) -> Result<Self, TolkError>
    where
        I: IntoIterator<Item = S>,
        S: Into<Locale>,
    {
        let mut list: Vec<Locale> = Vec::new();
        for locale in locales {
            let locale = locale.into();
            if locale.trim().is_empty() {
                return Err(TolkError::InvalidLocaleSet(
                    "locale identifiers must not be blank".to_string(),
                ));
            }
            if list.contains(&locale) {
                return Err(TolkError::InvalidLocaleSet(format!(
                    "duplicate locale '{locale}'"
                )));
            }
            list.push(locale);
        }
        if list.is_empty() {
            return Err(TolkError::InvalidLocaleSet(
                "at least one locale is required".to_string(),
            ));
        }
        let Some(base) = list.iter().position(|l| l == base) else {
            return Err(TolkError::InvalidLocaleSet(format!(
                "base locale '{base}' is not in {list:?}"
            )));
        };
        Ok(Self {
            locales: list,
            base,
        })
    }

    /// The base (fallback) locale.
    pub fn base(&self) -> &str {
        &self.locales[self.base]
    }

    /// Whether `locale` is a member of the set.
    pub fn contains(&self, locale: &str) -> bool {
        self.locales.iter().any(|l| l == locale)
    }

    /// Whether `locale` is the base locale.
    pub fn is_base(&self, locale: &str) -> bool {
        self.base() == locale
    }

    /// Iterate over the locales in configured order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.locales.iter().map(String::as_str)
    }

    /// Number of configured locales.
    pub fn len(&self) -> usize {
        self.locales.len()
    }

    /// Always false; a locale set holds at least the base locale.
    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }

    /// Match an external language tag (`"no-NO"`, `"en_US.UTF-8"`, `"RO"`)
    /// against the set.
    ///
    /// Both sides are parsed as BCP 47 identifiers. An exact match wins, then
    /// the longest supported locale whose subtags prefix the tag
    /// (`zh-Hant` for `zh-Hant-TW`), then any locale of the same language.
    /// Configured locales that do not parse only match verbatim.
    pub fn match_tag(&self, tag: &str) -> Option<&str> {
        if let Some(verbatim) = self.iter().find(|l| l.eq_ignore_ascii_case(tag.trim())) {
            return Some(verbatim);
        }
        let wanted = parse_tag(tag)?;
        let parsed: Vec<(&str, LanguageIdentifier)> = self
            .iter()
            .filter_map(|l| parse_tag(l).map(|id| (l, id)))
            .collect();

        if let Some((l, _)) = parsed.iter().find(|(_, id)| *id == wanted) {
            return Some(*l);
        }
        let wanted_tag = wanted.to_string();
        let prefix = parsed
            .iter()
            .map(|(l, id)| (*l, id.to_string()))
            .filter(|(_, id)| {
                wanted_tag
                    .strip_prefix(id.as_str())
                    .is_some_and(|rest| rest.starts_with('-'))
            })
            .max_by_key(|(_, id)| id.len());
        if let Some((l, _)) = prefix {
            return Some(l);
        }
        parsed
            .iter()
            .find(|(_, id)| id.language == wanted.language)
            .map(|(l, _)| *l)
    }
}

/// Parse a loosely formatted tag: `.encoding` and `@modifier` suffixes are
/// dropped and `_` separators accepted.
fn parse_tag(raw: &str) -> Option<LanguageIdentifier> {
    let stripped = raw.trim().split(['.', '@']).next().unwrap_or_default().trim();
    if stripped.is_empty() {
        return None;
    }
    stripped.replace('_', "-").parse().ok()
}

impl<'a> IntoIterator for &'a LocaleSet {
    type Item = &'a Locale;
    type IntoIter = std::slice::Iter<'a, Locale>;

    fn into_iter(self) -> Self::IntoIter {
        self.locales.iter()
    }
}
