//! Strings shipped with the `tolk` binary.
//!
//! Each phrase lists its text per locale with English first. Locales the
//! configuration enables but the table lacks are filled with the base text,
//! so labels stay complete for any configured set that includes the base.

use std::fmt;

use tolk_chain::{Domain, LabelDomain, Labels, Translation, Translator};
use tolk_core::TolkError;
use tracing::debug;

/// Locales this binary ships text for.
pub const SHIPPED_LOCALES: [&str; 3] = ["en", "no", "ro"];

const PHRASES: &[(&str, &[(&str, &str)])] = &[
    (
        "greeting",
        &[("en", "Hello"), ("no", "Hei"), ("ro", "Salut")],
    ),
    (
        "current_locale",
        &[
            ("en", "Current language:"),
            ("no", "Gjeldende språk:"),
            ("ro", "Limba curentă:"),
        ],
    ),
    (
        "locale_set",
        &[
            ("en", "Language set to:"),
            ("no", "Språk satt til:"),
            ("ro", "Limba setată la:"),
        ],
    ),
    (
        "statuses",
        &[("en", "Statuses"), ("no", "Statuser"), ("ro", "Stări")],
    ),
];

const STATUS_TEXT: &[(&str, &[(&str, &str)])] = &[
    (
        "Active",
        &[("en", "Active"), ("no", "Aktiv"), ("ro", "Activ")],
    ),
    (
        "Suspended",
        &[("en", "Suspended"), ("no", "Suspendert"), ("ro", "Suspendat")],
    ),
    (
        "Closed",
        &[("en", "Closed"), ("no", "Lukket"), ("ro", "Închis")],
    ),
];

/// Account status, stored as a one-letter code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Active,
    Suspended,
    Closed,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Active, Status::Suspended, Status::Closed];

    /// Persisted code.
    pub fn code(self) -> &'static str {
        match self {
            Self::Active => "A",
            Self::Suspended => "S",
            Self::Closed => "C",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Active => "Active",
            Self::Suspended => "Suspended",
            Self::Closed => "Closed",
        };
        f.write_str(name)
    }
}

impl LabelDomain for Status {
    fn domain() -> Domain {
        Status::ALL
            .iter()
            .fold(Domain::new(), |d, s| d.entry(s.to_string(), Some(s.code())))
    }
}

/// Label sets rebuilt on every locale change.
#[derive(Debug, Clone)]
pub struct AppLabels {
    pub status: Labels,
}

/// Label factory handed to the store.
pub fn app_labels(tr: &Translator) -> Result<AppLabels, TolkError> {
    let status = Labels::for_domain::<Status, _, _>(
        STATUS_TEXT
            .iter()
            .map(|(key, texts)| build(tr, key, texts).map(|t| (*key, t)))
            .collect::<Result<Vec<_>, TolkError>>()?,
    )?;
    Ok(AppLabels { status })
}

/// Translation for a phrase key. Unknown keys resolve to the key itself.
pub fn phrase(tr: &Translator, key: &str) -> Result<Translation, TolkError> {
    match PHRASES.iter().find(|(k, _)| *k == key) {
        Some((_, texts)) => build(tr, key, texts),
        None => Ok(tr.chain(key)),
    }
}

fn build(tr: &Translator, key: &str, texts: &[(&str, &str)]) -> Result<Translation, TolkError> {
    let locales = tr.locales();
    let text_for = |locale: &str| {
        texts
            .iter()
            .find(|(l, _)| *l == locale)
            .map(|(_, text)| *text)
    };
    let Some(base) = text_for(locales.base()) else {
        return Err(TolkError::MissingTranslation {
            key: key.to_string(),
        });
    };
    let mut translation = tr.chain(base);
    for locale in locales.iter().filter(|l| !locales.is_base(l)) {
        if translation.is_collapsed() {
            break;
        }
        let text = text_for(locale).unwrap_or_else(|| {
            debug!("'{key}' has no '{locale}' text, using base");
            base
        });
        translation = translation.with(locale, text)?;
    }
    Ok(translation)
}
