//! Localized form-validation messages, kept in sync with the store.
//!
//! The pack is an external message table: it knows nothing about chains and
//! only learns the locale through the store's locale-change subscriber.

use std::cell::RefCell;
use std::rc::Rc;

/// Validation rule a message exists for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Required,
    TooShort,
    InvalidEmail,
}

/// Return the message for `rule` in `lang`. Falls back to English.
fn message(rule: Rule, lang: &str) -> &'static str {
    match rule {
        Rule::Required => match lang {
            "no" => "Feltet er påkrevd",
            "ro" => "Câmpul este obligatoriu",
            _ => "This field is required",
        },
        Rule::TooShort => match lang {
            "no" => "Verdien er for kort",
            "ro" => "Valoarea este prea scurtă",
            _ => "Value is too short",
        },
        Rule::InvalidEmail => match lang {
            "no" => "Ugyldig e-postadresse",
            "ro" => "Adresă de e-mail invalidă",
            _ => "Invalid e-mail address",
        },
    }
}

/// Shared handle to the active validation locale.
#[derive(Debug, Clone, Default)]
pub struct ValidationMessages {
    locale: Rc<RefCell<String>>,
}

impl ValidationMessages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch the pack to `locale`.
    pub fn resync(&self, locale: &str) {
        *self.locale.borrow_mut() = locale.to_string();
    }

    /// Message for `rule` in the active locale.
    pub fn get(&self, rule: Rule) -> &'static str {
        message(rule, &self.locale.borrow())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::app_labels;
    use tolk_adapters::FnDetector;
    use tolk_core::LocaleSet;
    use tolk_store::{Session, StoreBuilder};

    #[test]
    fn test_unknown_locale_falls_back_to_english() {
        let pack = ValidationMessages::new();
        pack.resync("de");
        assert_eq!(pack.get(Rule::Required), "This field is required");
    }

    #[test]
    fn test_store_subscriber_keeps_pack_in_sync() {
        let pack = ValidationMessages::new();
        let synced = pack.clone();
        let locales = LocaleSet::new(["en", "no", "ro"], "en").unwrap();
        let mut store = StoreBuilder::new(locales, app_labels)
            .detector(Box::new(FnDetector::new("fixed", || Some("no".to_string()))))
            .on_locale_change(move |session: &Session<_>| {
                synced.resync(session.locale());
                Ok(())
            })
            .build()
            .unwrap();
        assert_eq!(
            pack.get(Rule::Required),
            "Feltet er påkrevd",
            "subscriber fires at construction"
        );

        store.change_locale("ro").unwrap();
        assert_eq!(pack.get(Rule::TooShort), "Valoarea este prea scurtă");
        store.change_locale("no").unwrap();
        assert_eq!(pack.get(Rule::InvalidEmail), "Ugyldig e-postadresse");
    }
}
