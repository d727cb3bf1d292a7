use super::*;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Mutex;

use tolk_chain::Domain;

/// Storage that records every write and can be told to fail.
#[derive(Default)]
struct RecordingStorage {
    items: Mutex<HashMap<String, String>>,
    writes: Mutex<Vec<(String, String)>>,
    fail: bool,
}

impl Storage for RecordingStorage {
    fn name(&self) -> &str {
        "recording"
    }

    fn get_item(&self, key: &str) -> Result<Option<String>, TolkError> {
        Ok(self.items.lock().unwrap().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), TolkError> {
        if self.fail {
            return Err(TolkError::Storage("quota exceeded".to_string()));
        }
        self.items
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        self.writes
            .lock()
            .unwrap()
            .push((key.to_string(), value.to_string()));
        Ok(())
    }
}

struct Fixed(Option<&'static str>);

impl LocaleDetector for Fixed {
    fn name(&self) -> &str {
        "fixed"
    }

    fn detect(&self) -> Result<Option<String>, TolkError> {
        Ok(self.0.map(String::from))
    }
}

fn locales() -> LocaleSet {
    LocaleSet::new(["en", "no", "ro"], "en").unwrap()
}

fn status_labels(tr: &Translator) -> Result<Labels, TolkError> {
    let domain = Domain::with_values([("Active", "A"), ("Inactive", "I")]);
    Labels::new(
        &domain,
        [
            (
                "Active",
                tr.chain("Active").with("no", "Aktiv")?.with("ro", "Activ")?,
            ),
            (
                "Inactive",
                tr.chain("Inactive")
                    .with("no", "Inaktiv")?
                    .with("ro", "Inactiv")?,
            ),
        ],
    )
}

#[test]
fn test_defaults_to_base_without_detectors() {
    let store = StoreBuilder::new(locales(), status_labels).build().unwrap();
    assert_eq!(store.locale(), "en");
    assert_eq!(store.labels().lookup("Active"), "Active");
    assert_eq!(store.translator().locale(), "en");
}

#[test]
fn test_initial_locale_from_detectors() {
    let store = StoreBuilder::new(locales(), status_labels)
        .detector(Box::new(Fixed(Some("de"))))
        .detector(Box::new(Fixed(Some("ro"))))
        .build()
        .unwrap();
    assert_eq!(store.locale(), "ro");
    assert_eq!(store.labels().lookup("I"), "Inactiv");
}

#[test]
fn test_construction_notifies_and_persists_once() {
    let storage = Arc::new(RecordingStorage::default());
    let seen = Rc::new(RefCell::new(Vec::new()));
    let seen_in_cb = Rc::clone(&seen);
    let _store = StoreBuilder::new(locales(), status_labels)
        .detector(Box::new(Fixed(Some("no"))))
        .storage(storage.clone())
        .on_locale_change(move |session: &Session<Labels>| {
            seen_in_cb.borrow_mut().push(session.locale().to_string());
            Ok(())
        })
        .build()
        .unwrap();
    assert_eq!(*seen.borrow(), vec!["no".to_string()]);
    assert_eq!(
        *storage.writes.lock().unwrap(),
        vec![("locale".to_string(), "no".to_string())]
    );
}

#[test]
fn test_subscriber_observes_updated_state() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let seen_in_cb = Rc::clone(&seen);
    let mut store = StoreBuilder::new(locales(), status_labels)
        .on_locale_change(move |session: &Session<Labels>| {
            let greeting = session.translator().chain("hello").with("no", "hei")?;
            seen_in_cb.borrow_mut().push((
                session.locale().to_string(),
                session.labels().lookup("Active"),
                greeting.to_string(),
            ));
            Ok(())
        })
        .build()
        .unwrap();

    store.change_locale("no").unwrap();

    let seen = seen.borrow();
    assert_eq!(seen.len(), 2);
    assert_eq!(
        seen[1],
        ("no".to_string(), "Aktiv".to_string(), "hei".to_string())
    );
}

#[test]
fn test_change_locale_rebinds_new_chains_only() {
    let mut store = StoreBuilder::new(locales(), status_labels).build().unwrap();
    let before = store.chain("hello").with("no", "hei").unwrap();
    store.change_locale("no").unwrap();
    let after = store.chain("hello").with("no", "hei").unwrap();
    assert_eq!(before, "hello", "old chains keep their locale");
    assert_eq!(after, "hei");
    assert_eq!(store.labels().lookup("Inactive"), "Inaktiv");
}

#[test]
fn test_change_to_unknown_locale_keeps_state() {
    let storage = Arc::new(RecordingStorage::default());
    let mut store = StoreBuilder::new(locales(), status_labels)
        .storage(storage.clone())
        .build()
        .unwrap();
    let err = store.change_locale("de").unwrap_err();
    assert!(matches!(err, TolkError::UnknownLocale(ref l) if l == "de"));
    assert_eq!(store.locale(), "en");
    assert_eq!(storage.writes.lock().unwrap().len(), 1);
}

#[test]
fn test_custom_storage_key() {
    let storage = Arc::new(RecordingStorage::default());
    let mut store = StoreBuilder::new(locales(), status_labels)
        .storage(storage.clone())
        .storage_key("app.locale")
        .build()
        .unwrap();
    store.change_locale("ro").unwrap();
    assert_eq!(
        storage.get_item("app.locale").unwrap(),
        Some("ro".to_string())
    );
    assert_eq!(storage.get_item("locale").unwrap(), None);
}

#[test]
fn test_storage_error_propagates_after_switch() {
    let storage = Arc::new(RecordingStorage {
        fail: true,
        ..Default::default()
    });
    let err = StoreBuilder::new(locales(), status_labels)
        .storage(storage)
        .build()
        .unwrap_err();
    assert!(matches!(err, TolkError::Storage(_)));
}

#[test]
fn test_subscriber_error_propagates_unchanged() {
    let mut calls = 0;
    let mut store = StoreBuilder::new(locales(), status_labels)
        .on_locale_change(move |_session: &Session<Labels>| {
            calls += 1;
            if calls > 1 {
                return Err(TolkError::Subscriber("validator resync failed".to_string()));
            }
            Ok(())
        })
        .build()
        .unwrap();
    let err = store.change_locale("no").unwrap_err();
    assert!(matches!(err, TolkError::Subscriber(ref m) if m == "validator resync failed"));
    assert_eq!(store.locale(), "no", "state switches before notification");
}

#[test]
fn test_label_factory_error_aborts_build() {
    let result = StoreBuilder::new(locales(), |tr: &Translator| {
        Labels::new(&Domain::keys(["Draft"]), [("Draft", tr.chain("Draft"))])
    })
    .build();
    assert!(matches!(
        result,
        Err(TolkError::IncompleteTranslation { .. })
    ));
}

#[test]
fn test_from_config_enables_collapse() {
    let cfg: Config = toml::from_str(
        r#"
        [locales]
        supported = ["en", "no"]
        base = "en"

        [chain]
        return_primitive = true

        [storage]
        key = "lang"
        "#,
    )
    .unwrap();
    let storage = Arc::new(RecordingStorage::default());
    let mut store = StoreBuilder::from_config(&cfg, |_: &Translator| Ok(()))
        .unwrap()
        .storage(storage.clone())
        .build()
        .unwrap();
    store.change_locale("no").unwrap();
    assert!(store.translator().return_primitive(), "collapse survives a locale change");
    let t = store.chain("hello").with("no", "hei").unwrap();
    assert!(t.is_collapsed());
    assert_eq!(t, "hei");
    assert_eq!(storage.get_item("lang").unwrap(), Some("no".to_string()));
}
