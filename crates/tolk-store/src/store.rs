//! Process-local holder of the current locale.
//!
//! The store owns the current locale, the [`Translator`] bound to it, and the
//! label set built from that translator. [`TranslationStore::change_locale`]
//! is the only mutator. Construction performs one implicit locale change so
//! the subscriber and persistence also fire once at startup.
//!
//! Calling `change_locale` from inside the subscriber is not supported.

use std::sync::Arc;

use tolk_chain::{Labels, Translation, Translator};
use tolk_core::config::Config;
use tolk_core::traits::{LocaleDetector, Storage};
use tolk_core::{Locale, LocaleSet, TolkError};
use tracing::{debug, info};

use crate::resolver::resolve_initial_locale;

#[cfg(test)]
mod tests;

/// Key the current locale is persisted under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "locale";

/// Builds the label set for one translator.
pub type LabelFactory<L> = Box<dyn Fn(&Translator) -> Result<L, TolkError>>;

/// Called after every locale change with the already-updated session.
pub type Subscriber<L> = Box<dyn FnMut(&Session<L>) -> Result<(), TolkError>>;

/// The observable state of a store: locale, chain producer, labels.
#[derive(Debug, Clone)]
pub struct Session<L> {
    locale: Locale,
    translator: Translator,
    labels: L,
}

impl<L> Session<L> {
    /// Current locale.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Chain producer bound to the current locale.
    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    /// Labels resolved for the current locale.
    pub fn labels(&self) -> &L {
        &self.labels
    }
}

/// Configures and initializes a [`TranslationStore`].
pub struct StoreBuilder<L = Labels> {
    locales: LocaleSet,
    return_primitive: bool,
    storage: Option<Arc<dyn Storage>>,
    storage_key: String,
    detectors: Vec<Box<dyn LocaleDetector>>,
    label_factory: LabelFactory<L>,
    on_change: Option<Subscriber<L>>,
}

impl<L> StoreBuilder<L> {
    /// Start a builder for `locales`, building labels with `label_factory`.
    pub fn new<F>(locales: LocaleSet, label_factory: F) -> Self
    where
        F: Fn(&Translator) -> Result<L, TolkError> + 'static,
    {
        Self {
            locales,
            return_primitive: false,
            storage: None,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            detectors: Vec::new(),
            label_factory: Box::new(label_factory),
            on_change: None,
        }
    }

    /// Start a builder from the `[locales]`, `[chain]` and `[storage]` config.
    ///
    /// Storage adapters and detectors are attached separately.
    pub fn from_config<F>(config: &Config, label_factory: F) -> Result<Self, TolkError>
    where
        F: Fn(&Translator) -> Result<L, TolkError> + 'static,
    {
        Ok(Self::new(config.locale_set()?, label_factory)
            .return_primitive(config.chain.return_primitive)
            .storage_key(config.storage.key.clone()))
    }

    /// Collapse complete chains into plain strings.
    pub fn return_primitive(mut self, enabled: bool) -> Self {
        self.return_primitive = enabled;
        self
    }

    /// Persist the current locale through `storage`.
    pub fn storage(mut self, storage: Arc<dyn Storage>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Override the persistence key.
    pub fn storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Append a detector; earlier detectors take priority.
    pub fn detector(mut self, detector: Box<dyn LocaleDetector>) -> Self {
        self.detectors.push(detector);
        self
    }

    /// Replace the detector list.
    pub fn detectors(mut self, detectors: Vec<Box<dyn LocaleDetector>>) -> Self {
        self.detectors = detectors;
        self
    }

    /// Subscribe to locale changes.
    pub fn on_locale_change<F>(mut self, subscriber: F) -> Self
    where
        F: FnMut(&Session<L>) -> Result<(), TolkError> + 'static,
    {
        self.on_change = Some(Box::new(subscriber));
        self
    }

    /// Resolve the initial locale and apply it.
    pub fn build(self) -> Result<TranslationStore<L>, TolkError> {
        let initial = resolve_initial_locale(&self.locales, &self.detectors)?;
        let locales = Arc::new(self.locales);
        let session = Session::build(
            &locales,
            &initial,
            self.return_primitive,
            &self.label_factory,
        )?;
        let mut store = TranslationStore {
            locales,
            storage: self.storage,
            storage_key: self.storage_key,
            label_factory: self.label_factory,
            on_change: self.on_change,
            session,
        };
        info!("translation store initialized with locale '{initial}'");
        store.announce()?;
        Ok(store)
    }
}

impl<L> Session<L> {
    fn build(
        locales: &Arc<LocaleSet>,
        locale: &str,
        return_primitive: bool,
        label_factory: &LabelFactory<L>,
    ) -> Result<Self, TolkError> {
        let translator = Translator::new(Arc::clone(locales), locale, return_primitive)?;
        let labels = label_factory(&translator)?;
        debug!("rebuilt labels for locale '{locale}'");
        Ok(Self {
            locale: locale.to_string(),
            translator,
            labels,
        })
    }
}

/// Mutable holder of the current locale and everything derived from it.
pub struct TranslationStore<L = Labels> {
    locales: Arc<LocaleSet>,
    storage: Option<Arc<dyn Storage>>,
    storage_key: String,
    label_factory: LabelFactory<L>,
    on_change: Option<Subscriber<L>>,
    session: Session<L>,
}

impl<L> TranslationStore<L> {
    /// Current locale.
    pub fn locale(&self) -> &str {
        self.session.locale()
    }

    /// Chain producer bound to the current locale.
    pub fn translator(&self) -> &Translator {
        self.session.translator()
    }

    /// Labels for the current locale.
    pub fn labels(&self) -> &L {
        self.session.labels()
    }

    /// Locale, translator and labels together.
    pub fn session(&self) -> &Session<L> {
        &self.session
    }

    /// Configured locales.
    pub fn locales(&self) -> &LocaleSet {
        &self.locales
    }

    /// Shorthand for `self.translator().chain(base_text)`.
    pub fn chain(&self, base_text: impl Into<String>) -> Translation {
        self.session.translator.chain(base_text)
    }

    /// Switch to `locale`.
    ///
    /// Rebuilds the translator and labels, then notifies the subscriber,
    /// then persists. Errors from the label factory leave the previous state
    /// in place; subscriber and storage errors propagate after the state has
    /// already switched.
    pub fn change_locale(&mut self, locale: &str) -> Result<(), TolkError> {
        let session = Session::build(
            &self.locales,
            locale,
            self.session.translator.return_primitive(),
            &self.label_factory,
        )?;
        self.session = session;
        info!("locale changed to '{locale}'");
        self.announce()
    }

    fn announce(&mut self) -> Result<(), TolkError> {
        if let Some(subscriber) = self.on_change.as_mut() {
            subscriber(&self.session)?;
        }
        if let Some(storage) = &self.storage {
            storage.set_item(&self.storage_key, &self.session.locale)?;
            debug!(
                "persisted locale '{}' to {} storage",
                self.session.locale,
                storage.name()
            );
        }
        Ok(())
    }
}

impl<L: std::fmt::Debug> std::fmt::Debug for TranslationStore<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationStore")
            .field("locales", &self.locales)
            .field("return_primitive", &self.session.translator.return_primitive())
            .field("storage_key", &self.storage_key)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}
