//! # tolk-adapters
//!
//! Host-environment collaborators for the translation store: storage
//! backends for the persisted locale and detectors for the initial one.

pub mod detect;
pub mod storage;

use std::sync::Arc;

use tolk_core::config::{Config, DetectorKind, StorageBackend, StorageConfig};
use tolk_core::traits::{LocaleDetector, Storage};
use tolk_core::LocaleSet;

pub use detect::{
    parse_accept_language, query_param, EnvDetector, FnDetector, NavigatorDetector,
    QueryParamDetector, StorageDetector,
};
pub use storage::{FileStorage, MemoryStorage};

/// Request-scoped signals that detectors cannot read on their own.
#[derive(Debug, Clone, Default)]
pub struct DetectInputs {
    /// Current URL, for the query-parameter detector.
    pub url: Option<String>,
    /// Raw `Accept-Language` header.
    pub accept_language: Option<String>,
    /// Browser language list; used when no header is given.
    pub languages: Vec<String>,
}

/// Build the storage adapter named by `[storage].backend`.
pub fn storage_from_config(config: &StorageConfig) -> Option<Arc<dyn Storage>> {
    match config.backend {
        StorageBackend::File => Some(Arc::new(FileStorage::new(&config.path))),
        StorageBackend::Memory => Some(Arc::new(MemoryStorage::new())),
        StorageBackend::None => None,
    }
}

/// Build detectors in `[detect].order`.
///
/// A detector whose input is unavailable (no storage, no URL, no browser
/// languages) is left out rather than added as a permanent "no opinion".
pub fn detectors_from_config(
    config: &Config,
    locales: Arc<LocaleSet>,
    storage: Option<Arc<dyn Storage>>,
    inputs: &DetectInputs,
) -> Vec<Box<dyn LocaleDetector>> {
    let mut detectors: Vec<Box<dyn LocaleDetector>> = Vec::new();
    for kind in &config.detect.order {
        match kind {
            DetectorKind::Storage => {
                if let Some(storage) = &storage {
                    detectors.push(Box::new(StorageDetector::new(
                        Arc::clone(storage),
                        config.storage.key.clone(),
                    )));
                }
            }
            DetectorKind::Query => {
                if let Some(url) = &inputs.url {
                    detectors.push(Box::new(QueryParamDetector::new(
                        url.clone(),
                        config.detect.query_param.clone(),
                    )));
                }
            }
            DetectorKind::Env => {
                detectors.push(Box::new(EnvDetector::new(Arc::clone(&locales))));
            }
            DetectorKind::AcceptLanguage => {
                if let Some(header) = &inputs.accept_language {
                    detectors.push(Box::new(NavigatorDetector::from_accept_language(
                        Arc::clone(&locales),
                        header,
                    )));
                } else if !inputs.languages.is_empty() {
                    detectors.push(Box::new(NavigatorDetector::from_languages(
                        Arc::clone(&locales),
                        inputs.languages.clone(),
                    )));
                }
            }
        }
    }
    detectors
}
