//! Initial locale selection from prioritized detectors.

use tolk_core::traits::LocaleDetector;
use tolk_core::{Locale, LocaleSet, TolkError};
use tracing::debug;

/// Pick the initial locale.
///
/// Detectors run in order; the first one proposing a supported locale wins.
/// Unsupported proposals are skipped. Falls back to the base locale when no
/// detector has an accepted opinion. Detector errors propagate unchanged.
pub fn resolve_initial_locale(
    locales: &LocaleSet,
    detectors: &[Box<dyn LocaleDetector>],
) -> Result<Locale, TolkError> {
    for detector in detectors {
        match detector.detect()? {
            Some(candidate) if locales.contains(&candidate) => {
                debug!("detector '{}' selected locale '{candidate}'", detector.name());
                return Ok(candidate);
            }
            Some(candidate) => {
                debug!(
                    "detector '{}' proposed unsupported locale '{candidate}', skipping",
                    detector.name()
                );
            }
            None => debug!("detector '{}' has no opinion", detector.name()),
        }
    }
    debug!("no detector matched, using base locale '{}'", locales.base());
    Ok(locales.base().to_string())
}
