//! System locale detection.

/// Source of a preferred locale identifier.
///
/// Implemented for [`SystemLocale`] and for any `Fn() -> Option<String>`, so
/// callers and tests can plug in a fixed answer.
pub trait LocaleDetector {
    /// The preferred locale, or `None` if it cannot be determined.
    fn detect(&self) -> Option<String>;
}

/// Reads the operating system's preferred locale (e.g. `en-US`).
///
/// The identifier is returned as reported; it is matched against the
/// supported set verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLocale;

impl LocaleDetector for SystemLocale {
    fn detect(&self) -> Option<String> {
        sys_locale::get_locale()
    }
}

impl<F> LocaleDetector for F
where
    F: Fn() -> Option<String>,
{
    fn detect(&self) -> Option<String> {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_detector() {
        let detector = || Some("fr".to_string());
        assert_eq!(detector.detect(), Some("fr".to_string()));
    }

    #[test]
    fn test_closure_detector_none() {
        let detector = || -> Option<String> { None };
        assert_eq!(detector.detect(), None);
    }
}
