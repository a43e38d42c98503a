use crate::error::{I18nError, Result};

/// Directory the translator loads from when none is configured
pub const DEFAULT_LOCALES_DIRECTORY: &str = "./assets/locales/";

/// Locale used for lookups when none is configured
pub const DEFAULT_LOCALE: &str = "en";

/// Environment variable holding the locales directory
pub const ENV_LOCALES_DIR: &str = "I18N_LOCALES_DIR";

/// Environment variable holding the current locale
pub const ENV_LOCALE: &str = "I18N_LOCALE";

/// Environment variable holding the comma-separated supported locales
pub const ENV_SUPPORTED_LOCALES: &str = "I18N_SUPPORTED_LOCALES";

/// Parameters to configure a `Translator`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleConfig {
    /// Directory holding one subdirectory per locale, each with one JSON
    /// document per namespace (e.g. `./assets/locales/en/home.json`)
    pub locales_directory: String,

    /// Locale used for lookups. Must be supported.
    pub current_locale: String,

    /// Ordered, duplicate-free list of supported locales
    pub supported_locales: Vec<String>,
}

impl LocaleConfig {
    /// Set the locales directory
    pub fn with_directory(mut self, directory: impl Into<String>) -> Self {
        self.locales_directory = directory.into();
        self
    }

    /// Set the current locale
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.current_locale = locale.into();
        self
    }

    /// Set the supported locales
    pub fn with_supported_locales<I, S>(mut self, locales: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.supported_locales = locales.into_iter().map(Into::into).collect();
        self
    }

    /// Build a configuration from `I18N_LOCALES_DIR`, `I18N_LOCALE` and
    /// `I18N_SUPPORTED_LOCALES`.
    ///
    /// Unset variables keep their defaults, except that an unset locale falls
    /// back to the first supported locale when `en` is not in the list.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let locales_directory =
            std::env::var(ENV_LOCALES_DIR).unwrap_or(defaults.locales_directory);

        let supported_locales = match std::env::var(ENV_SUPPORTED_LOCALES) {
            Ok(raw) => parse_locale_list(&raw),
            Err(_) => defaults.supported_locales,
        };
        if supported_locales.is_empty() {
            return Err(I18nError::EmptyLocaleList);
        }

        let current_locale = match std::env::var(ENV_LOCALE) {
            Ok(locale) => locale.trim().to_string(),
            Err(_) if supported_locales.iter().any(|l| l == DEFAULT_LOCALE) => {
                DEFAULT_LOCALE.to_string()
            }
            Err(_) => supported_locales[0].clone(),
        };

        let config = Self {
            locales_directory,
            current_locale,
            supported_locales,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that the supported list is non-empty and contains the current locale.
    pub fn validate(&self) -> Result<()> {
        if self.supported_locales.is_empty() {
            return Err(I18nError::EmptyLocaleList);
        }
        if !self.supported_locales.contains(&self.current_locale) {
            return Err(I18nError::LocaleNotSupported(self.current_locale.clone()));
        }
        Ok(())
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            locales_directory: DEFAULT_LOCALES_DIRECTORY.to_string(),
            current_locale: DEFAULT_LOCALE.to_string(),
            supported_locales: vec![DEFAULT_LOCALE.to_string()],
        }
    }
}

/// Append a trailing `/` unless the path already ends with one.
pub fn normalize_directory(path: &str) -> String {
    if path.ends_with('/') {
        path.to_string()
    } else {
        format!("{}/", path)
    }
}

/// Split a comma-separated locale list, trimming items and dropping empty
/// ones and duplicates (first occurrence wins).
pub fn parse_locale_list(raw: &str) -> Vec<String> {
    dedup_locales(
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
    )
}

pub(crate) fn dedup_locales<I>(locales: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut unique: Vec<String> = Vec::new();
    for locale in locales {
        if !unique.contains(&locale) {
            unique.push(locale);
        }
    }
    unique
}
