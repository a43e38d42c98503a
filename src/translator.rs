//! The `Translator`: configuration, loaded tables and key lookup.
//!
//! # Example
//!
//! ```rust,ignore
//! use i18n_lookup::{LocaleConfig, Translator};
//!
//! let config = LocaleConfig::default().with_supported_locales(["en", "fr"]);
//! let mut translator = Translator::new(config);
//!
//! translator.set_locale("fr")?;
//! let greeting = translator.t("greeting", "home", [("name", "John")]);
//! ```

use crate::config::{dedup_locales, normalize_directory, LocaleConfig};
use crate::detect::{LocaleDetector, SystemLocale};
use crate::error::{I18nError, Result};
use crate::metrics::LookupMetrics;
use crate::placeholder::substitute;
use crate::table::{load_all, load_locale, LocaleTable, Tables};
use tracing::{debug, error, info, warn};

/// String returned when a lookup cannot be resolved: `<namespace>.<key>`.
pub fn fallback(namespace: &str, key: &str) -> String {
    format!("{}.{}", namespace, key)
}

/// Translation lookup over JSON tables loaded per locale and namespace.
///
/// Not synchronized: wrap it in a `Mutex` or `RwLock` to share it.
#[derive(Debug)]
pub struct Translator {
    config: LocaleConfig,
    tables: Tables,
    metrics: LookupMetrics,
}

impl Translator {
    /// Create a translator and load every supported locale.
    ///
    /// A failed load is logged and leaves the table empty, so every lookup
    /// falls back until a mutator reloads successfully. Use [`Translator::try_new`]
    /// to get the error instead.
    pub fn new(config: LocaleConfig) -> Self {
        let mut translator = Self::unloaded(config);

        if let Err(e) = translator.config.validate() {
            warn!("Invalid locale configuration: {}", e);
        }
        match load_all(
            &translator.config.locales_directory,
            &translator.config.supported_locales,
        ) {
            Ok(tables) => translator.tables = tables,
            Err(e) => error!("Failed to load translations: {}", e),
        }

        translator
    }

    /// Create a translator, failing if the configuration is invalid or any
    /// supported locale cannot be loaded.
    pub fn try_new(config: LocaleConfig) -> Result<Self> {
        let mut translator = Self::unloaded(config);
        translator.config.validate()?;
        translator.tables = load_all(
            &translator.config.locales_directory,
            &translator.config.supported_locales,
        )?;
        Ok(translator)
    }

    fn unloaded(config: LocaleConfig) -> Self {
        let config = LocaleConfig {
            locales_directory: normalize_directory(&config.locales_directory),
            current_locale: config.current_locale,
            supported_locales: dedup_locales(config.supported_locales),
        };
        Self {
            config,
            tables: Tables::new(),
            metrics: LookupMetrics::new(),
        }
    }

    // ==================== Mutators ====================

    /// Load every supported locale from `directory`.
    ///
    /// A trailing `/` is appended when missing. The directory is only
    /// committed when the reload succeeds; on failure the table is left empty
    /// and the previous directory is kept.
    pub fn set_locales_directory(&mut self, directory: &str) -> Result<()> {
        let directory = normalize_directory(directory);
        self.tables.clear();

        match load_all(&directory, &self.config.supported_locales) {
            Ok(tables) => {
                info!("Loaded {} locales from {}", tables.len(), directory);
                self.tables = tables;
                self.config.locales_directory = directory;
                Ok(())
            }
            Err(e) => {
                error!("Failed to load locales from {}: {}", directory, e);
                Err(e)
            }
        }
    }

    /// Switch the locale used for lookups. Does not reload anything.
    pub fn set_locale(&mut self, locale: &str) -> Result<()> {
        if !self.is_supported(locale) {
            error!(
                "The locale '{}' is not supported. See set_supported_locales.",
                locale
            );
            return Err(I18nError::LocaleNotSupported(locale.to_string()));
        }

        self.config.current_locale = locale.to_string();
        Ok(())
    }

    /// Replace the supported locales and reload all of them.
    ///
    /// An empty list is rejected without touching any state. Duplicates are
    /// dropped. If any locale fails to load, the new list is kept but the
    /// table is left empty and the error returned.
    pub fn set_supported_locales<I, S>(&mut self, locales: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let locales = dedup_locales(locales.into_iter().map(Into::into));
        if locales.is_empty() {
            error!("The supported locales list is empty.");
            return Err(I18nError::EmptyLocaleList);
        }

        if !locales.contains(&self.config.current_locale) {
            warn!(
                "The current locale '{}' is not in the new supported locales",
                self.config.current_locale
            );
        }

        self.config.supported_locales = locales;
        self.tables.clear();

        match load_all(
            &self.config.locales_directory,
            &self.config.supported_locales,
        ) {
            Ok(tables) => {
                self.tables = tables;
                Ok(())
            }
            Err(e) => {
                error!("Failed to load translations: {}", e);
                Err(e)
            }
        }
    }

    /// Add one locale and load only its tables.
    ///
    /// If the load fails the locale stays supported without a table, so
    /// lookups in it fall back.
    pub fn add_supported_locale(&mut self, locale: &str) -> Result<()> {
        if self.is_supported(locale) {
            error!("The locale '{}' is already supported.", locale);
            return Err(I18nError::LocaleAlreadySupported(locale.to_string()));
        }

        self.config.supported_locales.push(locale.to_string());

        match load_locale(&self.config.locales_directory, locale) {
            Ok(table) => {
                debug!("Loaded {} namespaces for '{}'", table.len(), locale);
                self.tables.insert(locale.to_string(), table);
                Ok(())
            }
            Err(e) => {
                error!("Failed to load locale '{}': {}", locale, e);
                Err(e)
            }
        }
    }

    /// Remove one locale and evict its tables. The current locale is left as is.
    pub fn remove_supported_locale(&mut self, locale: &str) -> Result<()> {
        if !self.is_supported(locale) {
            error!("The locale '{}' is already not supported.", locale);
            return Err(I18nError::LocaleNotSupported(locale.to_string()));
        }

        self.config.supported_locales.retain(|l| l != locale);
        self.tables.remove(locale);
        Ok(())
    }

    /// Switch to the operating system's preferred locale, if supported.
    pub fn auto_detect_locale(&mut self) -> Result<()> {
        self.auto_detect_locale_with(&SystemLocale)
    }

    /// Switch to the locale reported by `detector`, if supported.
    ///
    /// The detected identifier must match a supported locale exactly.
    pub fn auto_detect_locale_with<D>(&mut self, detector: &D) -> Result<()>
    where
        D: LocaleDetector + ?Sized,
    {
        let locale = match detector.detect() {
            Some(locale) if !locale.is_empty() => locale,
            _ => {
                error!("The locale could not be auto-detected.");
                return Err(I18nError::AutoDetectUnavailable);
            }
        };

        self.set_locale(&locale)
    }

    // ==================== Accessors ====================

    /// Directory the tables were loaded from, always ending with `/`.
    pub fn locales_directory(&self) -> &str {
        &self.config.locales_directory
    }

    /// Locale used for lookups.
    pub fn current_locale(&self) -> &str {
        &self.config.current_locale
    }

    /// Supported locales, in insertion order.
    pub fn supported_locales(&self) -> &[String] {
        &self.config.supported_locales
    }

    pub fn config(&self) -> &LocaleConfig {
        &self.config
    }

    pub fn is_supported(&self, locale: &str) -> bool {
        self.config.supported_locales.iter().any(|l| l == locale)
    }

    /// Whether `locale` currently has a loaded table.
    pub fn is_loaded(&self, locale: &str) -> bool {
        self.tables.contains_key(locale)
    }

    /// Loaded table for `locale`.
    pub fn table(&self, locale: &str) -> Option<&LocaleTable> {
        self.tables.get(locale)
    }

    /// All loaded tables, keyed by locale.
    pub fn tables(&self) -> &Tables {
        &self.tables
    }

    /// Names of the namespaces loaded for `locale`.
    pub fn namespaces(&self, locale: &str) -> Vec<&str> {
        self.tables
            .get(locale)
            .map(|table| table.namespace_names().collect())
            .unwrap_or_default()
    }

    pub fn metrics(&self) -> &LookupMetrics {
        &self.metrics
    }

    // ==================== Lookup ====================

    /// Resolve `key` in `namespace` for the current locale and substitute
    /// `args` into its `{{ name }}` markers.
    ///
    /// # Errors
    /// * `LocaleNotLoaded` if the current locale has no table
    /// * `NamespaceNotLoaded` if the namespace is missing for that locale
    /// * `KeyNotFound` if the key is missing from the namespace
    /// * `ValueNotString` if the key maps to a non-string value
    pub fn try_translate<I, K, V>(&self, key: &str, namespace: &str, args: I) -> Result<String>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        match self.resolve(key, namespace) {
            Ok(raw) => {
                self.metrics.record_hit();
                Ok(substitute(raw, args))
            }
            Err(e) => {
                self.metrics.record_miss();
                Err(e)
            }
        }
    }

    /// Translate `key` in `namespace`, or return `"<namespace>.<key>"`.
    pub fn translate(&self, key: &str, namespace: &str) -> String {
        self.translate_with(key, namespace, std::iter::empty::<(&str, &str)>())
    }

    /// Translate with placeholder arguments, or return `"<namespace>.<key>"`.
    pub fn translate_with<I, K, V>(&self, key: &str, namespace: &str, args: I) -> String
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        match self.try_translate(key, namespace, args) {
            Ok(text) => text,
            Err(e) => {
                error!("{}", e);
                self.metrics.record_fallback();
                fallback(namespace, key)
            }
        }
    }

    /// Shorthand for [`Translator::translate_with`].
    pub fn t<I, K, V>(&self, key: &str, namespace: &str, args: I) -> String
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.translate_with(key, namespace, args)
    }

    fn resolve(&self, key: &str, namespace: &str) -> Result<&str> {
        let locale = &self.config.current_locale;

        let table = self
            .tables
            .get(locale)
            .ok_or_else(|| I18nError::LocaleNotLoaded(locale.clone()))?;

        let document =
            table
                .namespace(namespace)
                .ok_or_else(|| I18nError::NamespaceNotLoaded {
                    locale: locale.clone(),
                    namespace: namespace.to_string(),
                })?;

        let value = document.get(key).ok_or_else(|| I18nError::KeyNotFound {
            namespace: namespace.to_string(),
            key: key.to_string(),
        })?;

        value.as_str().ok_or_else(|| I18nError::ValueNotString {
            namespace: namespace.to_string(),
            key: key.to_string(),
        })
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::new(LocaleConfig::default())
    }
}
