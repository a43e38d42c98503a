//! Error taxonomy for loading and looking up translations.

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while loading tables or resolving a key.
///
/// Loading errors are returned by the `Translator` mutators; lookup errors are
/// returned by `Translator::try_translate` and degrade to the fallback string
/// everywhere else.
#[derive(Debug, Error)]
pub enum I18nError {
    // ==================== Loading ====================
    /// The locale subdirectory is missing or is not a directory
    #[error("the directory '{}' does not exist or is not a directory", .0.display())]
    DirectoryNotFound(PathBuf),

    /// A locale directory contains something other than a regular file
    #[error("the file '{}' is not a regular file", .0.display())]
    NotARegularFile(PathBuf),

    /// A namespace document could not be read
    #[error("the file '{}' cannot be opened: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A namespace document is not valid JSON or its root is not an object
    #[error("the file '{}' is not a valid JSON document: {}", .path.display(), .reason)]
    InvalidDocument { path: PathBuf, reason: String },

    // ==================== Configuration ====================
    /// The supported-locale list given was empty
    #[error("the supported locales list is empty")]
    EmptyLocaleList,

    /// The locale is not a member of the supported set
    #[error("the locale '{0}' is not supported")]
    LocaleNotSupported(String),

    /// The locale is already a member of the supported set
    #[error("the locale '{0}' is already supported")]
    LocaleAlreadySupported(String),

    /// The system locale could not be determined
    #[error("the locale could not be auto-detected")]
    AutoDetectUnavailable,

    // ==================== Lookup ====================
    /// The current locale has no loaded table
    #[error("the locale '{0}' is not loaded")]
    LocaleNotLoaded(String),

    /// The namespace has no document under the current locale
    #[error("the namespace '{namespace}' is not loaded for locale '{locale}'")]
    NamespaceNotLoaded { locale: String, namespace: String },

    /// The key does not exist in the namespace
    #[error("the key '{key}' does not exist in namespace '{namespace}'")]
    KeyNotFound { namespace: String, key: String },

    /// The key exists but its value is not a string
    #[error("the value of key '{key}' in namespace '{namespace}' is not a string")]
    ValueNotString { namespace: String, key: String },
}

impl I18nError {
    /// Whether this error came from resolving a key rather than from loading.
    pub fn is_lookup_error(&self) -> bool {
        matches!(
            self,
            I18nError::LocaleNotLoaded(_)
                | I18nError::NamespaceNotLoaded { .. }
                | I18nError::KeyNotFound { .. }
                | I18nError::ValueNotString { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, I18nError>;
