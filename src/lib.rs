//! Translation-string lookup over JSON tables.
//!
//! Tables are loaded from `<directory>/<locale>/<namespace>.json`. A
//! [`Translator`] resolves a key in a namespace for its current locale and
//! substitutes `{{ name }}` placeholders. Lookups that cannot be resolved
//! return `"<namespace>.<key>"` so callers always have displayable text.
//!
//! # Architecture
//!
//! - `config`: `LocaleConfig` and its defaults / environment loading
//! - `table`: loaded tables and the all-or-nothing disk loader
//! - `placeholder`: `{{ name }}` substitution
//! - `detect`: system locale detection
//! - `translator`: the `Translator` itself
//! - `metrics`: per-translator lookup counters
//! - `validator`: cross-locale consistency report
//!
//! # Example
//!
//! ```rust,ignore
//! use i18n_lookup::{LocaleConfig, Translator};
//!
//! let translator = Translator::new(LocaleConfig::default());
//! assert_eq!(translator.translate("test1", "test_basic"), "This is a test");
//! assert_eq!(
//!     translator.t("test1", "test_parameters", [("name", "John")]),
//!     "My name is John"
//! );
//! ```

pub mod config;
pub mod detect;
pub mod error;
pub mod metrics;
pub mod placeholder;
pub mod table;
pub mod translator;
pub mod validator;

pub use config::LocaleConfig;
pub use detect::{LocaleDetector, SystemLocale};
pub use error::{I18nError, Result};
pub use metrics::{LookupMetrics, MetricsReport};
pub use table::LocaleTable;
pub use translator::{fallback, Translator};
pub use validator::{TableValidator, ValidationReport};
