//! Cross-locale consistency checks for loaded translation tables.
//!
//! The first loaded supported locale is the reference. Every other loaded
//! locale is compared against it: missing namespaces and keys are errors,
//! extra keys, non-string values and placeholder mismatches are warnings.

use crate::placeholder::placeholders;
use crate::table::{LocaleTable, Namespace};
use crate::translator::Translator;
use serde::Serialize;
use serde_json::Value;

/// Validation report containing errors and warnings about loaded tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Locale the others were compared against, if any was loaded
    pub reference: Option<String>,

    /// Keys or namespaces that other locales are missing
    pub errors: Vec<String>,

    /// Non-critical issues (extra keys, non-string values, placeholder drift)
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Create a new empty validation report
    pub fn new() -> Self {
        Self {
            reference: None,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Check if the report has any errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Check if the report has any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if the report is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for loaded translation tables.
pub struct TableValidator;

impl TableValidator {
    /// Validate every loaded locale of `translator` against the reference locale.
    pub fn validate(translator: &Translator) -> ValidationReport {
        let mut report = ValidationReport::new();

        let loaded: Vec<(&str, &LocaleTable)> = translator
            .supported_locales()
            .iter()
            .filter_map(|locale| translator.table(locale).map(|t| (locale.as_str(), t)))
            .collect();

        let Some(&(reference, reference_table)) = loaded.first() else {
            report.warnings.push("No locale is loaded".to_string());
            return report;
        };
        report.reference = Some(reference.to_string());

        for &(locale, table) in &loaded {
            Self::check_value_types(locale, table, &mut report);
        }

        for &(locale, table) in loaded.iter().skip(1) {
            Self::compare_locale(reference, reference_table, locale, table, &mut report);
        }

        report.errors.sort();
        report.warnings.sort();
        report
    }

    fn check_value_types(locale: &str, table: &LocaleTable, report: &mut ValidationReport) {
        for (namespace, document) in table.iter() {
            for (key, value) in document {
                if !value.is_string() {
                    report.warnings.push(format!(
                        "[{}] {}.{} is not a string and cannot be looked up",
                        locale, namespace, key
                    ));
                }
            }
        }
    }

    fn compare_locale(
        reference: &str,
        reference_table: &LocaleTable,
        locale: &str,
        table: &LocaleTable,
        report: &mut ValidationReport,
    ) {
        for (namespace, expected) in reference_table.iter() {
            match table.namespace(namespace) {
                Some(actual) => {
                    Self::compare_namespace(reference, locale, namespace, expected, actual, report)
                }
                None => report.errors.push(format!(
                    "[{}] missing namespace '{}' present in '{}'",
                    locale, namespace, reference
                )),
            }
        }

        for namespace in table.namespace_names() {
            if reference_table.namespace(namespace).is_none() {
                report.warnings.push(format!(
                    "[{}] namespace '{}' is not present in '{}'",
                    locale, namespace, reference
                ));
            }
        }
    }

    fn compare_namespace(
        reference: &str,
        locale: &str,
        namespace: &str,
        expected: &Namespace,
        actual: &Namespace,
        report: &mut ValidationReport,
    ) {
        for (key, expected_value) in expected {
            let Some(actual_value) = actual.get(key) else {
                report.errors.push(format!(
                    "[{}] missing key {}.{} present in '{}'",
                    locale, namespace, key, reference
                ));
                continue;
            };

            if let (Value::String(expected_text), Value::String(actual_text)) =
                (expected_value, actual_value)
            {
                let mut expected_names = placeholders(expected_text);
                let mut actual_names = placeholders(actual_text);
                expected_names.sort();
                actual_names.sort();
                if expected_names != actual_names {
                    report.warnings.push(format!(
                        "[{}] placeholder mismatch in {}.{}: '{}' has {:?}, translation has {:?}",
                        locale, namespace, key, reference, expected_names, actual_names
                    ));
                }
            }
        }

        for key in actual.keys() {
            if !expected.contains_key(key) {
                report.warnings.push(format!(
                    "[{}] key {}.{} is not present in '{}'",
                    locale, namespace, key, reference
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LocaleConfig;
    use std::path::Path;
    use tempfile::TempDir;

    fn write(root: &Path, locale: &str, name: &str, content: &str) {
        let dir = root.join(locale);
        std::fs::create_dir_all(&dir).expect("Failed to create locale dir");
        std::fs::write(dir.join(name), content).expect("Failed to write fixture");
    }

    fn load(root: &TempDir, locales: &[&str]) -> Translator {
        let config = LocaleConfig::default()
            .with_directory(root.path().to_string_lossy())
            .with_supported_locales(locales.iter().copied());
        Translator::try_new(config).expect("fixture should load")
    }

    // ==================== Report Tests ====================

    #[test]
    fn test_report_new_is_clean() {
        let report = ValidationReport::new();
        assert!(report.is_clean());
        assert!(!report.has_errors());
        assert!(!report.has_warnings());
    }

    // ==================== Validation Tests ====================

    #[test]
    fn test_consistent_locales_are_clean() {
        let root = TempDir::new().expect("Failed to create temp dir");
        write(root.path(), "en", "home.json", r#"{"hi": "Hi {{ name }}"}"#);
        write(root.path(), "fr", "home.json", r#"{"hi": "Salut {{ name }}"}"#);

        let report = TableValidator::validate(&load(&root, &["en", "fr"]));
        assert!(report.is_clean(), "{:?}", report);
        assert_eq!(report.reference.as_deref(), Some("en"));
    }

    #[test]
    fn test_missing_key_and_namespace_are_errors() {
        let root = TempDir::new().expect("Failed to create temp dir");
        write(root.path(), "en", "home.json", r#"{"a": "A", "b": "B"}"#);
        write(root.path(), "en", "menu.json", r#"{"open": "Open"}"#);
        write(root.path(), "fr", "home.json", r#"{"a": "A"}"#);

        let report = TableValidator::validate(&load(&root, &["en", "fr"]));
        assert_eq!(report.errors.len(), 2);
        assert!(report.errors.iter().any(|e| e.contains("home.b")));
        assert!(report.errors.iter().any(|e| e.contains("namespace 'menu'")));
    }

    #[test]
    fn test_extra_key_and_non_string_are_warnings() {
        let root = TempDir::new().expect("Failed to create temp dir");
        write(root.path(), "en", "home.json", r#"{"a": "A", "n": 1}"#);
        write(root.path(), "fr", "home.json", r#"{"a": "A", "n": 1, "extra": "E"}"#);

        let report = TableValidator::validate(&load(&root, &["en", "fr"]));
        assert!(!report.has_errors());
        assert!(report.warnings.iter().any(|w| w.contains("home.extra")));
        assert_eq!(
            report
                .warnings
                .iter()
                .filter(|w| w.contains("is not a string"))
                .count(),
            2
        );
    }

    #[test]
    fn test_placeholder_mismatch_is_warning() {
        let root = TempDir::new().expect("Failed to create temp dir");
        write(root.path(), "en", "home.json", r#"{"hi": "Hi {{ name }}"}"#);
        write(root.path(), "fr", "home.json", r#"{"hi": "Salut {{ nom }}"}"#);

        let report = TableValidator::validate(&load(&root, &["en", "fr"]));
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("placeholder mismatch"));
    }

    #[test]
    fn test_nothing_loaded() {
        let config = LocaleConfig::default().with_directory("does/not/exist");
        let report = TableValidator::validate(&Translator::new(config));
        assert_eq!(report.reference, None);
        assert_eq!(report.warnings, vec!["No locale is loaded"]);
    }
}
