//! In-memory translation tables and the loader that fills them from disk.
//!
//! Layout on disk is `<directory>/<locale>/<namespace>.<ext>`, one JSON
//! document per namespace. Loading a locale is all-or-nothing: the first bad
//! entry aborts it and nothing from that locale is kept.

use crate::error::{I18nError, Result};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One namespace document: key to raw JSON value.
pub type Namespace = Map<String, Value>;

/// Every loaded locale, keyed by locale identifier.
pub type Tables = BTreeMap<String, LocaleTable>;

/// All namespaces loaded for a single locale.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocaleTable {
    namespaces: BTreeMap<String, Namespace>,
}

impl LocaleTable {
    /// Load every document in `locale_dir`.
    ///
    /// # Errors
    /// * `DirectoryNotFound` if `locale_dir` is missing or not a directory
    /// * `NotARegularFile` if it contains anything but regular files
    /// * `Io` if a document cannot be read
    /// * `InvalidDocument` if a document is not a JSON object
    pub fn load(locale_dir: &Path) -> Result<Self> {
        if !locale_dir.is_dir() {
            return Err(I18nError::DirectoryNotFound(locale_dir.to_path_buf()));
        }

        let mut paths = fs::read_dir(locale_dir)
            .map_err(|source| io_error(locale_dir, source))?
            .map(|entry| {
                entry
                    .map(|e| e.path())
                    .map_err(|source| io_error(locale_dir, source))
            })
            .collect::<Result<Vec<PathBuf>>>()?;
        // Sorted so that repeated loads of the same tree are identical
        paths.sort();

        let mut table = LocaleTable::default();
        for path in paths {
            let metadata = fs::metadata(&path).map_err(|source| io_error(&path, source))?;
            if !metadata.is_file() {
                return Err(I18nError::NotARegularFile(path));
            }

            let document = read_document(&path)?;
            let name = namespace_name(&path);
            debug!(
                "Loaded namespace '{}' ({} keys) from {}",
                name,
                document.len(),
                path.display()
            );
            table.namespaces.insert(name, document);
        }

        Ok(table)
    }

    /// Get a namespace by name.
    pub fn namespace(&self, name: &str) -> Option<&Namespace> {
        self.namespaces.get(name)
    }

    /// Names of all loaded namespaces, sorted.
    pub fn namespace_names(&self) -> impl Iterator<Item = &str> {
        self.namespaces.keys().map(String::as_str)
    }

    /// Iterate over `(name, namespace)` pairs, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Namespace)> {
        self.namespaces.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of loaded namespaces.
    pub fn len(&self) -> usize {
        self.namespaces.len()
    }

    /// Whether the locale directory held no documents.
    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
    }
}

/// Load a single locale from `<directory>/<locale>`.
pub fn load_locale(directory: &str, locale: &str) -> Result<LocaleTable> {
    LocaleTable::load(&Path::new(directory).join(locale))
}

/// Load every locale in `locales`, stopping at the first failure.
pub fn load_all(directory: &str, locales: &[String]) -> Result<Tables> {
    let mut tables = Tables::new();
    for locale in locales {
        let table = load_locale(directory, locale)?;
        tables.insert(locale.clone(), table);
    }
    Ok(tables)
}

/// Namespace name for a document: the file name minus its last extension.
fn namespace_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn read_document(path: &Path) -> Result<Namespace> {
    let content = fs::read_to_string(path).map_err(|source| io_error(path, source))?;

    let value: Value =
        serde_json::from_str(&content).map_err(|e| I18nError::InvalidDocument {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(I18nError::InvalidDocument {
            path: path.to_path_buf(),
            reason: "root is not an object".to_string(),
        }),
    }
}

fn io_error(path: &Path, source: std::io::Error) -> I18nError {
    I18nError::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) {
        std::fs::write(dir.join(name), content).expect("Failed to write fixture");
    }

    fn locale_dir(root: &TempDir, locale: &str) -> PathBuf {
        let dir = root.path().join(locale);
        std::fs::create_dir_all(&dir).expect("Failed to create locale dir");
        dir
    }

    // ==================== Namespace Name Tests ====================

    #[test]
    fn test_namespace_name_strips_last_extension() {
        assert_eq!(namespace_name(Path::new("a/en/home.json")), "home");
        assert_eq!(namespace_name(Path::new("a/en/home.v2.json")), "home.v2");
        assert_eq!(namespace_name(Path::new("a/en/plain")), "plain");
    }

    // ==================== Load Tests ====================

    #[test]
    fn test_load_reads_every_document() {
        let root = TempDir::new().expect("Failed to create temp dir");
        let dir = locale_dir(&root, "en");
        write(&dir, "home.json", r#"{"title": "Home"}"#);
        write(&dir, "menu.json", r#"{"open": "Open", "close": "Close"}"#);

        let table = LocaleTable::load(&dir).expect("Should load");
        assert_eq!(table.len(), 2);
        assert_eq!(table.namespace_names().collect::<Vec<_>>(), vec!["home", "menu"]);
        assert_eq!(
            table.namespace("menu").and_then(|ns| ns.get("open")),
            Some(&Value::String("Open".to_string()))
        );
    }

    #[test]
    fn test_load_empty_directory() {
        let root = TempDir::new().expect("Failed to create temp dir");
        let dir = locale_dir(&root, "en");

        let table = LocaleTable::load(&dir).expect("Should load");
        assert!(table.is_empty());
    }

    #[test]
    fn test_load_keeps_nested_values() {
        let root = TempDir::new().expect("Failed to create temp dir");
        let dir = locale_dir(&root, "en");
        write(&dir, "home.json", r#"{"nested": {"a": "b"}, "count": 3}"#);

        let table = LocaleTable::load(&dir).expect("Should load");
        let ns = table.namespace("home").expect("namespace");
        assert!(ns.get("nested").map(Value::is_object).unwrap_or(false));
        assert!(ns.get("count").map(Value::is_number).unwrap_or(false));
    }

    #[test]
    fn test_load_missing_directory() {
        let root = TempDir::new().expect("Failed to create temp dir");
        let result = LocaleTable::load(&root.path().join("nope"));
        assert!(matches!(result, Err(I18nError::DirectoryNotFound(_))));
    }

    #[test]
    fn test_load_rejects_subdirectory() {
        let root = TempDir::new().expect("Failed to create temp dir");
        let dir = locale_dir(&root, "en");
        write(&dir, "home.json", r#"{"title": "Home"}"#);
        std::fs::create_dir(dir.join("nested")).expect("mkdir");

        let result = LocaleTable::load(&dir);
        assert!(matches!(result, Err(I18nError::NotARegularFile(_))));
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let root = TempDir::new().expect("Failed to create temp dir");
        let dir = locale_dir(&root, "en");
        write(&dir, "broken.json", r#"{"title": "#);

        let result = LocaleTable::load(&dir);
        assert!(matches!(result, Err(I18nError::InvalidDocument { .. })));
    }

    #[test]
    fn test_load_rejects_non_object_root() {
        let root = TempDir::new().expect("Failed to create temp dir");
        let dir = locale_dir(&root, "en");
        write(&dir, "list.json", r#"["a", "b"]"#);

        match LocaleTable::load(&dir) {
            Err(I18nError::InvalidDocument { reason, .. }) => {
                assert_eq!(reason, "root is not an object");
            }
            other => panic!("Expected InvalidDocument, got {:?}", other),
        }
    }

    // ==================== load_all Tests ====================

    #[test]
    fn test_load_all_is_all_or_nothing() {
        let root = TempDir::new().expect("Failed to create temp dir");
        let en = locale_dir(&root, "en");
        write(&en, "home.json", r#"{"title": "Home"}"#);

        let directory = format!("{}/", root.path().display());
        let locales = vec!["en".to_string(), "fr".to_string()];
        let result = load_all(&directory, &locales);
        assert!(matches!(result, Err(I18nError::DirectoryNotFound(_))));
    }

    #[test]
    fn test_load_all_is_idempotent() {
        let root = TempDir::new().expect("Failed to create temp dir");
        write(&locale_dir(&root, "en"), "home.json", r#"{"title": "Home"}"#);
        write(&locale_dir(&root, "fr"), "home.json", r#"{"title": "Accueil"}"#);

        let directory = format!("{}/", root.path().display());
        let locales = vec!["en".to_string(), "fr".to_string()];
        let first = load_all(&directory, &locales).expect("first load");
        let second = load_all(&directory, &locales).expect("second load");
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }
}
