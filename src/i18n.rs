//! Locale store and translation bundles.
//!
//! Two bundles are compiled into the binary. The store owns the active tag
//! and derives the bundle from it on every lookup, so the two can never
//! disagree. Missing keys resolve to the caller's fallback, never to the
//! other language.

use std::{fmt, str::FromStr, sync::OnceLock};

use serde_json::Value;
use thiserror::Error;

use crate::storage::{Persistence, LOCALE_KEY};

const CS_SOURCE: &str = include_str!("../locales/cs.json");
const EN_SOURCE: &str = include_str!("../locales/en.json");

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocaleError {
    #[error("unsupported locale tag `{0}`")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Locale {
    Cs,
    En,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::Cs, Locale::En];
    pub const DEFAULT: Locale = Locale::Cs;

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cs => "cs",
            Self::En => "en",
        }
    }

    /// The other supported locale; drives the language switcher.
    pub fn toggled(self) -> Self {
        match self {
            Self::Cs => Self::En,
            Self::En => Self::Cs,
        }
    }

    /// Short uppercase label shown on the switcher.
    pub fn label(self) -> &'static str {
        match self {
            Self::Cs => "CS",
            Self::En => "EN",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = LocaleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "cs" => Ok(Self::Cs),
            "en" => Ok(Self::En),
            _ => Err(LocaleError::Invalid(value.to_string())),
        }
    }
}

/// Nested key-path to string mapping for one locale.
#[derive(Debug)]
pub struct Bundle {
    root: Value,
}

impl Bundle {
    pub fn parse(source: &str) -> Result<Self, serde_json::Error> {
        let root = serde_json::from_str(source)?;
        Ok(Self { root })
    }

    fn empty() -> Self {
        Self {
            root: Value::Object(serde_json::Map::new()),
        }
    }

    fn node(&self, key_path: &str) -> Option<&Value> {
        let mut current = &self.root;

        for segment in key_path.split('.') {
            if segment.is_empty() {
                return None;
            }

            current = match current {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }

        Some(current)
    }

    pub fn lookup(&self, key_path: &str) -> Option<&str> {
        self.node(key_path)?.as_str()
    }

    /// String array at `key_path`; `None` unless every element is a string.
    pub fn lookup_list(&self, key_path: &str) -> Option<Vec<&str>> {
        self.node(key_path)?
            .as_array()?
            .iter()
            .map(Value::as_str)
            .collect()
    }

    /// Every leaf key-path in the bundle, sorted.
    pub fn key_paths(&self) -> Vec<String> {
        fn walk(prefix: &str, value: &Value, out: &mut Vec<String>) {
            match value {
                Value::Object(map) => {
                    for (key, child) in map {
                        let path = if prefix.is_empty() {
                            key.clone()
                        } else {
                            format!("{prefix}.{key}")
                        };
                        walk(&path, child, out);
                    }
                }
                _ if !prefix.is_empty() => out.push(prefix.to_string()),
                _ => {}
            }
        }

        let mut out = Vec::new();
        walk("", &self.root, &mut out);
        out.sort();
        out
    }
}

fn load_bundle(locale: Locale, source: &str) -> Bundle {
    Bundle::parse(source).unwrap_or_else(|error| {
        tracing::error!(locale = locale.as_str(), error = %error, "translation bundle failed to parse");
        Bundle::empty()
    })
}

/// The statically compiled bundle registered for `locale`.
pub fn bundle(locale: Locale) -> &'static Bundle {
    static CS: OnceLock<Bundle> = OnceLock::new();
    static EN: OnceLock<Bundle> = OnceLock::new();

    match locale {
        Locale::Cs => CS.get_or_init(|| load_bundle(Locale::Cs, CS_SOURCE)),
        Locale::En => EN.get_or_init(|| load_bundle(Locale::En, EN_SOURCE)),
    }
}

/// Key-paths defined in `from` that `to` does not define.
pub fn missing_keys(from: Locale, to: Locale) -> Vec<String> {
    let target = bundle(to);
    bundle(from)
        .key_paths()
        .into_iter()
        .filter(|path| target.node(path).is_none())
        .collect()
}

/// Active locale plus its persistence.
///
/// A fresh store renders with [`Locale::DEFAULT`] and reports itself as not
/// stable; [`LocaleStore::hydrate`] applies the persisted choice once the
/// client runtime is attached. Text should only be treated as final after
/// that second pass.
#[derive(Debug, Clone)]
pub struct LocaleStore {
    active: Locale,
    hydrated: bool,
    persistence: Persistence,
}

impl LocaleStore {
    pub fn new(persistence: Persistence) -> Self {
        Self {
            active: Locale::DEFAULT,
            hydrated: false,
            persistence,
        }
    }

    pub fn hydrated(persistence: Persistence) -> Self {
        let mut store = Self::new(persistence);
        store.hydrate();
        store
    }

    /// Reads the persisted tag. Absent or invalid values keep the default.
    /// Only the first call has any effect.
    pub fn hydrate(&mut self) -> Locale {
        if self.hydrated {
            return self.active;
        }
        self.hydrated = true;

        if let Some(stored) = self.persistence.get(LOCALE_KEY) {
            match stored.parse::<Locale>() {
                Ok(locale) => self.active = locale,
                Err(error) => tracing::debug!(error = %error, "ignoring persisted locale"),
            }
        }

        self.active
    }

    pub fn is_stable(&self) -> bool {
        self.hydrated
    }

    pub fn locale(&self) -> Locale {
        self.active
    }

    pub fn bundle(&self) -> &'static Bundle {
        bundle(self.active)
    }

    /// Validates `tag` and switches to it. Rejected tags leave the store
    /// untouched.
    pub fn set_locale(&mut self, tag: &str) -> Result<Locale, LocaleError> {
        let locale = tag.parse::<Locale>()?;
        self.select(locale);
        Ok(locale)
    }

    pub fn select(&mut self, locale: Locale) {
        self.active = locale;
        self.persistence.set(LOCALE_KEY, locale.as_str());
    }

    pub fn toggle(&mut self) -> Locale {
        let next = self.active.toggled();
        self.select(next);
        next
    }

    pub fn translate<'a>(&self, key_path: &str, fallback: &'a str) -> &'a str {
        match self.bundle().lookup(key_path) {
            Some(value) if !value.is_empty() => value,
            _ => {
                tracing::debug!(locale = self.active.as_str(), key_path, "missing translation");
                fallback
            }
        }
    }

    pub fn translate_list(&self, key_path: &str) -> Option<Vec<&'static str>> {
        self.bundle().lookup_list(key_path)
    }
}

impl PartialEq for LocaleStore {
    fn eq(&self, other: &Self) -> bool {
        self.active == other.active
            && self.hydrated == other.hydrated
            && self.persistence == other.persistence
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{tests::ReadOnlyStorage, MemoryStorage, StorageBackend};
    use proptest::prelude::*;

    fn store_with(storage: &MemoryStorage) -> LocaleStore {
        LocaleStore::new(Persistence::new("local", storage.clone()))
    }

    #[test]
    fn both_bundles_parse() {
        for locale in Locale::ALL {
            assert!(!bundle(locale).key_paths().is_empty(), "{locale} bundle is empty");
        }
    }

    #[test]
    fn tags_parse_case_insensitively() {
        assert_eq!(" EN ".parse::<Locale>(), Ok(Locale::En));
        assert_eq!("cs".parse::<Locale>(), Ok(Locale::Cs));
        assert_eq!(
            "de".parse::<Locale>(),
            Err(LocaleError::Invalid("de".to_string()))
        );
    }

    #[test]
    fn fresh_store_uses_default_until_hydrated() {
        let storage = MemoryStorage::new();
        storage.set(LOCALE_KEY, "en").expect("memory write");

        let mut store = store_with(&storage);
        assert_eq!(store.locale(), Locale::Cs);
        assert!(!store.is_stable());

        assert_eq!(store.hydrate(), Locale::En);
        assert!(store.is_stable());
    }

    #[test]
    fn invalid_persisted_tag_falls_back_to_default() {
        let storage = MemoryStorage::new();
        storage.set(LOCALE_KEY, "klingon").expect("memory write");

        let store = LocaleStore::hydrated(Persistence::new("local", storage));
        assert_eq!(store.locale(), Locale::DEFAULT);
    }

    #[test]
    fn set_locale_round_trips_through_reload() {
        let storage = MemoryStorage::new();
        let mut store = store_with(&storage);
        store.hydrate();

        store.set_locale("en").expect("en is supported");

        let reloaded = LocaleStore::hydrated(Persistence::new("local", storage));
        assert_eq!(reloaded.locale(), Locale::En);
    }

    #[test]
    fn invalid_set_is_rejected_and_changes_nothing() {
        let storage = MemoryStorage::new();
        let mut store = store_with(&storage);

        let result = store.set_locale("fr");

        assert_eq!(result, Err(LocaleError::Invalid("fr".to_string())));
        assert_eq!(store.locale(), Locale::Cs);
        assert!(storage.is_empty());
    }

    #[test]
    fn set_locale_survives_failed_persistence() {
        let mut store = LocaleStore::new(Persistence::new("local", ReadOnlyStorage::default()));

        store.set_locale("en").expect("write failure is not an error");

        assert_eq!(store.locale(), Locale::En);
        assert_eq!(store.translate("nav.home", "?"), "Home");
    }

    #[test]
    fn bundle_follows_active_tag() {
        let mut store = LocaleStore::new(Persistence::noop("local"));
        assert_eq!(store.translate("nav.about", "About"), "O nás");

        store.toggle();
        assert_eq!(store.locale(), Locale::En);
        assert_eq!(store.translate("nav.about", "?"), "About");
    }

    #[test]
    fn lists_and_indices_resolve() {
        let store = LocaleStore::new(Persistence::noop("local"));

        let results = store
            .translate_list("projects.items.bks-hotel-digitization.results")
            .expect("cs defines results");
        assert_eq!(results.len(), 3);
        assert_eq!(
            store.translate("projects.items.bks-hotel-digitization.results.1", ""),
            results[1]
        );
    }

    #[test]
    fn malformed_key_paths_use_fallback() {
        let store = LocaleStore::new(Persistence::noop("local"));

        for key in ["", ".", "nav.", "nav..home", "nav", "nav.home.deeper"] {
            assert_eq!(store.translate(key, "fallback"), "fallback", "key {key:?}");
        }
    }

    #[test]
    fn english_lacks_only_item_copy() {
        const RECORD_BACKED: [&str; 4] = [
            "projects.items.",
            "services.items.",
            "testimonials.items.",
            "techStack.items.",
        ];
        let missing = missing_keys(Locale::Cs, Locale::En);

        assert!(!missing.is_empty());
        assert!(missing.contains(&"services.items.support.description".to_string()));
        assert!(missing
            .iter()
            .all(|path| RECORD_BACKED.iter().any(|prefix| path.starts_with(prefix))));
        assert!(missing_keys(Locale::En, Locale::Cs).is_empty());
    }

    #[test]
    fn keys_missing_in_english_fall_back() {
        let mut store = LocaleStore::new(Persistence::noop("local"));
        store.select(Locale::En);

        for path in missing_keys(Locale::Cs, Locale::En) {
            assert_eq!(store.translate(&path, "literal default"), "literal default");
        }
    }

    proptest! {
        #[test]
        fn translate_never_panics_or_returns_empty(key in "[a-zA-Z.]{0,40}", fallback in "[a-z]{1,12}") {
            for locale in Locale::ALL {
                let mut store = LocaleStore::new(Persistence::noop("local"));
                store.select(locale);
                let value = store.translate(&key, &fallback);
                prop_assert!(!value.is_empty());
            }
        }
    }
}
