#![forbid(unsafe_code)]

//! String catalog with locale fallback and interpolation.
//!
//! # Invariants
//!
//! 1. Every lookup walks the requested locale and then the fallback chain
//!    once, returning `None` if nobody provides the key.
//! 2. `format()` replaces `{name}` tokens in a single pass; substituted
//!    values are never re-scanned.
//!
//! # Catalog text format
//!
//! ```text
//! # comment
//! placeholder = Select...
//! selected_count.one = {count} selected
//! selected_count.other = {count} selected
//! ```
//!
//! A key with a `.zero/.one/.two/.few/.many/.other` suffix contributes to
//! plural forms; anything else is a simple string.

use std::collections::HashMap;

use crate::plural::{PluralForms, PluralRule};

/// Errors from i18n operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum I18nError {
    /// A locale tag was malformed.
    InvalidLocale(String),
    /// Catalog text could not be parsed.
    ParseError { line: usize, message: String },
    /// Duplicate key in the same locale.
    DuplicateKey { locale: String, key: String },
}

impl std::fmt::Display for I18nError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLocale(l) => write!(f, "invalid locale: {l:?}"),
            Self::ParseError { line, message } => write!(f, "parse error on line {line}: {message}"),
            Self::DuplicateKey { locale, key } => {
                write!(f, "duplicate key '{key}' in locale '{locale}'")
            }
        }
    }
}

impl std::error::Error for I18nError {}

/// A single string entry: either a simple string or plural forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StringEntry {
    Simple(String),
    Plural(PluralForms),
}

impl StringEntry {
    /// The non-plural reading of the entry.
    fn as_simple(&self) -> &str {
        match self {
            Self::Simple(s) => s,
            Self::Plural(p) => &p.other,
        }
    }
}

/// Strings for a single locale.
#[derive(Debug, Clone, Default)]
pub struct LocaleStrings {
    strings: HashMap<String, StringEntry>,
}

impl LocaleStrings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a simple string, replacing any previous entry.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.strings
            .insert(key.into(), StringEntry::Simple(value.into()));
    }

    /// Insert plural forms, replacing any previous entry.
    pub fn insert_plural(&mut self, key: impl Into<String>, forms: PluralForms) {
        self.strings.insert(key.into(), StringEntry::Plural(forms));
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&StringEntry> {
        self.strings.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.strings.keys().map(String::as_str)
    }

    /// Parse catalog text (see the module docs for the format).
    ///
    /// `locale` is only used to label errors.
    pub fn parse(locale: &str, text: &str) -> Result<Self, I18nError> {
        let mut out = Self::new();
        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                return Err(I18nError::ParseError {
                    line: line_no,
                    message: format!("expected `key = value`, found {line:?}"),
                });
            };
            let key = key.trim();
            let value = value.trim().to_string();
            if key.is_empty() || key.chars().any(char::is_whitespace) {
                return Err(I18nError::ParseError {
                    line: line_no,
                    message: format!("invalid key {key:?}"),
                });
            }

            let duplicate = || I18nError::DuplicateKey {
                locale: locale.to_string(),
                key: key.to_string(),
            };

            let plural = key.rsplit_once('.').filter(|(_, cat)| {
                matches!(*cat, "zero" | "one" | "two" | "few" | "many" | "other")
            });
            match plural {
                Some((base, category)) => {
                    let entry = out
                        .strings
                        .entry(base.to_string())
                        .or_insert_with(|| StringEntry::Plural(PluralForms::default()));
                    let StringEntry::Plural(forms) = entry else {
                        return Err(duplicate());
                    };
                    match forms.slot_mut(category) {
                        Some(slot) if slot.is_empty() => *slot = value,
                        _ => return Err(duplicate()),
                    }
                }
                None => {
                    if out.strings.contains_key(key) {
                        return Err(duplicate());
                    }
                    out.insert(key, value);
                }
            }
        }
        Ok(out)
    }
}

/// Central string catalog with locale fallback and pluralization.
///
/// # Example
///
/// ```
/// use izui_i18n::catalog::{StringCatalog, LocaleStrings};
/// use izui_i18n::plural::PluralForms;
///
/// let mut catalog = StringCatalog::new();
/// let mut en = LocaleStrings::new();
/// en.insert("welcome", "Welcome, {name}!");
/// en.insert_plural("items", PluralForms {
///     one: "{count} item".into(),
///     other: "{count} items".into(),
///     ..Default::default()
/// });
/// catalog.add_locale("en", en);
/// catalog.set_fallback_chain(vec!["en".into()]);
///
/// assert_eq!(
///     catalog.format("es", "welcome", &[("name", "Ana")]),
///     Some("Welcome, Ana!".into())
/// );
/// assert_eq!(catalog.format_plural("en", "items", 5, &[]), Some("5 items".into()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct StringCatalog {
    locales: HashMap<String, LocaleStrings>,
    fallback_chain: Vec<String>,
    plural_rules: HashMap<String, PluralRule>,
}

impl StringCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add strings for a locale, deriving its plural rule from the tag.
    pub fn add_locale(&mut self, locale: impl Into<String>, strings: LocaleStrings) {
        let locale = locale.into();
        self.plural_rules
            .insert(locale.clone(), PluralRule::for_locale(&locale));
        self.locales.insert(locale, strings);
    }

    /// Validate `locale`, parse `text`, and add the result.
    pub fn load_locale(&mut self, locale: &str, text: &str) -> Result<(), I18nError> {
        validate_locale(locale)?;
        let strings = LocaleStrings::parse(locale, text)?;
        self.add_locale(locale, strings);
        Ok(())
    }

    /// Locales tried in order when a key is missing.
    pub fn set_fallback_chain(&mut self, chain: Vec<String>) {
        self.fallback_chain = chain;
    }

    /// Override the plural rule for a locale.
    pub fn set_plural_rule(&mut self, locale: impl Into<String>, rule: PluralRule) {
        self.plural_rules.insert(locale.into(), rule);
    }

    /// The requested locale, then the fallback chain (without repeats).
    fn chain<'a>(&'a self, locale: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        std::iter::once(locale).chain(
            self.fallback_chain
                .iter()
                .map(String::as_str)
                .filter(move |l| *l != locale),
        )
    }

    /// First entry for `key` along the chain, with the answering locale's rule.
    fn entry(&self, locale: &str, key: &str) -> Option<(PluralRule, &StringEntry)> {
        self.chain(locale).find_map(|tag| {
            let entry = self.locales.get(tag)?.get(key)?;
            let rule = self.plural_rules.get(tag).copied().unwrap_or_default();
            Some((rule, entry))
        })
    }

    /// Look up a simple string by key.
    #[must_use]
    pub fn get(&self, locale: &str, key: &str) -> Option<&str> {
        self.entry(locale, key).map(|(_, entry)| entry.as_simple())
    }

    /// Look up a plural string, using the rule of whichever locale answers.
    #[must_use]
    pub fn get_plural(&self, locale: &str, key: &str, count: i64) -> Option<&str> {
        self.entry(locale, key).map(|(rule, entry)| match entry {
            StringEntry::Simple(s) => s.as_str(),
            StringEntry::Plural(forms) => forms.select(rule.categorize(count)),
        })
    }

    /// Look up a string and interpolate `{name}` tokens.
    #[must_use]
    pub fn format(&self, locale: &str, key: &str, args: &[(&str, &str)]) -> Option<String> {
        self.get(locale, key)
            .map(|template| interpolate(template, args))
    }

    /// Look up a plural string and interpolate; `{count}` is provided.
    #[must_use]
    pub fn format_plural(
        &self,
        locale: &str,
        key: &str,
        count: i64,
        extra_args: &[(&str, &str)],
    ) -> Option<String> {
        self.get_plural(locale, key, count).map(|template| {
            let count_str = count.to_string();
            let mut all_args: Vec<(&str, &str)> = vec![("count", &count_str)];
            all_args.extend_from_slice(extra_args);
            interpolate(template, &all_args)
        })
    }

    /// Registered locale tags, sorted.
    #[must_use]
    pub fn locales(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.locales.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }

    /// Every key known to any locale, sorted and deduplicated.
    #[must_use]
    pub fn all_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .locales
            .values()
            .flat_map(|ls| ls.keys().map(String::from))
            .collect();
        keys.sort_unstable();
        keys.dedup();
        keys
    }

    /// Keys of `reference` that `locale` cannot resolve, even via fallback.
    #[must_use]
    pub fn missing_keys(&self, locale: &str, reference: &[&str]) -> Vec<String> {
        let mut missing: Vec<String> = reference
            .iter()
            .filter(|key| self.get(locale, key).is_none())
            .map(|key| key.to_string())
            .collect();
        missing.sort_unstable();
        missing
    }
}

/// Accept tags like `en`, `es-MX`, `zh_Hant`.
fn validate_locale(locale: &str) -> Result<(), I18nError> {
    let ok = !locale.is_empty()
        && locale
            .split(['-', '_'])
            .all(|part| !part.is_empty() && part.len() <= 8 && part.chars().all(|c| c.is_ascii_alphanumeric()));
    if ok {
        Ok(())
    } else {
        Err(I18nError::InvalidLocale(locale.to_string()))
    }
}

/// Single-pass `{name}` interpolation. Unmatched tokens are left as-is.
fn interpolate(template: &str, args: &[(&str, &str)]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        result.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let name = &after[..close];
                match args.iter().find(|(n, _)| *n == name) {
                    Some((_, value)) => result.push_str(value),
                    None => {
                        result.push('{');
                        result.push_str(name);
                        result.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                result.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    result.push_str(rest);
    result
}
