#![forbid(unsafe_code)]

//! Localized strings for IzenDoc widgets.
//!
//! Key-based lookup with a locale fallback chain, CLDR-style plural
//! categories, and `{name}` interpolation.

pub mod catalog;
pub mod plural;

pub use catalog::{I18nError, LocaleStrings, StringCatalog, StringEntry};
pub use plural::{PluralCategory, PluralForms, PluralRule};
