#![forbid(unsafe_code)]

//! User-visible text of the multi-select, with English built in.

use std::sync::OnceLock;

use izui_i18n::{LocaleStrings, PluralForms, StringCatalog};

pub const KEY_PLACEHOLDER: &str = "multi_select.placeholder";
pub const KEY_SELECTED_COUNT: &str = "multi_select.selected_count";
pub const KEY_NO_OPTIONS: &str = "multi_select.no_options";
pub const KEY_NO_MATCHES: &str = "multi_select.no_matches";
pub const KEY_SEARCH_PROMPT: &str = "multi_select.search_prompt";
pub const KEY_CLEAR_ALL: &str = "multi_select.clear_all";
pub const KEY_REMOVE_CHIP: &str = "multi_select.remove_chip";

/// Every key the widget looks up.
pub const ALL_KEYS: [&str; 7] = [
    KEY_PLACEHOLDER,
    KEY_SELECTED_COUNT,
    KEY_NO_OPTIONS,
    KEY_NO_MATCHES,
    KEY_SEARCH_PROMPT,
    KEY_CLEAR_ALL,
    KEY_REMOVE_CHIP,
];

/// Catalog with English (the fallback), Spanish, and Russian.
pub fn default_catalog() -> &'static StringCatalog {
    static CATALOG: OnceLock<StringCatalog> = OnceLock::new();
    CATALOG.get_or_init(build_default_catalog)
}

fn build_default_catalog() -> StringCatalog {
    let mut catalog = StringCatalog::new();

    let mut en = LocaleStrings::new();
    en.insert(KEY_PLACEHOLDER, "Select...");
    en.insert_plural(
        KEY_SELECTED_COUNT,
        PluralForms {
            other: "{count} selected".into(),
            ..Default::default()
        },
    );
    en.insert(KEY_NO_OPTIONS, "No options available");
    en.insert(KEY_NO_MATCHES, "No matching options");
    en.insert(KEY_SEARCH_PROMPT, "Search...");
    en.insert(KEY_CLEAR_ALL, "Clear all");
    en.insert(KEY_REMOVE_CHIP, "Remove {label}");
    catalog.add_locale("en", en);

    let mut es = LocaleStrings::new();
    es.insert(KEY_PLACEHOLDER, "Seleccionar...");
    es.insert_plural(
        KEY_SELECTED_COUNT,
        PluralForms {
            one: "{count} seleccionado".into(),
            other: "{count} seleccionados".into(),
            ..Default::default()
        },
    );
    es.insert(KEY_NO_OPTIONS, "No hay opciones disponibles");
    es.insert(KEY_NO_MATCHES, "No hay opciones coincidentes");
    es.insert(KEY_SEARCH_PROMPT, "Buscar...");
    es.insert(KEY_CLEAR_ALL, "Borrar todo");
    es.insert(KEY_REMOVE_CHIP, "Quitar {label}");
    catalog.add_locale("es", es);

    let mut ru = LocaleStrings::new();
    ru.insert(KEY_PLACEHOLDER, "Выберите...");
    ru.insert_plural(
        KEY_SELECTED_COUNT,
        PluralForms {
            one: "Выбран {count} элемент".into(),
            few: "Выбрано {count} элемента".into(),
            many: "Выбрано {count} элементов".into(),
            other: "Выбрано {count} элемента".into(),
            ..Default::default()
        },
    );
    ru.insert(KEY_NO_OPTIONS, "Нет доступных вариантов");
    ru.insert(KEY_NO_MATCHES, "Нет совпадений");
    ru.insert(KEY_SEARCH_PROMPT, "Поиск...");
    ru.insert(KEY_CLEAR_ALL, "Очистить всё");
    ru.insert(KEY_REMOVE_CHIP, "Убрать {label}");
    catalog.add_locale("ru", ru);

    catalog.set_fallback_chain(vec!["en".into()]);
    catalog
}

/// Resolved text for one locale.
#[derive(Debug, Clone, Copy)]
pub struct Strings<'c> {
    catalog: &'c StringCatalog,
    locale: &'c str,
}

impl<'c> Strings<'c> {
    pub fn new(catalog: &'c StringCatalog, locale: &'c str) -> Self {
        Self { catalog, locale }
    }

    fn text(&self, key: &str, fallback: &str) -> String {
        self.catalog
            .get(self.locale, key)
            .unwrap_or(fallback)
            .to_string()
    }

    pub fn placeholder(&self) -> String {
        self.text(KEY_PLACEHOLDER, "Select...")
    }

    /// "N selected", pluralized for the locale.
    pub fn selected_count(&self, count: usize) -> String {
        let n = i64::try_from(count).unwrap_or(i64::MAX);
        self.catalog
            .format_plural(self.locale, KEY_SELECTED_COUNT, n, &[])
            .unwrap_or_else(|| format!("{count} selected"))
    }

    pub fn no_options(&self) -> String {
        self.text(KEY_NO_OPTIONS, "No options available")
    }

    pub fn no_matches(&self) -> String {
        self.text(KEY_NO_MATCHES, "No matching options")
    }

    pub fn search_prompt(&self) -> String {
        self.text(KEY_SEARCH_PROMPT, "Search...")
    }

    pub fn clear_all(&self) -> String {
        self.text(KEY_CLEAR_ALL, "Clear all")
    }

    /// Accessible name of a chip's remove control.
    pub fn remove_chip(&self, label: &str) -> String {
        self.catalog
            .format(self.locale, KEY_REMOVE_CHIP, &[("label", label)])
            .unwrap_or_else(|| format!("Remove {label}"))
    }
}
