#![forbid(unsafe_code)]

//! Plural categories and per-language selection rules.

/// CLDR plural category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluralCategory {
    Zero,
    One,
    Two,
    Few,
    Many,
    Other,
}

/// Rule mapping a count to a [`PluralCategory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PluralRule {
    /// one: n == 1; other otherwise. Also Spanish, German, Dutch...
    #[default]
    English,
    /// East Slavic: one / few / many by the last two digits.
    Russian,
    /// one: n is 0 or 1; other otherwise.
    French,
    /// Always other (Chinese, Japanese, Korean...).
    Invariant,
}

impl PluralRule {
    /// Pick a rule from a BCP-47-ish tag by its primary language subtag.
    #[must_use]
    pub fn for_locale(locale: &str) -> Self {
        let lang = locale
            .split(['-', '_'])
            .next()
            .unwrap_or(locale)
            .to_ascii_lowercase();
        match lang.as_str() {
            "ru" | "uk" | "be" => Self::Russian,
            "fr" | "pt" => Self::French,
            "zh" | "ja" | "ko" | "vi" | "th" | "id" => Self::Invariant,
            _ => Self::English,
        }
    }

    /// Category for `count`. Negative counts use their magnitude.
    #[must_use]
    pub fn categorize(self, count: i64) -> PluralCategory {
        let n = count.unsigned_abs();
        match self {
            Self::English => {
                if n == 1 {
                    PluralCategory::One
                } else {
                    PluralCategory::Other
                }
            }
            Self::French => {
                if n <= 1 {
                    PluralCategory::One
                } else {
                    PluralCategory::Other
                }
            }
            Self::Russian => {
                let mod10 = n % 10;
                let mod100 = n % 100;
                if mod10 == 1 && mod100 != 11 {
                    PluralCategory::One
                } else if (2..=4).contains(&mod10) && !(12..=14).contains(&mod100) {
                    PluralCategory::Few
                } else {
                    PluralCategory::Many
                }
            }
            Self::Invariant => PluralCategory::Other,
        }
    }
}

/// Plural variants of one message. Empty variants fall back to `other`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluralForms {
    pub zero: String,
    pub one: String,
    pub two: String,
    pub few: String,
    pub many: String,
    pub other: String,
}

impl PluralForms {
    /// The variant for `category`, or `other` if that variant is empty.
    #[must_use]
    pub fn select(&self, category: PluralCategory) -> &str {
        let form = match category {
            PluralCategory::Zero => &self.zero,
            PluralCategory::One => &self.one,
            PluralCategory::Two => &self.two,
            PluralCategory::Few => &self.few,
            PluralCategory::Many => &self.many,
            PluralCategory::Other => &self.other,
        };
        if form.is_empty() { &self.other } else { form }
    }

    /// Mutable slot by category name (`"one"`, `"few"`, ...).
    pub(crate) fn slot_mut(&mut self, name: &str) -> Option<&mut String> {
        match name {
            "zero" => Some(&mut self.zero),
            "one" => Some(&mut self.one),
            "two" => Some(&mut self.two),
            "few" => Some(&mut self.few),
            "many" => Some(&mut self.many),
            "other" => Some(&mut self.other),
            _ => None,
        }
    }
}
