#![forbid(unsafe_code)]

//! Pure selection logic: no state, no side effects.
//!
//! Every function takes the caller's option list and selected values and
//! returns fresh data. Selected values with no matching option are carried
//! through untouched.

use super::strings::Strings;

/// One choice offered by the dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SelectOption {
    /// Unique key reported through `on_change`.
    pub value: String,
    /// Text shown to the user.
    pub label: String,
    /// Disabled options are shown but cannot be toggled.
    pub disabled: bool,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            disabled: false,
        }
    }

    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

/// What the trigger shows in place of the selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Summary {
    /// Nothing selected: show this placeholder.
    Placeholder(String),
    /// Few enough selections to list them as chips.
    Chips,
    /// Too many for chips: show this count text.
    Count(String),
}

/// Options whose value is selected, in option order.
pub fn selected_options<'o>(
    options: &'o [SelectOption],
    selected_values: &[String],
) -> Vec<&'o SelectOption> {
    options
        .iter()
        .filter(|opt| selected_values.iter().any(|v| *v == opt.value))
        .collect()
}

/// `selected_values` with `value` removed if present, appended otherwise.
///
/// Does not look at `disabled`; callers gate that.
pub fn toggle(selected_values: &[String], value: &str) -> Vec<String> {
    if selected_values.iter().any(|v| v == value) {
        remove(selected_values, value)
    } else {
        let mut next = selected_values.to_vec();
        next.push(value.to_string());
        next
    }
}

/// `selected_values` without `value`.
pub fn remove(selected_values: &[String], value: &str) -> Vec<String> {
    selected_values
        .iter()
        .filter(|v| *v != value)
        .cloned()
        .collect()
}

/// Decide between placeholder, chips, and a count for the trigger.
pub fn display_summary(
    selected_values: &[String],
    max_chips: usize,
    placeholder: &str,
    strings: &Strings<'_>,
) -> Summary {
    let count = selected_values.len();
    if count == 0 {
        Summary::Placeholder(placeholder.to_string())
    } else if count <= max_chips {
        Summary::Chips
    } else {
        Summary::Count(strings.selected_count(count))
    }
}

/// Indices into `options` that match `search_term`.
///
/// Case-insensitive substring match on the label. A blank term, or
/// `searchable == false`, keeps every option.
pub fn filter_options(options: &[SelectOption], search_term: &str, searchable: bool) -> Vec<usize> {
    if !searchable || search_term.is_empty() {
        return (0..options.len()).collect();
    }
    let needle = search_term.to_lowercase();
    options
        .iter()
        .enumerate()
        .filter(|(_, opt)| opt.label.to_lowercase().contains(&needle))
        .map(|(i, _)| i)
        .collect()
}
