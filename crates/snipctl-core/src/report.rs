//! Human-relevant fields of a finished result
//!
//! Each result type picks the handful of fields a person would want to see
//! after a recipe ran (status, identifiers, sizes, generated text). The CLI
//! prints them as `label: value` lines or as a two-column table; JSON and
//! YAML output use the full serialized result instead.

/// A labelled field extracted from a result
pub type Field = (&'static str, String);

pub trait Report {
    /// Fields in display order. Missing values are omitted, not blank.
    fn report(&self) -> Vec<Field>;

    /// `label: value` lines
    fn report_lines(&self) -> Vec<String> {
        self.report()
            .into_iter()
            .map(|(label, value)| format!("{}: {}", label, value))
            .collect()
    }
}

impl<T: Report> Report for Vec<T> {
    fn report(&self) -> Vec<Field> {
        self.iter().flat_map(Report::report).collect()
    }
}

/// Push `(label, value)` when the value is present
pub(crate) fn push_some<V: ToString>(fields: &mut Vec<Field>, label: &'static str, value: Option<V>) {
    if let Some(v) = value {
        fields.push((label, v.to_string()));
    }
}
