//! Tabular rendering shared by sweep and batch results.

/// A result that renders as rows of decimal text.
///
/// Numbers use `f64`'s `Display`, the shortest text that parses back to the
/// same value.
pub trait Tabular {
    /// Header row, or `None` for headerless tables.
    fn header(&self) -> Option<Vec<String>>;

    /// Body rows in output order.
    fn rows(&self) -> Vec<Vec<String>>;
}

/// Renders a slice of numbers as decimal text.
pub fn render_values(values: &[f64]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
