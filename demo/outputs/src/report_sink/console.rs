//! Plain-text table printer.

use std::io::{self, Write};

use pricer_risk::Tabular;

use super::ReportSink;
use crate::error::SinkError;

/// Prints tables to standard output with right-aligned columns.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsolePrinter;

impl ConsolePrinter {
    /// Renders `table` as aligned text, one line per row.
    ///
    /// # Examples
    /// ```
    /// use demo_outputs::report_sink::ConsolePrinter;
    /// use pricer_models::instruments::{EuropeanOption, OptionKind, OptionParameter};
    /// use pricer_models::measures::Measure;
    /// use pricer_risk::ParameterSweep;
    ///
    /// let option = EuropeanOption::new(OptionKind::Call, 0.25, 65.0, 60.0, 0.08, 0.3);
    /// let table = ParameterSweep::new(option, OptionParameter::Spot, vec![60.0, 70.0])
    ///     .unwrap()
    ///     .evaluate(Measure::Price)
    ///     .unwrap();
    /// let text = ConsolePrinter.render(&table);
    /// assert_eq!(text.lines().count(), 2);
    /// ```
    pub fn render(&self, table: &dyn Tabular) -> String {
        let lines: Vec<Vec<String>> = table.header().into_iter().chain(table.rows()).collect();

        let columns = lines.iter().map(Vec::len).max().unwrap_or(0);
        let mut widths = vec![0; columns];
        for line in &lines {
            for (width, cell) in widths.iter_mut().zip(line) {
                *width = (*width).max(cell.len());
            }
        }

        let mut out = String::new();
        for line in &lines {
            let cells: Vec<String> = line
                .iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{cell:>width$}"))
                .collect();
            out.push_str(&cells.join("  "));
            out.push('\n');
        }
        out
    }
}

impl ReportSink for ConsolePrinter {
    fn send(&self, name: &str, table: &dyn Tabular) -> Result<(), SinkError> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{name}")
            .and_then(|_| stdout.write_all(self.render(table).as_bytes()))
            .map_err(|source| SinkError::Io {
                path: "<stdout>".into(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed;

    impl Tabular for Fixed {
        fn header(&self) -> Option<Vec<String>> {
            Some(vec!["Option".into(), "Price".into()])
        }

        fn rows(&self) -> Vec<Vec<String>> {
            vec![
                vec!["1".into(), "2.1333684449162043".into()],
                vec!["12".into(), "0.5".into()],
            ]
        }
    }

    #[test]
    fn test_columns_are_aligned() {
        let text = ConsolePrinter.render(&Fixed);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Option               Price");
        assert_eq!(lines[1], "     1  2.1333684449162043");
        assert_eq!(lines[2], "    12                 0.5");
    }

    #[test]
    fn test_empty_table() {
        struct Empty;
        impl Tabular for Empty {
            fn header(&self) -> Option<Vec<String>> {
                None
            }
            fn rows(&self) -> Vec<Vec<String>> {
                Vec::new()
            }
        }
        assert_eq!(ConsolePrinter.render(&Empty), "");
    }
}
