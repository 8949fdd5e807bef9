use std::{fmt, path::Path};

use indexmap::IndexMap;

/// Word frequencies in the order each word first appears.
#[derive(Debug, Default, PartialEq)]
pub struct WordCounts {
    pub total: usize,
    pub frequencies: IndexMap<String, usize>,
}

impl WordCounts {
    pub fn count(text: &str) -> WordCounts {
        let mut counts = WordCounts::default();
        for word in text.split_whitespace() {
            *counts.frequencies.entry(word.to_string()).or_insert(0) += 1;
            counts.total += 1;
        }
        counts
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// Heading printed to the console ahead of the counts.
pub fn console_heading(file: &Path) -> String {
    format!("\nDATA FROM: {}\n---- Word frequencies ----\n", file.display())
}

/// Heading written to the report file ahead of the counts.
pub fn report_heading(file: &Path) -> String {
    format!("Word frequencies for file: {}\nWord frequencies:\n", file.display())
}

impl fmt::Display for WordCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "COUNT: {}", self.total)?;
        for (word, count) in &self.frequencies {
            writeln!(f, "{}: {}", word, count)?;
        }
        Ok(())
    }
}
