use std::{
    fmt,
    fs::OpenOptions,
    io::Write,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use log::info;
use serde::Serialize;

use crate::stats::StatisticsResult;

/// How a [`Report`] treats a report file that already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    Append,
    Overwrite,
}

/// Collects the text of one run and writes it to the report file at the end.
#[derive(Debug)]
pub struct Report {
    path: PathBuf,
    mode: WriteMode,
    contents: String,
}

impl Report {
    pub fn new(path: impl Into<PathBuf>, mode: WriteMode) -> Report {
        Report {
            path: path.into(),
            mode,
            contents: String::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    #[cfg(test)]
    pub fn contents(&self) -> &str {
        &self.contents
    }

    /// Adds `text` to the report file only.
    pub fn push(&mut self, text: impl fmt::Display) {
        self.contents += &text.to_string();
    }

    /// Adds `record` to the report file as one line of JSON.
    pub fn push_json(&mut self, record: &impl Serialize) -> Result<()> {
        self.contents += &serde_json::to_string(record).context("unable to serialize report")?;
        self.contents.push('\n');
        Ok(())
    }

    /// Prints `text` to stdout and adds it to the report file.
    pub fn emit(&mut self, text: impl fmt::Display) {
        let text = text.to_string();
        print!("{}", text);
        self.contents += &text;
    }

    pub fn write(&self) -> Result<()> {
        let mut options = OpenOptions::new();
        match self.mode {
            WriteMode::Append => options.create(true).append(true),
            WriteMode::Overwrite => options.create(true).write(true).truncate(true),
        };
        let mut file = options
            .open(&self.path)
            .with_context(|| format!("unable to open report {}", self.path.display()))?;
        file.write_all(self.contents.as_bytes())
            .with_context(|| format!("unable to write report {}", self.path.display()))?;
        info!("report written to {} ({:?})", self.path.display(), self.mode);
        Ok(())
    }
}

/// Runs `f` and returns its output with the wall-clock time it took.
pub fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let output = f();
    (output, start.elapsed())
}

/// Renders a number with a decimal point: `5.0`, `2.5`. Very large or small
/// magnitudes use Rust's exponent form (`1e16`).
pub struct Number(pub f64);

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

/// An optional statistic; absent values render as `None`.
pub struct Optional(pub Option<f64>);

impl fmt::Display for Optional {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => write!(f, "{}", Number(value)),
            None => write!(f, "None"),
        }
    }
}

impl fmt::Display for StatisticsResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Statistics for {}:", self.source_id)?;
        writeln!(f, "Count: {}", self.count)?;
        writeln!(f, "Mean: {}", Optional(self.mean))?;
        writeln!(f, "Median: {}", Optional(self.median))?;
        writeln!(f, "Mode: {}", Optional(self.mode))?;
        writeln!(f, "Standard Deviation: {}", Optional(self.std_deviation))?;
        writeln!(f, "Variance: {}", Optional(self.variance))
    }
}
