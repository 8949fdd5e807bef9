use std::{fmt, fs, path::Path};

use anyhow::{Context, Result};
use log::warn;

use crate::{parse::numbered_lines, report::Number};

#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub value: f64,
    pub binary: String,
    pub hexadecimal: String,
}

impl Conversion {
    /// Truncates `value` toward zero and renders it in base 2 and base 16.
    pub fn new(value: f64) -> Conversion {
        // saturates outside the i64 range
        let int = value.trunc() as i64;
        Conversion {
            value,
            binary: with_sign(int, "0b", |n| format!("{:b}", n)),
            hexadecimal: with_sign(int, "0x", |n| format!("{:x}", n)),
        }
    }
}

fn with_sign(int: i64, prefix: &str, digits: impl Fn(u64) -> String) -> String {
    let sign = if int < 0 { "-" } else { "" };
    format!("{}{}{}", sign, prefix, digits(int.unsigned_abs()))
}

/// Parses one real number per line, skipping lines that are not numbers.
pub fn read_numbers(path: &Path) -> Result<Vec<f64>> {
    let bytes = fs::read(path).with_context(|| format!("unable to read {}", path.display()))?;
    let numbers = numbered_lines(&bytes)
        .filter_map(|(number, line)| match line {
            Ok(line) => match line.trim().parse::<f64>() {
                Ok(value) if value.is_finite() => Some(value),
                _ => {
                    warn!("{}:{}: not a number: {:?}", path.display(), number, line);
                    None
                }
            },
            Err(e) => {
                warn!("{}:{}: {}", path.display(), number, e);
                None
            }
        })
        .collect();
    Ok(numbers)
}

#[derive(Debug)]
pub struct ConversionTable(pub Vec<Conversion>);

impl ConversionTable {
    pub fn convert(numbers: &[f64]) -> ConversionTable {
        ConversionTable(numbers.iter().copied().map(Conversion::new).collect())
    }
}

impl fmt::Display for ConversionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Converted numbers:")?;
        for conversion in &self.0 {
            writeln!(f, "Num: {}", Number(conversion.value))?;
            writeln!(f, "Binary: {}", conversion.binary)?;
            writeln!(f, "Hexadecimal: {}", conversion.hexadecimal)?;
            writeln!(f, "----------------------------")?;
        }
        Ok(())
    }
}
