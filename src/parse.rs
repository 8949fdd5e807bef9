use std::{fs, ops::Deref, path::Path, str};

use log::{debug, error};

/// Ordered numbers accepted from one input source, in line order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleSet(Vec<f64>);

impl SampleSet {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

impl Deref for SampleSet {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.0
    }
}

/// Accepts an optional leading minus, digits and at most one decimal point.
pub fn is_numeric_literal(line: &str) -> bool {
    let token = line.trim();
    let unsigned = token.strip_prefix('-').unwrap_or(token);
    let digits = unsigned.replacen('.', "", 1);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

pub fn parse_samples<I, S>(lines: I) -> SampleSet
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let samples = lines
        .into_iter()
        .enumerate()
        .filter_map(|(index, line)| {
            let line = line.as_ref();
            if !is_numeric_literal(line) {
                debug!("skipping line {}: {:?}", index + 1, line);
                return None;
            }
            line.trim().parse::<f64>().ok().filter(|x| x.is_finite())
        })
        .collect();
    SampleSet(samples)
}

/// Splits raw file contents into numbered lines, decoding each one on its own
/// so a line in a foreign encoding does not spoil the rest of the file.
pub fn numbered_lines(
    bytes: &[u8],
) -> impl Iterator<Item = (usize, Result<&str, str::Utf8Error>)> {
    let bytes = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    let count = if bytes.is_empty() { 0 } else { usize::MAX };
    bytes
        .split(|b| *b == b'\n')
        .take(count)
        .enumerate()
        .map(|(index, line)| {
            let line = line.strip_suffix(b"\r").unwrap_or(line);
            (index + 1, str::from_utf8(line))
        })
}

/// Reads every line of `path` into a [`SampleSet`].
///
/// An unreadable source is logged once and yields an empty set, so callers
/// always get a result to report on.
pub fn read_samples(path: &Path) -> SampleSet {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            error!("Error reading file {}: {}", path.display(), e);
            return SampleSet::default();
        }
    };
    let lines = numbered_lines(&bytes).filter_map(|(number, line)| {
        line.map_err(|e| debug!("skipping line {}: {}", number, e)).ok()
    });
    parse_samples(lines)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use proptest::{prop_assert, prop_assert_eq, proptest};

    #[test]
    fn accepts_signed_and_decimal_literals() {
        for line in ["3", "-2.5", "  42  ", ".5", "5.", "-0", "007"] {
            assert!(is_numeric_literal(line), "{:?} should be accepted", line);
        }
    }

    #[test]
    fn rejects_malformed_literals() {
        for line in ["", "   ", "-", ".", "abc", "1.2.3", "--1", "+1", "1e5", "1-", "1 2"] {
            assert!(!is_numeric_literal(line), "{:?} should be rejected", line);
        }
    }

    #[test]
    fn drops_bad_lines_and_keeps_order() {
        let samples = parse_samples(vec!["3", "abc", "5", "", "-2.5"]);
        assert_eq!(samples.as_slice(), &[3.0, 5.0, -2.5]);
        assert_eq!(samples.len(), 3);
    }

    #[test]
    fn keeps_duplicates() {
        let samples = parse_samples("1\n1\n2\n1".lines());
        assert_eq!(samples.as_slice(), &[1.0, 1.0, 2.0, 1.0]);
    }

    #[test]
    fn missing_file_yields_empty_set() {
        let dir = tempfile::tempdir().unwrap();
        let samples = read_samples(&dir.path().join("does-not-exist.txt"));
        assert!(samples.is_empty());
    }

    #[test]
    fn reads_samples_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "10\n n/a \n -4.25\r\n20").unwrap();
        let samples = read_samples(file.path());
        assert_eq!(samples.as_slice(), &[10.0, -4.25, 20.0]);
    }

    #[test]
    fn undecodable_line_is_dropped_not_the_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"3\ncaf\xe9\n5\n-2.5\n").unwrap();
        let samples = read_samples(file.path());
        assert_eq!(samples.as_slice(), &[3.0, 5.0, -2.5]);
    }

    #[test]
    fn numbered_lines_match_str_lines() {
        let lines = |bytes: &'static [u8]| {
            numbered_lines(bytes)
                .map(|(number, line)| (number, line.unwrap()))
                .collect::<Vec<_>>()
        };
        assert!(lines(b"").is_empty());
        assert_eq!(lines(b"1\r\n2"), vec![(1, "1"), (2, "2")]);
        assert_eq!(lines(b"1\n\n3\n"), vec![(1, "1"), (2, ""), (3, "3")]);
    }

    proptest! {
        #[test]
        fn formatted_numbers_are_accepted(int in -1_000_000i64..1_000_000, frac in 0u32..10_000) {
            let line = format!("{}.{}", int, frac);
            prop_assert!(is_numeric_literal(&line));
            let samples = parse_samples(vec![line.as_str()]);
            prop_assert_eq!(samples.len(), 1);
        }

        #[test]
        fn accepted_lines_always_parse(line in "\\PC*") {
            let samples = parse_samples(vec![line.as_str()]);
            prop_assert_eq!(samples.len(), usize::from(is_numeric_literal(&line)));
            prop_assert!(samples.iter().all(|x| x.is_finite()));
        }
    }
}
