use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::parse::SampleSet;

/// Descriptive statistics for one input source.
///
/// Every statistic except `count` is `None` when it is undefined for the
/// samples, so an absent value can never be mistaken for a computed `0.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsResult {
    pub source_id: String,
    pub count: usize,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub mode: Option<f64>,
    pub variance: Option<f64>,
    pub std_deviation: Option<f64>,
}

impl StatisticsResult {
    pub fn compute(source_id: impl Into<String>, samples: &SampleSet) -> StatisticsResult {
        let data = samples.as_slice();
        let mean = mean(data);
        let variance = mean.map(|mean| variance(data, mean));

        StatisticsResult {
            source_id: source_id.into(),
            count: data.len(),
            mean,
            median: median(data),
            mode: mode(data),
            variance,
            std_deviation: variance.map(f64::sqrt),
        }
    }
}

fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(data.iter().sum::<f64>() / data.len() as f64)
}

fn median(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    let mut sorted = data.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.)
    } else {
        Some(sorted[mid])
    }
}

/// Most frequent value; ties go to the value seen first in `data`.
fn mode(data: &[f64]) -> Option<f64> {
    let mut frequencies: IndexMap<u64, (f64, usize)> = IndexMap::new();
    for &value in data {
        // -0.0 and 0.0 compare equal and must share a bucket
        let key = if value == 0. { 0f64.to_bits() } else { value.to_bits() };
        frequencies.entry(key).or_insert((value, 0)).1 += 1;
    }

    let max_frequency = frequencies.values().map(|(_, count)| *count).max()?;
    if max_frequency < 2 {
        return None;
    }
    frequencies
        .values()
        .find(|(_, count)| *count == max_frequency)
        .map(|(value, _)| *value)
}

/// Population variance around an already computed `mean`.
fn variance(data: &[f64], mean: f64) -> f64 {
    data.iter()
        .map(|value| (value - mean).powf(2.))
        .sum::<f64>()
        / (data.len() as f64)
}
