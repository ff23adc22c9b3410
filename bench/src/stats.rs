//! Latency summary statistics.

use std::time::Duration;

/// Percentiles reported for every operation.
pub const PERCENTILES: [u32; 7] = [10, 25, 50, 75, 90, 95, 99];

/// Outcome of a single timed call.
#[derive(Debug, Clone, Copy)]
pub struct Sample {
    pub latency: Duration,
    pub ok: bool,
}

/// Aggregate numbers for one batch of calls.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub total: Duration,
    pub average: Duration,
    pub fastest: Duration,
    pub slowest: Duration,
    pub rps: f64,
    pub error_count: usize,
    pub error_rate: f64,
    /// `(percentile, latency)` pairs, one per entry of [`PERCENTILES`].
    pub percentiles: Vec<(u32, Duration)>,
}

impl Summary {
    /// Summarizes `samples` collected over `total` wall-clock time.
    ///
    /// Latency figures cover every call, failed ones included.
    pub fn from_samples(samples: &[Sample], total: Duration) -> Self {
        let mut latencies: Vec<Duration> = samples.iter().map(|s| s.latency).collect();
        latencies.sort_unstable();

        let count = latencies.len();
        let error_count = samples.iter().filter(|s| !s.ok).count();
        let sum: Duration = latencies.iter().sum();

        let average = mean(sum, count);
        let rps = if total.is_zero() {
            0.0
        } else {
            count as f64 / total.as_secs_f64()
        };
        let error_rate = if count == 0 {
            0.0
        } else {
            error_count as f64 / count as f64
        };

        Self {
            count,
            total,
            average,
            fastest: latencies.first().copied().unwrap_or_default(),
            slowest: latencies.last().copied().unwrap_or_default(),
            rps,
            error_count,
            error_rate,
            percentiles: PERCENTILES
                .iter()
                .map(|p| (*p, percentile(&latencies, *p)))
                .collect(),
        }
    }

    pub fn percentile(&self, p: u32) -> Option<Duration> {
        self.percentiles
            .iter()
            .find(|(q, _)| *q == p)
            .map(|(_, latency)| *latency)
    }
}

/// `sum / count` at nanosecond precision; zero for an empty sample.
pub fn mean(sum: Duration, count: usize) -> Duration {
    if count == 0 {
        return Duration::ZERO;
    }
    let nanos = sum.as_nanos() / count as u128;
    Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
}

/// Nearest-rank-below percentile of an ascending slice: the element at
/// index `floor((n - 1) * p / 100)`. Empty input yields zero.
pub fn percentile(sorted: &[Duration], p: u32) -> Duration {
    if sorted.is_empty() {
        return Duration::ZERO;
    }
    let index = (sorted.len() - 1) * p.min(100) as usize / 100;
    sorted[index]
}
